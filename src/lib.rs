//! `visitorid` - stable device identifiers
//!
//! # Features
//!
//! - **User-Agent Classification**: ordered browser, OS and platform rule
//!   tables plus derived form-factor, bot and Smart TV tests
//! - **Fingerprint Orchestration**: optional signals collected concurrently
//!   under per-signal and global budgets, combined in a fixed order
//! - **Deterministic Identifiers**: 128-bit digest rendered in UUID v4 shape
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use visitorid::{Fingerprinter, PartialOptions, Signal, StaticEnvironment};
//!
//! # tokio_test::block_on(async {
//! let env = StaticEnvironment::with_user_agent(
//!     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!      (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
//! );
//! let fingerprinter = Fingerprinter::new(Arc::new(env));
//!
//! let profile = fingerprinter.parse(None);
//! assert_eq!(profile.browser_name, "Chrome");
//! assert!(profile.is_windows && profile.is_desktop);
//!
//! // No canvas collector is registered here, so that signal degrades.
//! let report = fingerprinter
//!     .collect(PartialOptions::default().with(Signal::Canvas, true))
//!     .await;
//! assert_eq!(report.confidence, 0.5);
//! assert_eq!(report.uuid.len(), 36);
//! # });
//! ```

pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod fingerprint;
pub mod hash;

pub use agent::{classify, Browser, Detection, DeviceProfile};
pub use config::Settings;
pub use env::{ConnectionInfo, Environment, MediaDeviceCounts, StaticEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use fingerprint::{
    CollectRequest, Collector, Collectors, FingerprintOptions, FingerprintReport, Fingerprinter,
    FontsOption, PartialOptions, Preset, ProfileField, ProfileFields, Signal, SignalResult,
};

/// Version of visitorid
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
