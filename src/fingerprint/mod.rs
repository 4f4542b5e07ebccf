//! Fingerprint Orchestration
//!
//! Runs the `basic` signal in-process, fans the enabled optional signals out
//! to their collectors and folds everything into one deterministic UUID.
//!
//! # Budgets
//!
//! Each optional signal runs as its own task bounded by `methodTimeout`.
//! The whole fan-out is bounded by `timeout`. A signal that misses either
//! budget is recorded as failed; its task is detached, not killed, and
//! whatever it eventually returns is dropped.
//!
//! # Determinism
//!
//! The UUID is built from component values in [`Signal`] order, never in
//! completion order, and never includes timings or timestamps.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use visitorid::{Fingerprinter, Preset, StaticEnvironment};
//!
//! # tokio_test::block_on(async {
//! let env = StaticEnvironment::with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
//!     .with_timezone("Europe/Helsinki", 120);
//! let fingerprinter = Fingerprinter::new(Arc::new(env));
//!
//! let report = fingerprinter.collect(Preset::Minimal).await;
//! assert_eq!(report.uuid.len(), 36);
//! assert_eq!(report.components.len(), 1);
//! assert!((report.confidence - 1.0).abs() < f64::EPSILON);
//! # });
//! ```

mod collector;
mod fields;
mod options;
mod signal;


use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::Instant;
use tracing::{debug, warn};

pub use collector::{CollectRequest, Collector, Collectors, INCOGNITO_QUOTA_BYTES};
pub use fields::{ProfileField, ProfileFields, SEPARATOR};
pub use options::{
    budget, FingerprintOptions, FontsOption, PartialOptions, Preset, DEFAULT_METHOD_TIMEOUT_MS,
    DEFAULT_TIMEOUT_MS,
};
pub use signal::{FingerprintReport, Signal, SignalResult};

use crate::agent::{classify, DeviceProfile};
use crate::env::{Environment, SystemEnvironment};
use crate::hash;

/// Device fingerprinter bound to one environment.
///
/// Holds only immutable configuration, so one instance can serve
/// overlapping `collect` calls.
#[derive(Clone)]
pub struct Fingerprinter {
    env: Arc<dyn Environment>,
    fields: ProfileFields,
    collectors: Collectors,
}

impl fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("user_agent", &self.env.user_agent())
            .field("fields", &self.fields)
            .field("collectors", &self.collectors)
            .finish()
    }
}

impl Fingerprinter {
    /// Fingerprinter over `env` with the default field template and the
    /// environment-backed collectors.
    pub fn new(env: Arc<dyn Environment>) -> Self {
        let collectors = Collectors::from_environment(&env);
        Self {
            env,
            fields: ProfileFields::default(),
            collectors,
        }
    }

    /// Fingerprinter over the host process.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemEnvironment))
    }

    #[must_use]
    pub fn with_fields(mut self, fields: ProfileFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_collector(mut self, signal: Signal, collector: impl Collector + 'static) -> Self {
        self.collectors.register(signal, collector);
        self
    }

    /// Replace the whole registry, built-ins included.
    #[must_use]
    pub fn with_collectors(mut self, collectors: Collectors) -> Self {
        self.collectors = collectors;
        self
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    /// Classify `user_agent`, or the environment's own user agent.
    pub fn parse(&self, user_agent: Option<&str>) -> DeviceProfile {
        match user_agent {
            Some(ua) => classify(ua, self.env.as_ref()),
            None => classify(&self.env.user_agent(), self.env.as_ref()),
        }
    }

    /// Synchronous UUID from the device profile alone, optionally salted.
    pub fn get(&self, custom_data: Option<&str>) -> String {
        let profile = self.parse(None);
        hash::uuid_of(&self.fields.payload(&profile, custom_data))
    }

    pub async fn get_async(&self, options: impl Into<PartialOptions>) -> String {
        self.collect_simple(options).await
    }

    pub async fn get_detailed_async(&self, options: impl Into<PartialOptions>) -> FingerprintReport {
        self.collect(options).await
    }

    /// Per-field digests of the `basic` payload. Sentinel readings map to `None`.
    pub fn components(&self) -> BTreeMap<String, Option<String>> {
        let profile = self.parse(None);
        self.fields
            .included()
            .map(|field| {
                let value = field.value(&profile);
                let digest = (!fields::is_sentinel(&value)).then(|| hash::digest(&value));
                (field.name().to_string(), digest)
            })
            .collect()
    }

    /// Whether `signal` can produce a value with this fingerprinter.
    pub fn supports(&self, signal: Signal) -> bool {
        self.collectors.contains(signal)
    }

    /// Whether `name` is a signal name or option key this crate knows.
    pub fn is_feature_supported(name: &str) -> bool {
        name.parse::<Signal>().is_ok()
    }

    pub async fn collect_simple(&self, options: impl Into<PartialOptions>) -> String {
        self.collect(options).await.uuid
    }

    /// Run every enabled signal and combine the results.
    ///
    /// Never fails: collector errors, panics and timeouts only lower
    /// `confidence`.
    pub async fn collect(&self, options: impl Into<PartialOptions>) -> FingerprintReport {
        let started = Instant::now();
        let timestamp_ms = Utc::now().timestamp_millis();
        let options = options.into().resolve();

        let mut components = BTreeMap::new();
        components.insert(Signal::Basic, self.basic_signal());
        for result in self.collect_optional(&options).await {
            components.insert(result.name, result);
        }

        let uuid = hash::uuid_of(&combined_payload(&components));
        let confidence = confidence(&components);
        debug!(
            "fingerprint {uuid}: {}/{} signals in {:?}",
            components.values().filter(|r| r.success).count(),
            components.len(),
            started.elapsed()
        );

        FingerprintReport {
            uuid,
            components,
            confidence,
            duration_ms: signal::millis(started.elapsed()),
            timestamp_ms,
        }
    }

    fn basic_signal(&self) -> SignalResult {
        let started = Instant::now();
        let profile = self.parse(None);
        let payload = self.fields.payload(&profile, None);
        SignalResult::succeeded(Signal::Basic, hash::digest(&payload), started.elapsed())
    }

    async fn collect_optional(&self, options: &FingerprintOptions) -> Vec<SignalResult> {
        let signals = options.enabled_signals();
        if signals.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let global = options.global_budget();
        let method = options.method_budget();
        let mut results = BTreeMap::new();
        let mut pending = FuturesUnordered::new();

        for &signal in &signals {
            let Some(collector) = self.collectors.get(signal) else {
                debug!("{signal}: no collector registered");
                results.insert(signal, SignalResult::failed(signal, Duration::ZERO));
                continue;
            };
            let request = CollectRequest {
                timeout: method,
                fonts: (signal == Signal::Fonts)
                    .then(|| options.fonts.custom_list().map(<[String]>::to_vec))
                    .flatten(),
            };
            pending.push(run_signal(signal, collector, request));
        }

        if global.is_zero() {
            warn!("global fingerprint budget is zero; skipping {} signals", pending.len());
        } else {
            let deadline = started + global;
            loop {
                match tokio::time::timeout_at(deadline, pending.next()).await {
                    Ok(Some(result)) => {
                        results.insert(result.name, result);
                    }
                    Ok(None) => break,
                    Err(_) => {
                        warn!(
                            "global fingerprint budget of {global:?} elapsed with {} signals pending",
                            pending.len()
                        );
                        break;
                    }
                }
            }
        }
        // Dropping the remaining futures detaches their tasks.
        drop(pending);

        let elapsed = started.elapsed();
        for signal in signals {
            results
                .entry(signal)
                .or_insert_with(|| SignalResult::failed(signal, elapsed));
        }
        results.into_values().collect()
    }
}

/// Run one collector on its own task under the per-signal budget.
async fn run_signal(
    signal: Signal,
    collector: Arc<dyn Collector>,
    request: CollectRequest,
) -> SignalResult {
    let started = Instant::now();
    let budget = request.timeout;
    if budget.is_zero() {
        debug!("{signal}: per-signal budget is zero");
        return SignalResult::failed(signal, Duration::ZERO);
    }

    let task = tokio::spawn(async move { collector.collect(&request).await });
    let value = match tokio::time::timeout(budget, task).await {
        Ok(Ok(Ok(value))) => value.filter(|v| !v.is_empty()),
        Ok(Ok(Err(e))) => {
            debug!("{signal}: collector failed: {e:#}");
            None
        }
        Ok(Err(e)) => {
            debug!("{signal}: collector task aborted: {e}");
            None
        }
        Err(_) => {
            debug!("{signal}: timed out after {budget:?}");
            None
        }
    };

    let elapsed = started.elapsed();
    match value {
        Some(value) => {
            debug!("{signal}: collected in {elapsed:?}");
            SignalResult::succeeded(signal, value, elapsed)
        }
        None => SignalResult::failed(signal, elapsed),
    }
}

/// Successful component values in signal order, joined.
fn combined_payload(components: &BTreeMap<Signal, SignalResult>) -> String {
    components
        .values()
        .filter(|result| result.success)
        .filter_map(|result| result.value.as_deref())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[allow(clippy::cast_precision_loss)]
fn confidence(components: &BTreeMap<Signal, SignalResult>) -> f64 {
    if components.is_empty() {
        return 0.0;
    }
    let succeeded = components.values().filter(|r| r.success).count();
    (succeeded as f64 / components.len() as f64).clamp(0.0, 1.0)
}
