//! Signal collectors.
//!
//! A [`Collector`] produces one signal's hash. `Ok(None)` means the signal
//! is unsupported here; `Err` means the collector failed. Both degrade the
//! signal, never the run.
//!
//! Timezone, network, media-device and incognito collectors read the
//! [`Environment`]; canvas, WebGL, audio and fonts need a renderer and are
//! registered by the embedding application.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::signal::Signal;
use crate::env::Environment;
use crate::hash::rolling_hex;

/// Storage quota below which a session is treated as private browsing.
pub const INCOGNITO_QUOTA_BYTES: u64 = 120 * 1024 * 1024;

/// Per-call inputs handed to a collector.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectRequest {
    /// Time the collector has before its result is abandoned.
    pub timeout: Duration,
    /// Custom font list; only set for the fonts signal.
    pub fonts: Option<Vec<String>>,
}

#[async_trait]
pub trait Collector: Send + Sync {
    async fn collect(&self, request: &CollectRequest) -> anyhow::Result<Option<String>>;
}

/// Collectors by signal.
#[derive(Clone, Default)]
pub struct Collectors {
    by_signal: HashMap<Signal, Arc<dyn Collector>>,
}

impl Collectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the environment-backed collectors installed.
    pub fn from_environment(env: &Arc<dyn Environment>) -> Self {
        let mut collectors = Self::new();
        collectors.register(Signal::Timezone, TimezoneCollector { env: Arc::clone(env) });
        collectors.register(Signal::NetworkInfo, NetworkInfoCollector { env: Arc::clone(env) });
        collectors.register(Signal::MediaDevices, MediaDevicesCollector { env: Arc::clone(env) });
        collectors.register(Signal::Incognito, IncognitoCollector { env: Arc::clone(env) });
        collectors
    }

    /// Install `collector` for `signal`, replacing any previous one.
    /// `basic` is computed in-process and cannot be overridden.
    pub fn register(&mut self, signal: Signal, collector: impl Collector + 'static) {
        self.register_arc(signal, Arc::new(collector));
    }

    pub fn register_arc(&mut self, signal: Signal, collector: Arc<dyn Collector>) {
        if signal == Signal::Basic {
            tracing::warn!("ignoring collector registered for the basic signal");
            return;
        }
        self.by_signal.insert(signal, collector);
    }

    pub fn remove(&mut self, signal: Signal) -> bool {
        self.by_signal.remove(&signal).is_some()
    }

    pub fn get(&self, signal: Signal) -> Option<Arc<dyn Collector>> {
        self.by_signal.get(&signal).cloned()
    }

    pub fn contains(&self, signal: Signal) -> bool {
        signal == Signal::Basic || self.by_signal.contains_key(&signal)
    }
}

impl fmt::Debug for Collectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut signals: Vec<_> = self.by_signal.keys().collect();
        signals.sort();
        f.debug_struct("Collectors").field("signals", &signals).finish()
    }
}

struct TimezoneCollector {
    env: Arc<dyn Environment>,
}

#[async_trait]
impl Collector for TimezoneCollector {
    async fn collect(&self, _request: &CollectRequest) -> anyhow::Result<Option<String>> {
        let offset = self.env.timezone_offset_minutes();
        Ok(match (self.env.timezone(), offset) {
            (None, None) => None,
            (name, offset) => {
                let name = name.unwrap_or_default();
                let offset = offset.map(|o| o.to_string()).unwrap_or_default();
                Some(rolling_hex(&format!("{name}|{offset}")))
            }
        })
    }
}

struct NetworkInfoCollector {
    env: Arc<dyn Environment>,
}

#[async_trait]
impl Collector for NetworkInfoCollector {
    async fn collect(&self, _request: &CollectRequest) -> anyhow::Result<Option<String>> {
        Ok(self.env.connection().map(|c| {
            rolling_hex(&format!(
                "{}|{}|{}|{}",
                c.effective_type, c.downlink_mbps, c.rtt_ms, c.save_data
            ))
        }))
    }
}

struct MediaDevicesCollector {
    env: Arc<dyn Environment>,
}

#[async_trait]
impl Collector for MediaDevicesCollector {
    async fn collect(&self, _request: &CollectRequest) -> anyhow::Result<Option<String>> {
        Ok(self.env.media_devices().map(|d| {
            rolling_hex(&format!(
                "{}|{}|{}",
                d.audio_inputs, d.audio_outputs, d.video_inputs
            ))
        }))
    }
}

struct IncognitoCollector {
    env: Arc<dyn Environment>,
}

#[async_trait]
impl Collector for IncognitoCollector {
    async fn collect(&self, _request: &CollectRequest) -> anyhow::Result<Option<String>> {
        Ok(self.env.storage_quota_bytes().map(|quota| {
            let mode = if quota < INCOGNITO_QUOTA_BYTES {
                "incognito"
            } else {
                "regular"
            };
            rolling_hex(mode)
        }))
    }
}
