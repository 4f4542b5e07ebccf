//! Signal names, per-signal outcomes and the final report.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A fingerprint signal.
///
/// Declaration order is the combine order: `Ord` is derived, so a
/// `BTreeMap<Signal, _>` iterates `basic` first and `incognito` last no
/// matter which collector finished first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Signal {
    Basic,
    Canvas,
    Webgl,
    Audio,
    Fonts,
    MediaDevices,
    NetworkInfo,
    Timezone,
    Incognito,
}

impl Signal {
    pub const ALL: [Signal; 9] = [
        Signal::Basic,
        Signal::Canvas,
        Signal::Webgl,
        Signal::Audio,
        Signal::Fonts,
        Signal::MediaDevices,
        Signal::NetworkInfo,
        Signal::Timezone,
        Signal::Incognito,
    ];

    /// Signals that need a collector; everything except `basic`.
    pub const OPTIONAL: [Signal; 8] = [
        Signal::Canvas,
        Signal::Webgl,
        Signal::Audio,
        Signal::Fonts,
        Signal::MediaDevices,
        Signal::NetworkInfo,
        Signal::Timezone,
        Signal::Incognito,
    ];

    /// Component name in reports.
    pub fn name(self) -> &'static str {
        match self {
            Signal::Basic => "basic",
            Signal::Canvas => "canvas",
            Signal::Webgl => "webgl",
            Signal::Audio => "audio",
            Signal::Fonts => "fonts",
            Signal::MediaDevices => "mediaDevices",
            Signal::NetworkInfo => "networkInfo",
            Signal::Timezone => "timezone",
            Signal::Incognito => "incognito",
        }
    }

    /// Key that enables this signal in the options.
    pub fn option_key(self) -> &'static str {
        match self {
            Signal::Incognito => "incognitoDetection",
            other => other.name(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = Error;

    /// Accepts both component names and option keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|signal| signal.name() == s || signal.option_key() == s)
            .ok_or_else(|| Error::UnknownSignal(s.to_string()))
    }
}

/// Outcome of one signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalResult {
    pub name: Signal,
    pub value: Option<String>,
    pub success: bool,
    pub duration_ms: f64,
}

impl SignalResult {
    pub fn succeeded(name: Signal, value: String, elapsed: Duration) -> Self {
        Self {
            name,
            value: Some(value),
            success: true,
            duration_ms: millis(elapsed),
        }
    }

    pub fn failed(name: Signal, elapsed: Duration) -> Self {
        Self {
            name,
            value: None,
            success: false,
            duration_ms: millis(elapsed),
        }
    }
}

/// Result of a full collection run.
///
/// Only `uuid` and the component values are derived from device data;
/// `duration_ms` and `timestamp_ms` are reporting metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintReport {
    pub uuid: String,
    pub components: BTreeMap<Signal, SignalResult>,
    pub confidence: f64,
    pub duration_ms: f64,
    pub timestamp_ms: i64,
}

impl FingerprintReport {
    pub fn component(&self, signal: Signal) -> Option<&SignalResult> {
        self.components.get(&signal)
    }

    pub fn successful(&self) -> usize {
        self.components.values().filter(|r| r.success).count()
    }
}

pub(crate) fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
