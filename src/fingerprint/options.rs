//! Collection options and presets.
//!
//! Callers hand [`Fingerprinter::collect`](super::Fingerprinter::collect)
//! either a [`Preset`] or a [`PartialOptions`]; both resolve to a complete
//! [`FingerprintOptions`]. Explicit keys always win over the preset, and
//! the preset defaults to `minimal`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::signal::Signal;
use crate::error::Error;

/// Global budget when none is given, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: f64 = 5000.0;

/// Per-signal budget when none is given, in milliseconds.
pub const DEFAULT_METHOD_TIMEOUT_MS: f64 = 1000.0;

/// Upper bound on any budget so deadlines stay representable.
const MAX_BUDGET: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// No optional signals; `basic` only.
    Minimal,
    /// Canvas, WebGL, audio, fonts and timezone.
    Standard,
    /// Every signal.
    Comprehensive,
}

impl Preset {
    pub fn options(self) -> FingerprintOptions {
        let minimal = FingerprintOptions::default();
        match self {
            Preset::Minimal => minimal,
            Preset::Standard => FingerprintOptions {
                canvas: true,
                webgl: true,
                audio: true,
                fonts: FontsOption::Enabled(true),
                timezone: true,
                ..minimal
            },
            Preset::Comprehensive => FingerprintOptions {
                canvas: true,
                webgl: true,
                audio: true,
                fonts: FontsOption::Enabled(true),
                media_devices: true,
                network_info: true,
                timezone: true,
                incognito_detection: true,
                ..minimal
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Minimal => "minimal",
            Preset::Standard => "standard",
            Preset::Comprehensive => "comprehensive",
        })
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Preset::Minimal),
            "standard" => Ok(Preset::Standard),
            "comprehensive" => Ok(Preset::Comprehensive),
            other => Err(Error::UnknownPreset(other.to_string())),
        }
    }
}

/// `fonts = true | false | ["Font A", "Font B"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontsOption {
    Enabled(bool),
    /// Enabled, probing this list instead of the collector's default one.
    Custom(Vec<String>),
}

impl Default for FontsOption {
    fn default() -> Self {
        FontsOption::Enabled(false)
    }
}

impl FontsOption {
    pub fn is_enabled(&self) -> bool {
        match self {
            FontsOption::Enabled(enabled) => *enabled,
            FontsOption::Custom(_) => true,
        }
    }

    /// Caller-supplied font list, if any. An empty list means "use the default".
    pub fn custom_list(&self) -> Option<&[String]> {
        match self {
            FontsOption::Custom(list) if !list.is_empty() => Some(list),
            _ => None,
        }
    }
}

impl From<bool> for FontsOption {
    fn from(enabled: bool) -> Self {
        FontsOption::Enabled(enabled)
    }
}

impl From<Vec<String>> for FontsOption {
    fn from(list: Vec<String>) -> Self {
        FontsOption::Custom(list)
    }
}

/// Fully resolved options.
///
/// Timeouts are milliseconds as floating point. Zero, negative and
/// non-finite values mean "already expired".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FingerprintOptions {
    pub canvas: bool,
    pub webgl: bool,
    pub audio: bool,
    pub fonts: FontsOption,
    pub media_devices: bool,
    pub network_info: bool,
    pub timezone: bool,
    pub incognito_detection: bool,
    pub timeout: f64,
    pub method_timeout: f64,
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            canvas: false,
            webgl: false,
            audio: false,
            fonts: FontsOption::default(),
            media_devices: false,
            network_info: false,
            timezone: false,
            incognito_detection: false,
            timeout: DEFAULT_TIMEOUT_MS,
            method_timeout: DEFAULT_METHOD_TIMEOUT_MS,
        }
    }
}

impl FingerprintOptions {
    pub fn is_enabled(&self, signal: Signal) -> bool {
        match signal {
            Signal::Basic => true,
            Signal::Canvas => self.canvas,
            Signal::Webgl => self.webgl,
            Signal::Audio => self.audio,
            Signal::Fonts => self.fonts.is_enabled(),
            Signal::MediaDevices => self.media_devices,
            Signal::NetworkInfo => self.network_info,
            Signal::Timezone => self.timezone,
            Signal::Incognito => self.incognito_detection,
        }
    }

    /// Enabled optional signals in combine order.
    pub fn enabled_signals(&self) -> Vec<Signal> {
        Signal::OPTIONAL
            .into_iter()
            .filter(|signal| self.is_enabled(*signal))
            .collect()
    }

    pub fn global_budget(&self) -> Duration {
        budget(self.timeout)
    }

    pub fn method_budget(&self) -> Duration {
        budget(self.method_timeout)
    }
}

/// Milliseconds to a deadline duration; anything not strictly positive is zero.
pub fn budget(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0)
        .unwrap_or(MAX_BUDGET)
        .min(MAX_BUDGET)
}

/// Options as callers and config files write them: an optional preset plus
/// any explicit keys. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontsOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_devices: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incognito_detection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_timeout: Option<f64>,
}

impl PartialOptions {
    /// Overlay the explicit keys on the preset (or `minimal`).
    pub fn resolve(&self) -> FingerprintOptions {
        let base = self.preset.unwrap_or(Preset::Minimal).options();
        FingerprintOptions {
            canvas: self.canvas.unwrap_or(base.canvas),
            webgl: self.webgl.unwrap_or(base.webgl),
            audio: self.audio.unwrap_or(base.audio),
            fonts: self.fonts.clone().unwrap_or(base.fonts),
            media_devices: self.media_devices.unwrap_or(base.media_devices),
            network_info: self.network_info.unwrap_or(base.network_info),
            timezone: self.timezone.unwrap_or(base.timezone),
            incognito_detection: self.incognito_detection.unwrap_or(base.incognito_detection),
            timeout: self.timeout.unwrap_or(base.timeout),
            method_timeout: self.method_timeout.unwrap_or(base.method_timeout),
        }
    }

    /// Set the key that enables `signal`. `basic` has no key and is ignored.
    #[must_use]
    pub fn with(mut self, signal: Signal, enabled: bool) -> Self {
        match signal {
            Signal::Basic => {}
            Signal::Canvas => self.canvas = Some(enabled),
            Signal::Webgl => self.webgl = Some(enabled),
            Signal::Audio => self.audio = Some(enabled),
            Signal::Fonts => self.fonts = Some(FontsOption::Enabled(enabled)),
            Signal::MediaDevices => self.media_devices = Some(enabled),
            Signal::NetworkInfo => self.network_info = Some(enabled),
            Signal::Timezone => self.timezone = Some(enabled),
            Signal::Incognito => self.incognito_detection = Some(enabled),
        }
        self
    }

    #[must_use]
    pub fn fonts(mut self, list: Vec<String>) -> Self {
        self.fonts = Some(FontsOption::Custom(list));
        self
    }

    #[must_use]
    pub fn timeout_ms(mut self, ms: f64) -> Self {
        self.timeout = Some(ms);
        self
    }

    #[must_use]
    pub fn method_timeout_ms(mut self, ms: f64) -> Self {
        self.method_timeout = Some(ms);
        self
    }
}

impl From<Preset> for PartialOptions {
    fn from(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }
}

impl From<FingerprintOptions> for PartialOptions {
    fn from(options: FingerprintOptions) -> Self {
        Self {
            preset: None,
            canvas: Some(options.canvas),
            webgl: Some(options.webgl),
            audio: Some(options.audio),
            fonts: Some(options.fonts),
            media_devices: Some(options.media_devices),
            network_info: Some(options.network_info),
            timezone: Some(options.timezone),
            incognito_detection: Some(options.incognito_detection),
            timeout: Some(options.timeout),
            method_timeout: Some(options.method_timeout),
        }
    }
}
