//! Environment readers
//!
//! The classifier and the built-in collectors never touch platform APIs
//! directly. They read through [`Environment`], whose accessors return
//! sentinels (`-1`, `[0, 0]`, `"unknown"`, `false`, `None`) when a reading
//! is unavailable instead of failing.
//!
//! - [`StaticEnvironment`]: a fixed snapshot (tests, config files, values
//!   relayed from a real browser)
//! - [`SystemEnvironment`]: best-effort readings of the host process

use serde::{Deserialize, Serialize};

/// Sentinel for unknown string readings.
pub const UNKNOWN: &str = "unknown";

/// Network connection characteristics, as a browser's `navigator.connection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// `slow-2g`, `2g`, `3g` or `4g`
    pub effective_type: String,
    pub downlink_mbps: f64,
    pub rtt_ms: u32,
    #[serde(default)]
    pub save_data: bool,
}

/// Counts of enumerable media devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDeviceCounts {
    pub audio_inputs: u32,
    pub audio_outputs: u32,
    pub video_inputs: u32,
}

/// Synchronous accessors for ambient device readings.
pub trait Environment: Send + Sync {
    /// Raw user-agent string.
    fn user_agent(&self) -> String;

    fn color_depth(&self) -> i32 {
        -1
    }

    fn pixel_depth(&self) -> i32 {
        -1
    }

    /// Screen resolution `[width, height]`.
    fn resolution(&self) -> [u32; 2] {
        [0, 0]
    }

    fn cpu_cores(&self) -> i32 {
        -1
    }

    fn language(&self) -> String {
        UNKNOWN.to_string()
    }

    fn is_touch_screen(&self) -> bool {
        false
    }

    /// IANA timezone name, e.g. `Europe/Helsinki`.
    fn timezone(&self) -> Option<String> {
        None
    }

    /// Offset from UTC in minutes.
    fn timezone_offset_minutes(&self) -> Option<i32> {
        None
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        None
    }

    fn media_devices(&self) -> Option<MediaDeviceCounts> {
        None
    }

    /// Storage quota granted to the origin, in bytes.
    fn storage_quota_bytes(&self) -> Option<u64> {
        None
    }
}

/// A fixed snapshot of environment readings.
///
/// Every field defaults to its sentinel, so partial snapshots (e.g. from a
/// `[environment]` table in the settings file) are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticEnvironment {
    pub user_agent: String,
    pub color_depth: i32,
    pub pixel_depth: i32,
    pub resolution: [u32; 2],
    pub cpu_cores: i32,
    pub language: String,
    pub max_touch_points: u32,
    pub timezone: Option<String>,
    pub timezone_offset_minutes: Option<i32>,
    pub connection: Option<ConnectionInfo>,
    pub media_devices: Option<MediaDeviceCounts>,
    pub storage_quota_bytes: Option<u64>,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            color_depth: -1,
            pixel_depth: -1,
            resolution: [0, 0],
            cpu_cores: -1,
            language: UNKNOWN.to_string(),
            max_touch_points: 0,
            timezone: None,
            timezone_offset_minutes: None,
            connection: None,
            media_devices: None,
            storage_quota_bytes: None,
        }
    }
}

impl StaticEnvironment {
    /// Snapshot with only a user-agent string; everything else is a sentinel.
    #[must_use]
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn screen(mut self, resolution: [u32; 2], color_depth: i32, pixel_depth: i32) -> Self {
        self.resolution = resolution;
        self.color_depth = color_depth;
        self.pixel_depth = pixel_depth;
        self
    }

    #[must_use]
    pub fn touch_points(mut self, points: u32) -> Self {
        self.max_touch_points = points;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_cpu_cores(mut self, cores: i32) -> Self {
        self.cpu_cores = cores;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, name: impl Into<String>, offset_minutes: i32) -> Self {
        self.timezone = Some(name.into());
        self.timezone_offset_minutes = Some(offset_minutes);
        self
    }
}

impl Environment for StaticEnvironment {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn color_depth(&self) -> i32 {
        self.color_depth
    }

    fn pixel_depth(&self) -> i32 {
        self.pixel_depth
    }

    fn resolution(&self) -> [u32; 2] {
        self.resolution
    }

    fn cpu_cores(&self) -> i32 {
        self.cpu_cores
    }

    fn language(&self) -> String {
        self.language.clone()
    }

    fn is_touch_screen(&self) -> bool {
        self.max_touch_points > 0
    }

    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }

    fn timezone_offset_minutes(&self) -> Option<i32> {
        self.timezone_offset_minutes
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        self.connection.clone()
    }

    fn media_devices(&self) -> Option<MediaDeviceCounts> {
        self.media_devices
    }

    fn storage_quota_bytes(&self) -> Option<u64> {
        self.storage_quota_bytes
    }
}

/// Readings of the host process.
///
/// There is no screen or touch hardware to query from a plain process, so
/// those readings stay at their sentinels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn user_agent(&self) -> String {
        format!(
            "visitorid/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }

    fn cpu_cores(&self) -> i32 {
        std::thread::available_parallelism()
            .ok()
            .and_then(|n| i32::try_from(n.get()).ok())
            .unwrap_or(-1)
    }

    fn language(&self) -> String {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find_map(|value| locale_to_language(&value))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn timezone(&self) -> Option<String> {
        std::env::var("TZ")
            .ok()
            .map(|tz| tz.trim_start_matches(':').to_string())
            .filter(|tz| !tz.is_empty())
    }
}

/// `en_US.UTF-8` → `en-US`. `C`/`POSIX` locales carry no language.
fn locale_to_language(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next().unwrap_or_default();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
