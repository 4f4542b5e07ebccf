//! User-Agent Classification
//!
//! Turns a raw user-agent string into a [`DeviceProfile`]: browser, OS,
//! platform and form-factor flags.
//!
//! # Pipeline
//!
//! 1. Browser identity, first matching named rule wins
//! 2. Browser version, with a name-specific pattern
//! 3. OS identity (iOS before Mac, Android before Linux)
//! 4. Platform, which may set device flags the OS step did not
//! 5. Derived tests in a fixed order: bot → Smart TV → mobile/desktop →
//!    Android tablet → tablet → IE compatibility → Silk/Kindle Fire →
//!    captive network → touch screen
//!
//! Each derived test takes the profile by value and hands back the updated
//! one, so every dependency between steps is visible at the call site.
//!
//! # Example
//!
//! ```rust
//! use visitorid::DeviceProfile;
//!
//! let profile = DeviceProfile::parse(
//!     "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 \
//!      (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
//! );
//! assert!(profile.is_ipad && profile.is_tablet);
//! assert!(!profile.is_mobile && !profile.is_mac);
//! ```

mod browser;
mod detect;
mod os;
mod platform;
mod rules;

#[cfg(test)]
mod tests;

use serde::{Serialize, Serializer};

pub use browser::Browser;

use crate::env::{Environment, StaticEnvironment, UNKNOWN};
use browser::BrowserMatch;
use os::{OsFamily, OsMatch};
use platform::Platform;

/// A flag that is either off, on, or on with the token that triggered it.
///
/// Bot and Smart TV detection report the matched substring (e.g.
/// `"googlebot"`) when a known token fired, and a plain `true` when only a
/// loose heuristic did. Serializes as `false`, `true` or the token string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Detection {
    #[default]
    Absent,
    Present,
    Token(String),
}

impl Detection {
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Detection::Absent)
    }

    /// Matched token, if the detection carried one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Detection::Token(token) => Some(token),
            _ => None,
        }
    }
}

impl From<bool> for Detection {
    fn from(value: bool) -> Self {
        if value {
            Detection::Present
        } else {
            Detection::Absent
        }
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detection::Absent => f.write_str("false"),
            Detection::Present => f.write_str("true"),
            Detection::Token(token) => f.write_str(token),
        }
    }
}

impl Serialize for Detection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Detection::Absent => serializer.serialize_bool(false),
            Detection::Present => serializer.serialize_bool(true),
            Detection::Token(token) => serializer.serialize_str(token),
        }
    }
}

impl PartialEq<&str> for Detection {
    fn eq(&self, other: &&str) -> bool {
        self.token() == Some(*other)
    }
}

/// Structured classification of a user-agent string.
///
/// Invariant: at most one of `is_mobile`, `is_tablet`, `is_desktop` and
/// `is_smart_tv` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub source: String,
    pub browser_name: String,
    pub browser_version: String,
    pub os_name: String,
    pub platform_name: String,
    pub is_authoritative: bool,

    // Form factor
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    #[serde(rename = "isSmartTV")]
    pub is_smart_tv: Detection,
    pub is_bot: Detection,

    // Browser identity
    pub is_chrome: bool,
    pub is_chromium: bool,
    pub is_firefox: bool,
    pub is_safari: bool,
    pub is_edge: bool,
    pub is_opera: bool,
    #[serde(rename = "isIE")]
    pub is_ie: bool,
    #[serde(rename = "isIECompatibilityMode")]
    pub is_ie_compatibility_mode: bool,
    pub is_konqueror: bool,
    #[serde(rename = "isOmniWeb")]
    pub is_omniweb: bool,
    #[serde(rename = "isSeaMonkey")]
    pub is_seamonkey: bool,
    pub is_flock: bool,
    pub is_amaya: bool,
    #[serde(rename = "isPhantomJS")]
    pub is_phantomjs: bool,
    pub is_epiphany: bool,
    pub is_win_js: bool,
    #[serde(rename = "isUC")]
    pub is_uc: bool,
    pub is_webkit: bool,
    pub is_silk: bool,
    pub is_silk_accelerated: bool,

    // OS identity
    pub is_windows: bool,
    pub is_windows_phone: bool,
    pub is_mac: bool,
    pub is_linux: bool,
    pub is_linux64: bool,
    #[serde(rename = "isChromeOS")]
    pub is_chrome_os: bool,
    pub is_android: bool,
    pub is_bada: bool,
    pub is_blackberry: bool,
    pub is_samsung: bool,
    pub is_raspberry: bool,
    pub is_curl: bool,
    pub is_electron: bool,
    pub is_captive: bool,

    // Devices
    #[serde(rename = "isiPad")]
    pub is_ipad: bool,
    #[serde(rename = "isiPhone")]
    pub is_iphone: bool,
    #[serde(rename = "isiPod")]
    pub is_ipod: bool,
    pub is_android_tablet: bool,
    pub is_kindle_fire: bool,
    pub kindle_fire_model: Option<String>,

    // Environment
    pub color_depth: i32,
    pub pixel_depth: i32,
    pub resolution: [u32; 2],
    pub cpu_cores: i32,
    pub language: String,
    pub is_touch_screen: bool,
}

impl DeviceProfile {
    /// All-false / unknown starting point for `source`.
    fn baseline(source: &str) -> Self {
        Self {
            source: source.to_string(),
            browser_name: UNKNOWN.to_string(),
            browser_version: UNKNOWN.to_string(),
            os_name: UNKNOWN.to_string(),
            platform_name: UNKNOWN.to_string(),
            is_authoritative: true,
            is_mobile: false,
            is_tablet: false,
            is_desktop: false,
            is_smart_tv: Detection::Absent,
            is_bot: Detection::Absent,
            is_chrome: false,
            is_chromium: false,
            is_firefox: false,
            is_safari: false,
            is_edge: false,
            is_opera: false,
            is_ie: false,
            is_ie_compatibility_mode: false,
            is_konqueror: false,
            is_omniweb: false,
            is_seamonkey: false,
            is_flock: false,
            is_amaya: false,
            is_phantomjs: false,
            is_epiphany: false,
            is_win_js: false,
            is_uc: false,
            is_webkit: false,
            is_silk: false,
            is_silk_accelerated: false,
            is_windows: false,
            is_windows_phone: false,
            is_mac: false,
            is_linux: false,
            is_linux64: false,
            is_chrome_os: false,
            is_android: false,
            is_bada: false,
            is_blackberry: false,
            is_samsung: false,
            is_raspberry: false,
            is_curl: false,
            is_electron: false,
            is_captive: false,
            is_ipad: false,
            is_iphone: false,
            is_ipod: false,
            is_android_tablet: false,
            is_kindle_fire: false,
            kindle_fire_model: None,
            color_depth: -1,
            pixel_depth: -1,
            resolution: [0, 0],
            cpu_cores: -1,
            language: UNKNOWN.to_string(),
            is_touch_screen: false,
        }
    }

    /// Classify `user_agent` with no ambient readings (all sentinels).
    #[must_use]
    pub fn parse(user_agent: &str) -> Self {
        classify(user_agent, &StaticEnvironment::default())
    }

    fn with_browser(mut self, identity: &BrowserMatch, version: String) -> Self {
        self.browser_name.clone_from(&identity.name);
        self.browser_version = version;
        self.is_authoritative = identity.authoritative;

        if let Some(browser) = identity.browser {
            match browser {
                Browser::Edge => self.is_edge = true,
                Browser::PhantomJs => self.is_phantomjs = true,
                Browser::Konqueror => self.is_konqueror = true,
                Browser::Amaya => self.is_amaya = true,
                Browser::Epiphany => self.is_epiphany = true,
                Browser::SeaMonkey => self.is_seamonkey = true,
                Browser::Flock => self.is_flock = true,
                Browser::OmniWeb => self.is_omniweb = true,
                Browser::Opera => self.is_opera = true,
                Browser::Chromium => {
                    self.is_chromium = true;
                    self.is_chrome = true;
                }
                Browser::Chrome => self.is_chrome = true,
                Browser::Safari => self.is_safari = true,
                Browser::WinJs => self.is_win_js = true,
                Browser::Ie => self.is_ie = true,
                Browser::Firefox => self.is_firefox = true,
                Browser::Uc => self.is_uc = true,
                Browser::Ps3 | Browser::Psp => {}
            }
        }
        self
    }

    fn with_os(mut self, found: Option<&OsMatch>) -> Self {
        self.os_name = os::name(found);

        if let Some(found) = found {
            match found.family {
                OsFamily::WindowsPhone => self.is_windows_phone = true,
                OsFamily::Windows => self.is_windows = true,
                OsFamily::Ipad => self.is_ipad = true,
                OsFamily::Iphone => self.is_iphone = true,
                OsFamily::Ipod => self.is_ipod = true,
                OsFamily::Android => self.is_android = true,
                OsFamily::Bada => self.is_bada = true,
                OsFamily::Blackberry => self.is_blackberry = true,
                OsFamily::ChromeOs => self.is_chrome_os = true,
                OsFamily::Linux64 => {
                    self.is_linux = true;
                    self.is_linux64 = true;
                }
                OsFamily::Linux => self.is_linux = true,
                OsFamily::Mac => self.is_mac = true,
                OsFamily::Curl => self.is_curl = true,
                OsFamily::Electron => self.is_electron = true,
                OsFamily::Console => {}
            }
        }
        self
    }

    fn with_platform(mut self, found: Option<Platform>) -> Self {
        let Some(found) = found else {
            return self;
        };

        self.platform_name = found.name().to_string();
        match found {
            Platform::WindowsPhone => self.is_windows_phone = true,
            Platform::Ipad => self.is_ipad = true,
            Platform::Ipod => self.is_ipod = true,
            Platform::Iphone => self.is_iphone = true,
            Platform::Android => self.is_android = true,
            Platform::Blackberry => self.is_blackberry = true,
            Platform::Samsung => self.is_samsung = true,
            Platform::Curl => self.is_curl = true,
            Platform::Electron => self.is_electron = true,
            Platform::Windows
            | Platform::Mac
            | Platform::Linux
            | Platform::Wii
            | Platform::Playstation => {}
        }
        self
    }

    fn with_environment(mut self, env: &dyn Environment) -> Self {
        self.color_depth = env.color_depth();
        self.pixel_depth = env.pixel_depth();
        self.resolution = env.resolution();
        self.cpu_cores = env.cpu_cores();
        self.language = env.language();
        self
    }

    /// Number of form-factor flags set. Always 0 or 1 for a classified profile.
    #[must_use]
    pub fn form_factor_count(&self) -> usize {
        [
            self.is_mobile,
            self.is_tablet,
            self.is_desktop,
            self.is_smart_tv.is_present(),
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Classify `user_agent`, reading ambient values from `env`.
///
/// Never fails: unrecognised input yields `"unknown"` names and unset flags.
pub fn classify(user_agent: &str, env: &dyn Environment) -> DeviceProfile {
    let source = user_agent.trim();
    let lower = source.to_lowercase();

    let identity = browser::identify(source);
    let version = browser::version(&identity, source);
    let os = os::identify(source);
    let platform = platform::identify(source);

    let profile = DeviceProfile::baseline(source)
        .with_browser(&identity, version)
        .with_os(os.as_ref())
        .with_platform(platform)
        .with_environment(env);

    let profile = detect::bot(profile, &lower);
    let profile = detect::smart_tv(profile, &lower);
    let profile = detect::mobile_or_desktop(profile, &lower);
    let profile = detect::android_tablet(profile, &lower);
    let profile = detect::tablet(profile, &lower);
    let profile = detect::ie_compatibility(profile);
    let profile = detect::silk_and_kindle(profile, &lower);
    let profile = detect::captive_network(profile, &lower);
    let profile = detect::touch_screen(profile, env);
    let profile = detect::engine_markers(profile, &lower);
    detect::settle_form_factor(profile)
}
