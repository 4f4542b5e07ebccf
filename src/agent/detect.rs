//! Derived tests, run after the rule tables in the order listed in the
//! module docs. Each test reads flags set by earlier steps.

use std::sync::LazyLock;

use regex::Regex;

use super::{DeviceProfile, Detection};
use crate::env::Environment;

/// Known crawler and tool tokens, lowercase. Specific tokens come before
/// the generic ones they contain so the more precise token is reported.
const BOT_TOKENS: &[&str] = &[
    r"\+https://developers\.google\.com/\+/web/snippet/",
    r"ad\smonitoring",
    "adsbot",
    "ahrefsbot",
    "apex",
    "applebot",
    r"archive\.org_bot",
    "baiduspider",
    "bingbot",
    "chromeheadless",
    "headlesschrome",
    "cloudflare",
    "cloudinary",
    "gsa-crawler",
    "crawler",
    "curl",
    "discordbot",
    "dotbot",
    "duckduckbot",
    "embedly",
    "exabot",
    "facebookexternalhit",
    "facebot",
    "flipboard",
    "googlebot",
    "google-",
    "googleother",
    "gurujibot",
    "guzzlehttp",
    "heritrix",
    "ia_archiver",
    "insights",
    "linkedinbot",
    "ltx71",
    "mediapartners",
    "mj12bot",
    "msnbot",
    "odklbot",
    "orangebot",
    "petalbot",
    r"phantom\.js",
    "phantomjs",
    "pingdom",
    "pinterest",
    "python",
    "qwantify",
    "rtlnieuws",
    "semrushbot",
    "skypeuripreview",
    "slackbot",
    "slurp",
    "smtbot",
    "spbot",
    "telegrambot",
    r"test\scertificate",
    "testing",
    "tiabot",
    "tumblr ",
    "twitterbot",
    "vkshare",
    r"web\sscraper",
    "wget",
    "whatsapp",
    "yahoo",
    "yandexbot",
];

static BOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("({})", BOT_TOKENS.join("|"))).unwrap());

static SMART_TV_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"smart-tv|smarttv|googletv|appletv|hbbtv|pov_tv|netcast\.tv").unwrap()
});

static TRIDENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"trident/(\d)\.0").unwrap());

static WEBKIT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)applewebkit/([\d.]+)").unwrap());

/// Amazon device codes and the models they denote.
const KINDLE_FIRE_MODELS: &[(&str, &str)] = &[
    ("kfot", "Kindle Fire"),
    ("kftt", "Kindle Fire HD"),
    ("kfjwi", "Kindle Fire HD 8.9"),
    ("kfjwa", "Kindle Fire HD 8.9 4G"),
    ("kfsowi", "Kindle Fire HD 7"),
    ("kfthwi", "Kindle Fire HDX 7"),
    ("kfthwa", "Kindle Fire HDX 7 4G"),
    ("kfapwi", "Kindle Fire HDX 8.9"),
    ("kfapwa", "Kindle Fire HDX 8.9 4G"),
    ("kfarwi", "Fire HD 6"),
    ("kfaswi", "Fire HD 7"),
];

/// Device-code table, longest code first.
static KINDLE_FIRE_BY_LENGTH: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut models = KINDLE_FIRE_MODELS.to_vec();
    models.sort_by_key(|(code, _)| std::cmp::Reverse(code.len()));
    models
});

pub(super) fn bot(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    profile.is_bot = match BOT_PATTERN.captures(lower) {
        Some(caps) => Detection::Token(caps[1].to_string()),
        None if !profile.is_authoritative => Detection::from(lower.contains("bot")),
        None => Detection::Absent,
    };
    profile
}

pub(super) fn smart_tv(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    if let Some(token) = SMART_TV_PATTERN.find(lower) {
        profile.is_smart_tv = Detection::Token(token.as_str().to_string());
    }
    profile
}

pub(super) fn mobile_or_desktop(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    let tv = profile.is_smart_tv.is_present();

    profile.is_desktop = !tv
        && (profile.is_windows || profile.is_linux || profile.is_mac || profile.is_chrome_os);

    let mobile_device = profile.is_android
        || profile.is_samsung
        || profile.is_iphone
        || profile.is_ipod
        || profile.is_bada
        || profile.is_blackberry
        || profile.is_windows_phone;
    let mobile_token = lower.contains("mobile") || lower.starts_with("ios-");

    if !tv && !profile.is_ipad && (mobile_device || mobile_token) {
        profile.is_mobile = true;
        profile.is_desktop = false;
    }
    profile
}

/// Android without a "mobile" token is a tablet.
pub(super) fn android_tablet(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    if profile.is_android && !lower.contains("mobile") {
        profile.is_android_tablet = true;
        profile.is_mobile = false;
    }
    profile
}

pub(super) fn tablet(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    let tablet = profile.is_ipad
        || profile.is_android_tablet
        || profile.is_kindle_fire
        || lower.contains("tablet");

    if tablet && !profile.is_smart_tv.is_present() {
        profile.is_tablet = true;
        profile.is_mobile = false;
        profile.is_desktop = false;
    }
    profile
}

/// IE in compatibility view reports MSIE 7; the Trident token gives the
/// real version.
pub(super) fn ie_compatibility(mut profile: DeviceProfile) -> DeviceProfile {
    if !profile.is_ie {
        return profile;
    }

    let lower = profile.source.to_lowercase();
    let Some(trident) = TRIDENT_PATTERN
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    else {
        return profile;
    };

    if leading_integer(&profile.browser_version) != Some(7) {
        return profile;
    }

    let actual = match trident {
        7 => "11.0",
        6 => "10.0",
        5 => "9.0",
        4 => "8.0",
        _ => return profile,
    };
    profile.is_ie_compatibility_mode = true;
    profile.browser_version = actual.to_string();
    profile
}

pub(super) fn silk_and_kindle(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    if lower.contains("silk") {
        profile.is_silk = true;
    }
    if lower.contains("silk-accelerated=true") {
        profile.is_silk_accelerated = true;
    }
    if let Some(model) = kindle_fire_model(lower) {
        profile.is_kindle_fire = true;
        profile.kindle_fire_model = Some(model.to_string());
    }
    profile
}

/// Longest device code contained in `lower`.
fn kindle_fire_model(lower: &str) -> Option<&'static str> {
    KINDLE_FIRE_BY_LENGTH
        .iter()
        .find(|(code, _)| lower.contains(*code))
        .map(|(_, model)| *model)
}

/// Apple's captive portal assistant always runs on Apple hardware.
pub(super) fn captive_network(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    if lower.contains("captivenetwork") {
        profile.is_captive = true;
        profile.is_mac = true;
        profile.platform_name = super::Platform::Mac.name().to_string();
    }
    profile
}

pub(super) fn touch_screen(mut profile: DeviceProfile, env: &dyn Environment) -> DeviceProfile {
    profile.is_touch_screen = env.is_touch_screen();
    profile
}

/// WebKit, Electron and Raspberry Pi markers. An otherwise unknown WebKit
/// browser is reported as "Apple WebKit".
pub(super) fn engine_markers(mut profile: DeviceProfile, lower: &str) -> DeviceProfile {
    profile.is_webkit = lower.contains("applewebkit");
    if profile.is_webkit && profile.browser_name == crate::env::UNKNOWN {
        profile.browser_name = "Apple WebKit".to_string();
        if let Some(caps) = WEBKIT_VERSION.captures(&profile.source) {
            profile.browser_version = caps[1].to_string();
        }
    }
    if lower.contains("electron") {
        profile.is_electron = true;
    }
    if lower.contains("raspbian") || lower.contains("raspberry") {
        profile.is_raspberry = true;
    }
    profile
}

/// Enforce a single form factor: Smart TV > tablet > mobile > desktop.
///
/// Runs last because the Kindle Fire model is only known after the tablet
/// step.
pub(super) fn settle_form_factor(mut profile: DeviceProfile) -> DeviceProfile {
    if profile.is_smart_tv.is_present() {
        profile.is_mobile = false;
        profile.is_tablet = false;
        profile.is_desktop = false;
        return profile;
    }
    if profile.is_kindle_fire {
        profile.is_tablet = true;
    }
    if profile.is_tablet {
        profile.is_mobile = false;
        profile.is_desktop = false;
    } else if profile.is_mobile {
        profile.is_desktop = false;
    }
    profile
}

/// `parseInt`-style leading integer: `"7.0b"` → 7.
fn leading_integer(value: &str) -> Option<u32> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
