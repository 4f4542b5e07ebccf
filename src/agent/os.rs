//! Operating system rules.
//!
//! Ordering constraints:
//! - Windows Phone before everything: its strings also mention Android,
//!   iPhone and Mac OS X
//! - Windows NT tokens from newest to oldest, then a generic NT fallback
//! - iPad, iPod, iPhone, then Mac: all of them contain "Mac OS X", and
//!   iPod strings also say "iPhone OS"
//! - Android before Linux (Android strings contain "Linux")
//! - Linux 64 before Linux
//! - macOS codenames from oldest to newest, then the generic "OS X"

use std::sync::LazyLock;

use super::rules::{first_match, Rule};
use crate::env::UNKNOWN;

/// OS family, decides which profile flags the match sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OsFamily {
    WindowsPhone,
    Windows,
    Ipad,
    Iphone,
    Ipod,
    Android,
    Bada,
    Blackberry,
    ChromeOs,
    Linux64,
    Linux,
    Console,
    Mac,
    Curl,
    Electron,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OsMatch {
    pub name: String,
    pub family: OsFamily,
}

impl OsMatch {
    fn new(name: impl Into<String>, family: OsFamily) -> Self {
        Self {
            name: name.into(),
            family,
        }
    }
}

static OS_RULES: LazyLock<Vec<Rule<OsMatch>>> = LazyLock::new(|| {
    use OsFamily::{
        Android, Bada, Blackberry, ChromeOs, Console, Curl, Electron, Ipad, Iphone, Ipod, Linux,
        Linux64, Mac, Windows, WindowsPhone,
    };

    vec![
        Rule::new(r"(?i)windows phone(?: os)? (\d+\.\d+)", |c| {
            OsMatch::new(format!("Windows Phone {}", &c[1]), WindowsPhone)
        }),
        Rule::new(r"(?i)windows phone", |_| OsMatch::new("Windows Phone", WindowsPhone)),
        // Windows NT, newest token first
        Rule::new(r"(?i)windows nt 10\.0", |_| OsMatch::new("Windows 10.0", Windows)),
        Rule::new(r"(?i)windows nt 6\.3", |_| OsMatch::new("Windows 8.1", Windows)),
        Rule::new(r"(?i)windows nt 6\.2", |_| OsMatch::new("Windows 8", Windows)),
        Rule::new(r"(?i)windows nt 6\.1", |_| OsMatch::new("Windows 7", Windows)),
        Rule::new(r"(?i)windows nt 6\.0", |_| OsMatch::new("Windows Vista", Windows)),
        Rule::new(r"(?i)windows nt 5\.2", |_| OsMatch::new("Windows 2003", Windows)),
        Rule::new(r"(?i)windows nt 5\.1", |_| OsMatch::new("Windows XP", Windows)),
        Rule::new(r"(?i)windows nt 5\.0", |_| OsMatch::new("Windows 2000", Windows)),
        Rule::new(r"(?i)windows nt (\d+\.\d+)", |c| {
            OsMatch::new(format!("Windows {}", &c[1]), Windows)
        }),
        // iOS devices, before Mac
        Rule::new(r"(?i)\(ipad.*os (\d+)[._](\d+)", |c| {
            OsMatch::new(format!("iPadOS {}.{}", &c[1], &c[2]), Ipad)
        }),
        Rule::new(r"(?i)\bipad\b", |_| OsMatch::new("iPadOS", Ipad)),
        Rule::new(r"(?i)\(ipod.*os (\d+)[._](\d+)", |c| {
            OsMatch::new(format!("iOS {}.{}", &c[1], &c[2]), Ipod)
        }),
        Rule::new(r"(?i)\bipod\b", |_| OsMatch::new("iOS", Ipod)),
        Rule::new(r"(?i)\(iphone.*os (\d+)[._](\d+)", |c| {
            OsMatch::new(format!("iOS {}.{}", &c[1], &c[2]), Iphone)
        }),
        Rule::new(r"(?i)\biphone\b", |_| OsMatch::new("iOS", Iphone)),
        // Mobile Linux derivatives, before Linux
        Rule::new(r"(?i)android[\s/]?(\d+(?:\.\d+)*)", |c| {
            OsMatch::new(format!("Android {}", &c[1]), Android)
        }),
        Rule::new(r"(?i)android", |_| OsMatch::new("Android", Android)),
        Rule::new(r"(?i)bada/(\d+)\.(\d+)", |c| {
            OsMatch::new(format!("Bada {}.{}", &c[1], &c[2]), Bada)
        }),
        Rule::new(r"(?i)blackberry|\bbb10\b|rim tablet os", |_| {
            OsMatch::new("BlackBerry", Blackberry)
        }),
        Rule::new(r"(?i)\bcros\b", |_| OsMatch::new("Chrome OS", ChromeOs)),
        Rule::new(r"(?i)linux x86_64", |_| OsMatch::new("Linux 64", Linux64)),
        Rule::new(r"(?i)linux", |_| OsMatch::new("Linux", Linux)),
        Rule::new(r"(?i)wii", |_| OsMatch::new("Wii", Console)),
        Rule::new(r"(?i)playstation 3", |_| OsMatch::new("Playstation", Console)),
        Rule::new(r"(?i)playstation portable", |_| OsMatch::new("Playstation", Console)),
        // macOS codenames, oldest first
        Rule::new(r"(?i)os x 10[._]0", |_| OsMatch::new("OS X Cheetah", Mac)),
        Rule::new(r"(?i)os x 10[._]1(?:\D|$)", |_| OsMatch::new("OS X Puma", Mac)),
        Rule::new(r"(?i)os x 10[._]2", |_| OsMatch::new("OS X Jaguar", Mac)),
        Rule::new(r"(?i)os x 10[._]3", |_| OsMatch::new("OS X Panther", Mac)),
        Rule::new(r"(?i)os x 10[._]4", |_| OsMatch::new("OS X Tiger", Mac)),
        Rule::new(r"(?i)os x 10[._]5", |_| OsMatch::new("OS X Leopard", Mac)),
        Rule::new(r"(?i)os x 10[._]6", |_| OsMatch::new("OS X Snow Leopard", Mac)),
        Rule::new(r"(?i)os x 10[._]7", |_| OsMatch::new("OS X Lion", Mac)),
        Rule::new(r"(?i)os x 10[._]8", |_| OsMatch::new("OS X Mountain Lion", Mac)),
        Rule::new(r"(?i)os x 10[._]9", |_| OsMatch::new("OS X Mavericks", Mac)),
        Rule::new(r"(?i)os x 10[._]10", |_| OsMatch::new("OS X Yosemite", Mac)),
        Rule::new(r"(?i)os x 10[._]11", |_| OsMatch::new("OS X El Capitan", Mac)),
        Rule::new(r"(?i)os x 10[._]12", |_| OsMatch::new("macOS Sierra", Mac)),
        Rule::new(r"(?i)os x 10[._]13", |_| OsMatch::new("macOS High Sierra", Mac)),
        Rule::new(r"(?i)os x 10[._]14", |_| OsMatch::new("macOS Mojave", Mac)),
        Rule::new(r"(?i)os x 10[._]15", |_| OsMatch::new("macOS Catalina", Mac)),
        Rule::new(r"(?i)os x (1[1-9]|[2-9]\d)[._](\d+)", |c| {
            OsMatch::new(format!("macOS {}.{}", &c[1], &c[2]), Mac)
        }),
        Rule::new(r"(?i)os x|macintosh", |_| OsMatch::new("OS X", Mac)),
        Rule::new(r"(?i)curl/(\d+)\.(\d+)\.(\d+)", |c| {
            OsMatch::new(format!("curl {}.{}.{}", &c[1], &c[2], &c[3]), Curl)
        }),
        Rule::new(r"(?i)electron/(\d+)\.(\d+)\.(\d+)", |c| {
            OsMatch::new(format!("Electron {}.{}.{}", &c[1], &c[2], &c[3]), Electron)
        }),
    ]
});

/// Identify the operating system, `None` when no rule matches.
pub(crate) fn identify(source: &str) -> Option<OsMatch> {
    first_match(&OS_RULES, source)
}

/// OS name for reporting.
pub(crate) fn name(found: Option<&OsMatch>) -> String {
    found.map_or_else(|| UNKNOWN.to_string(), |m| m.name.clone())
}
