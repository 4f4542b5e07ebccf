//! Platform rules.
//!
//! Independent of the OS step: a platform match can set device flags
//! (e.g. `isiPad`) that the OS rules did not.

use std::sync::LazyLock;

use super::rules::{first_match, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Platform {
    WindowsPhone,
    Windows,
    Mac,
    Curl,
    Electron,
    Ipad,
    Ipod,
    Iphone,
    Android,
    Blackberry,
    Linux,
    Wii,
    Playstation,
    Samsung,
}

impl Platform {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Platform::WindowsPhone => "Microsoft Windows Phone",
            Platform::Windows => "Microsoft Windows",
            Platform::Mac => "Apple Mac",
            Platform::Curl => "Curl",
            Platform::Electron => "Electron",
            Platform::Ipad => "iPad",
            Platform::Ipod => "iPod",
            Platform::Iphone => "iPhone",
            Platform::Android => "Android",
            Platform::Blackberry => "Blackberry",
            Platform::Linux => "Linux",
            Platform::Wii => "Wii",
            Platform::Playstation => "Playstation",
            Platform::Samsung => "Samsung",
        }
    }
}

static PLATFORM_RULES: LazyLock<Vec<Rule<Platform>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?i)windows phone", |_| Platform::WindowsPhone),
        Rule::new(r"(?i)windows nt", |_| Platform::Windows),
        Rule::new(r"(?i)macintosh", |_| Platform::Mac),
        Rule::new(r"(?i)curl", |_| Platform::Curl),
        Rule::new(r"(?i)electron", |_| Platform::Electron),
        Rule::new(r"(?i)ipad", |_| Platform::Ipad),
        Rule::new(r"(?i)ipod", |_| Platform::Ipod),
        Rule::new(r"(?i)iphone", |_| Platform::Iphone),
        Rule::new(r"(?i)android", |_| Platform::Android),
        Rule::new(r"(?i)blackberry|\bbb10\b", |_| Platform::Blackberry),
        Rule::new(r"(?i)linux", |_| Platform::Linux),
        Rule::new(r"(?i)wii", |_| Platform::Wii),
        Rule::new(r"(?i)playstation", |_| Platform::Playstation),
        Rule::new(r"(?i)samsung", |_| Platform::Samsung),
    ]
});

pub(crate) fn identify(source: &str) -> Option<Platform> {
    first_match(&PLATFORM_RULES, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platforms() {
        let cases = [
            ("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", Platform::Windows),
            ("Mozilla/5.0 (Windows Phone 10.0; Android 6.0.1)", Platform::WindowsPhone),
            ("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)", Platform::Mac),
            ("Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X)", Platform::Ipad),
            ("Mozilla/5.0 (iPod touch; CPU iPhone OS 12_5 like Mac OS X)", Platform::Ipod),
            ("Mozilla/5.0 (Linux; Android 14; Pixel 8)", Platform::Android),
            ("Mozilla/5.0 (X11; Linux x86_64)", Platform::Linux),
            ("Mozilla/5.0 (PLAYSTATION 3; 1.00)", Platform::Playstation),
            ("SAMSUNG-GT-S8500/S8500XXJD2 SHP/VPP/R5 Dolfin/2.0", Platform::Samsung),
        ];
        for (ua, expected) in cases {
            assert_eq!(identify(ua), Some(expected), "{ua}");
        }
    }

    #[test]
    fn test_unknown_platform() {
        assert_eq!(identify("Googlebot/2.1"), None);
        assert_eq!(identify(""), None);
    }
}
