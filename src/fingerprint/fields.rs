//! Which profile fields feed the `basic` signal.
//!
//! Fields are always visited in [`ProfileField::ALL`] order, never in
//! configuration order, so the same template and profile always produce
//! the same payload.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::agent::DeviceProfile;
use crate::env::UNKNOWN;
use crate::error::Error;

/// Joins field values in a payload, and component hashes in the combine step.
pub const SEPARATOR: &str = ":";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Version,
    Language,
    Platform,
    Os,
    PixelDepth,
    ColorDepth,
    Resolution,
    IsAuthoritative,
    SilkAccelerated,
    IsKindleFire,
    IsDesktop,
    IsMobile,
    IsTablet,
    IsWindows,
    IsLinux,
    IsLinux64,
    IsChromeOs,
    IsMac,
    IsIpad,
    IsIphone,
    IsIpod,
    IsAndroid,
    IsSamsung,
    IsSmartTv,
    IsRaspberry,
    IsBlackberry,
    IsTouchScreen,
    IsOpera,
    IsIe,
    IsEdge,
    IsIeCompatibilityMode,
    IsSafari,
    IsFirefox,
    IsWebkit,
    IsChrome,
    IsKonqueror,
    IsOmniWeb,
    IsSeaMonkey,
    IsFlock,
    IsAmaya,
    IsPhantomJs,
    IsEpiphany,
    Browser,
    Source,
    CpuCores,
}

const FIELD_COUNT: usize = 45;

/// Template key and default inclusion, indexed by discriminant.
const TEMPLATE: [(&str, bool); FIELD_COUNT] = [
    ("version", false),
    ("language", false),
    ("platform", true),
    ("os", true),
    ("pixelDepth", true),
    ("colorDepth", true),
    ("resolution", false),
    ("isAuthoritative", true),
    ("silkAccelerated", true),
    ("isKindleFire", true),
    ("isDesktop", true),
    ("isMobile", true),
    ("isTablet", true),
    ("isWindows", true),
    ("isLinux", true),
    ("isLinux64", true),
    ("isChromeOS", true),
    ("isMac", true),
    ("isiPad", true),
    ("isiPhone", true),
    ("isiPod", true),
    ("isAndroid", true),
    ("isSamsung", true),
    ("isSmartTV", true),
    ("isRaspberry", true),
    ("isBlackberry", true),
    ("isTouchScreen", true),
    ("isOpera", false),
    ("isIE", false),
    ("isEdge", false),
    ("isIECompatibilityMode", false),
    ("isSafari", false),
    ("isFirefox", false),
    ("isWebkit", false),
    ("isChrome", false),
    ("isKonqueror", false),
    ("isOmniWeb", false),
    ("isSeaMonkey", false),
    ("isFlock", false),
    ("isAmaya", false),
    ("isPhantomJS", false),
    ("isEpiphany", false),
    ("browser", false),
    ("source", false),
    ("cpuCores", false),
];

impl ProfileField {
    pub const ALL: [ProfileField; FIELD_COUNT] = [
        ProfileField::Version,
        ProfileField::Language,
        ProfileField::Platform,
        ProfileField::Os,
        ProfileField::PixelDepth,
        ProfileField::ColorDepth,
        ProfileField::Resolution,
        ProfileField::IsAuthoritative,
        ProfileField::SilkAccelerated,
        ProfileField::IsKindleFire,
        ProfileField::IsDesktop,
        ProfileField::IsMobile,
        ProfileField::IsTablet,
        ProfileField::IsWindows,
        ProfileField::IsLinux,
        ProfileField::IsLinux64,
        ProfileField::IsChromeOs,
        ProfileField::IsMac,
        ProfileField::IsIpad,
        ProfileField::IsIphone,
        ProfileField::IsIpod,
        ProfileField::IsAndroid,
        ProfileField::IsSamsung,
        ProfileField::IsSmartTv,
        ProfileField::IsRaspberry,
        ProfileField::IsBlackberry,
        ProfileField::IsTouchScreen,
        ProfileField::IsOpera,
        ProfileField::IsIe,
        ProfileField::IsEdge,
        ProfileField::IsIeCompatibilityMode,
        ProfileField::IsSafari,
        ProfileField::IsFirefox,
        ProfileField::IsWebkit,
        ProfileField::IsChrome,
        ProfileField::IsKonqueror,
        ProfileField::IsOmniWeb,
        ProfileField::IsSeaMonkey,
        ProfileField::IsFlock,
        ProfileField::IsAmaya,
        ProfileField::IsPhantomJs,
        ProfileField::IsEpiphany,
        ProfileField::Browser,
        ProfileField::Source,
        ProfileField::CpuCores,
    ];

    /// Template key, e.g. `isiPad`.
    pub fn name(self) -> &'static str {
        TEMPLATE[self as usize].0
    }

    fn included_by_default(self) -> bool {
        TEMPLATE[self as usize].1
    }

    /// Stringified value of this field in `profile`.
    pub fn value(self, p: &DeviceProfile) -> String {
        let flag = |b: bool| b.to_string();
        match self {
            ProfileField::Version => p.browser_version.clone(),
            ProfileField::Language => p.language.clone(),
            ProfileField::Platform => p.platform_name.clone(),
            ProfileField::Os => p.os_name.clone(),
            ProfileField::PixelDepth => p.pixel_depth.to_string(),
            ProfileField::ColorDepth => p.color_depth.to_string(),
            ProfileField::Resolution => format!("{},{}", p.resolution[0], p.resolution[1]),
            ProfileField::IsAuthoritative => flag(p.is_authoritative),
            ProfileField::SilkAccelerated => flag(p.is_silk_accelerated),
            ProfileField::IsKindleFire => flag(p.is_kindle_fire),
            ProfileField::IsDesktop => flag(p.is_desktop),
            ProfileField::IsMobile => flag(p.is_mobile),
            ProfileField::IsTablet => flag(p.is_tablet),
            ProfileField::IsWindows => flag(p.is_windows),
            ProfileField::IsLinux => flag(p.is_linux),
            ProfileField::IsLinux64 => flag(p.is_linux64),
            ProfileField::IsChromeOs => flag(p.is_chrome_os),
            ProfileField::IsMac => flag(p.is_mac),
            ProfileField::IsIpad => flag(p.is_ipad),
            ProfileField::IsIphone => flag(p.is_iphone),
            ProfileField::IsIpod => flag(p.is_ipod),
            ProfileField::IsAndroid => flag(p.is_android),
            ProfileField::IsSamsung => flag(p.is_samsung),
            ProfileField::IsSmartTv => p.is_smart_tv.to_string(),
            ProfileField::IsRaspberry => flag(p.is_raspberry),
            ProfileField::IsBlackberry => flag(p.is_blackberry),
            ProfileField::IsTouchScreen => flag(p.is_touch_screen),
            ProfileField::IsOpera => flag(p.is_opera),
            ProfileField::IsIe => flag(p.is_ie),
            ProfileField::IsEdge => flag(p.is_edge),
            ProfileField::IsIeCompatibilityMode => flag(p.is_ie_compatibility_mode),
            ProfileField::IsSafari => flag(p.is_safari),
            ProfileField::IsFirefox => flag(p.is_firefox),
            ProfileField::IsWebkit => flag(p.is_webkit),
            ProfileField::IsChrome => flag(p.is_chrome),
            ProfileField::IsKonqueror => flag(p.is_konqueror),
            ProfileField::IsOmniWeb => flag(p.is_omniweb),
            ProfileField::IsSeaMonkey => flag(p.is_seamonkey),
            ProfileField::IsFlock => flag(p.is_flock),
            ProfileField::IsAmaya => flag(p.is_amaya),
            ProfileField::IsPhantomJs => flag(p.is_phantomjs),
            ProfileField::IsEpiphany => flag(p.is_epiphany),
            ProfileField::Browser => p.browser_name.clone(),
            ProfileField::Source => p.source.clone(),
            ProfileField::CpuCores => p.cpu_cores.to_string(),
        }
    }
}

/// `true` for values that stand for "no reading".
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN || value == "-1" || value == "0,0"
}

impl FromStr for ProfileField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Inclusion template for the `basic` payload.
///
/// Deserializes from a table of `fieldName = bool`; absent fields keep their
/// default and unknown names are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    included: [bool; FIELD_COUNT],
}

impl Default for ProfileFields {
    fn default() -> Self {
        Self {
            included: ProfileField::ALL.map(ProfileField::included_by_default),
        }
    }
}

impl ProfileFields {
    /// Template with every field included.
    pub fn all() -> Self {
        Self {
            included: [true; FIELD_COUNT],
        }
    }

    pub fn includes(&self, field: ProfileField) -> bool {
        self.included[field as usize]
    }

    #[must_use]
    pub fn with(mut self, field: ProfileField, included: bool) -> Self {
        self.included[field as usize] = included;
        self
    }

    /// Included fields in fixed order.
    pub fn included(&self) -> impl Iterator<Item = ProfileField> + '_ {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.includes(*field))
    }

    /// Payload digested into the `basic` signal.
    ///
    /// Included field values in order, then `custom_data` if non-empty, then
    /// the resolution for mobile devices when the template left it out.
    pub fn payload(&self, profile: &DeviceProfile, custom_data: Option<&str>) -> String {
        let mut parts: Vec<String> = self.included().map(|field| field.value(profile)).collect();

        if let Some(custom) = custom_data.filter(|custom| !custom.is_empty()) {
            parts.push(custom.to_string());
        }
        if profile.is_mobile && !self.includes(ProfileField::Resolution) {
            parts.push(ProfileField::Resolution.value(profile));
        }

        parts.join(SEPARATOR)
    }
}

impl<'de> Deserialize<'de> for ProfileFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut fields = ProfileFields::default();
        for (name, included) in table {
            match name.parse::<ProfileField>() {
                Ok(field) => fields.included[field as usize] = included,
                Err(_) => tracing::debug!("ignoring unknown profile field: {name}"),
            }
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_table_matches_enum() {
        for (index, field) in ProfileField::ALL.into_iter().enumerate() {
            assert_eq!(field as usize, index, "{field:?}");
            assert_eq!(field.name().parse::<ProfileField>().unwrap(), field);
        }
    }

    #[test]
    fn test_default_template() {
        let fields = ProfileFields::default();
        assert_eq!(fields.included().count(), 24);
        assert!(fields.includes(ProfileField::Platform));
        assert!(fields.includes(ProfileField::IsTouchScreen));
        assert!(!fields.includes(ProfileField::Version));
        assert!(!fields.includes(ProfileField::Resolution));
        assert!(!fields.includes(ProfileField::Source));
        assert_eq!(fields.included().next(), Some(ProfileField::Platform));
    }

    #[test]
    fn test_payload_for_unknown_agent() {
        let profile = DeviceProfile::parse("");
        let payload = ProfileFields::default().payload(&profile, None);

        assert!(payload.starts_with("unknown:unknown:-1:-1:true:false:false:false"));
        assert_eq!(payload.split(SEPARATOR).count(), 24);
    }

    #[test]
    fn test_payload_appends_custom_then_mobile_resolution() {
        let mut profile = DeviceProfile::parse(IPHONE);
        profile.resolution = [390, 844];
        assert!(profile.is_mobile);

        let fields = ProfileFields::default();
        let payload = fields.payload(&profile, Some("tenant-7"));
        assert!(payload.ends_with(":tenant-7:390,844"));

        let with_resolution = fields.clone().with(ProfileField::Resolution, true);
        let payload = with_resolution.payload(&profile, Some(""));
        assert!(!payload.ends_with("390,844:390,844"));
        assert_eq!(payload.matches("390,844").count(), 1);
    }

    #[test]
    fn test_smart_tv_token_is_verbatim() {
        let profile = DeviceProfile::parse(
            "Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0) AppleWebKit/537.36 \
             (KHTML, like Gecko) Version/6.0 TV Safari/537.36",
        );
        assert_eq!(ProfileField::IsSmartTv.value(&profile), "smart-tv");
        assert_eq!(
            ProfileField::IsSmartTv.value(&DeviceProfile::parse("")),
            "false"
        );
    }

    #[test]
    fn test_deserialize_overrides_defaults() {
        let fields: ProfileFields = toml::from_str(
            r#"
version = true
isMac = false
isiPad = false
noSuchField = true
"#,
        )
        .unwrap();

        assert!(fields.includes(ProfileField::Version));
        assert!(!fields.includes(ProfileField::IsMac));
        assert!(!fields.includes(ProfileField::IsIpad));
        assert!(fields.includes(ProfileField::Os));
    }

    #[test]
    fn test_sentinels() {
        for value in ["", "unknown", "-1", "0,0"] {
            assert!(is_sentinel(value), "{value}");
        }
        for value in ["false", "24", "1920,1080", "Chrome"] {
            assert!(!is_sentinel(value), "{value}");
        }
    }
}
