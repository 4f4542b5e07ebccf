//! Scenario tests for the classifier

use super::*;

const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1";
const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1";
const SAFARI_IPOD: &str = "Mozilla/5.0 (iPod touch; CPU iPhone OS 12_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.1.2 Mobile/15E148 Safari/604.1";
const SAFARI_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15";
const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
const PIXEL_WEBVIEW: &str = "Mozilla/5.0 (Linux; Android 10; Google Pixel 4 Build/QD1A.190821.014.C2; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/78.0.3904.108 Mobile Safari/537.36";
const OPERA_ANDROID: &str = "Mozilla/5.0 (Linux; Android 10; VOG-L29) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/90.0.4430.210 Mobile Safari/537.36 OPR/63.3.3216.58675";
const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const TIZEN_TV: &str = "Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0) AppleWebKit/538.1 (KHTML, like Gecko) Version/6.0 TV Safari/538.1";
const ANDROID_TV_MOBILE: &str = "Mozilla/5.0 (Linux; Android 9; SmartTV Build/PI) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0 Mobile Safari/537.36";
const KINDLE_SILK: &str = "Mozilla/5.0 (Linux; U; Android 4.0.3; en-us; KFTT Build/IML74K) AppleWebKit/535.19 (KHTML, like Gecko) Silk/3.4 Mobile Safari/535.19 Silk-Accelerated=true";
const IE11: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko";
const IE_COMPAT: &str = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.1; Trident/7.0; SLCC2; .NET CLR 2.0.50727)";
const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
const CHROMEBOOK: &str = "Mozilla/5.0 (X11; CrOS x86_64 14541.0.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const WINDOWS_PHONE: &str = "Mozilla/5.0 (Mobile; Windows Phone 8.1; Android 4.0; ARM; Trident/7.0; Touch; rv:11.0; IEMobile/11.0; NOKIA; Lumia 635) like iPhone OS 7_0_3 Mac OS X AppleWebKit/537 (KHTML, like Gecko) Mobile Safari/537";
const CAPTIVE: &str = "CaptiveNetworkSupport-355.200.27 wispr";
const CURL: &str = "curl/8.4.0";
const CUSTOM_BOT: &str = "ExampleFetchBot/3.1";
const CUSTOM_APP: &str = "MyApp/1.0";
const BARE_WEBKIT: &str = "Mozilla/5.0 (X11; Linux) AppleWebKit/605.1 (KHTML, like Gecko)";
const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
const WINDOWS_TABLET_PC: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; SLCC2; Tablet PC 2.0; rv:11.0) like Gecko";

const CORPUS: &[&str] = &[
    CHROME_WINDOWS,
    SAFARI_IPAD,
    SAFARI_IPHONE,
    SAFARI_IPOD,
    SAFARI_MAC,
    GOOGLEBOT,
    ANDROID_PHONE,
    PIXEL_WEBVIEW,
    OPERA_ANDROID,
    ANDROID_TABLET,
    TIZEN_TV,
    ANDROID_TV_MOBILE,
    KINDLE_SILK,
    IE11,
    IE_COMPAT,
    FIREFOX_LINUX,
    CHROMEBOOK,
    WINDOWS_PHONE,
    CAPTIVE,
    CURL,
    CUSTOM_BOT,
    CUSTOM_APP,
    BARE_WEBKIT,
    EDGE,
    WINDOWS_TABLET_PC,
    "",
    "   ",
    "Mozilla/5.0",
    "(((",
    "🦀/1.0",
];

#[test]
fn test_chrome_on_windows() {
    let p = DeviceProfile::parse(CHROME_WINDOWS);
    assert_eq!(p.browser_name, "Chrome");
    assert_eq!(p.browser_version, "120.0.0.0");
    assert_eq!(p.os_name, "Windows 10.0");
    assert_eq!(p.platform_name, "Microsoft Windows");
    assert!(p.is_chrome);
    assert!(p.is_windows);
    assert!(p.is_desktop);
    assert!(!p.is_mobile);
    assert_eq!(p.is_bot, Detection::Absent);
    assert!(p.is_webkit);
}

#[test]
fn test_ipad_is_tablet_not_mac() {
    let p = DeviceProfile::parse(SAFARI_IPAD);
    assert!(p.is_ipad);
    assert!(p.is_tablet);
    assert!(!p.is_mobile);
    assert!(!p.is_mac);
    assert!(!p.is_desktop);
    assert_eq!(p.os_name, "iPadOS 17.2");
    assert_eq!(p.browser_name, "Safari");
    assert_eq!(p.browser_version, "17.2");
}

#[test]
fn test_iphone_is_mobile_not_mac() {
    let p = DeviceProfile::parse(SAFARI_IPHONE);
    assert!(p.is_iphone);
    assert!(p.is_mobile);
    assert!(!p.is_mac);
    assert!(!p.is_tablet);
    assert_eq!(p.os_name, "iOS 17.2");
    assert_eq!(p.platform_name, "iPhone");
}

#[test]
fn test_ipod_is_not_iphone() {
    let p = DeviceProfile::parse(SAFARI_IPOD);
    assert!(p.is_ipod);
    assert!(!p.is_iphone);
    assert!(p.is_mobile);
    assert!(!p.is_mac);
    assert_eq!(p.os_name, "iOS 12.5");
    assert_eq!(p.platform_name, "iPod");
}

#[test]
fn test_mac_desktop() {
    let p = DeviceProfile::parse(SAFARI_MAC);
    assert!(p.is_mac);
    assert!(p.is_desktop);
    assert_eq!(p.os_name, "macOS Catalina");
    assert_eq!(p.platform_name, "Apple Mac");
}

#[test]
fn test_googlebot() {
    let p = DeviceProfile::parse(GOOGLEBOT);
    assert_eq!(p.is_bot, "googlebot");
    assert!(p.is_bot.is_present());
    assert_eq!(p.browser_name, "unknown");
    assert_eq!(p.browser_version, "unknown");
}

#[test]
fn test_android_phone_is_not_desktop_linux() {
    let p = DeviceProfile::parse(ANDROID_PHONE);
    assert!(p.is_android);
    assert!(p.is_mobile);
    assert!(!p.is_linux);
    assert!(!p.is_desktop);
    assert!(!p.is_tablet);
    assert_eq!(p.os_name, "Android 14");
}

#[test]
fn test_pixel_webview_is_not_a_bot() {
    let p = DeviceProfile::parse(PIXEL_WEBVIEW);
    assert_eq!(p.is_bot, Detection::Absent);
    assert!(p.is_android);
    assert!(p.is_mobile);
}

#[test]
fn test_opera_android_reports_opr_version() {
    let p = DeviceProfile::parse(OPERA_ANDROID);
    assert!(p.is_opera);
    assert_eq!(p.browser_name, "Opera");
    assert_eq!(p.browser_version, "63.3.3216.58675");
}

#[test]
fn test_android_tablet() {
    let p = DeviceProfile::parse(ANDROID_TABLET);
    assert!(p.is_android_tablet);
    assert!(p.is_tablet);
    assert!(!p.is_mobile);
}

#[test]
fn test_smart_tv() {
    let p = DeviceProfile::parse(TIZEN_TV);
    assert_eq!(p.is_smart_tv, "smart-tv");
    assert!(!p.is_desktop);
    assert!(!p.is_mobile);
    assert!(p.is_linux);

    let p = DeviceProfile::parse(ANDROID_TV_MOBILE);
    assert_eq!(p.is_smart_tv, "smarttv");
    assert!(!p.is_mobile);
    assert!(!p.is_tablet);
}

#[test]
fn test_kindle_fire_silk() {
    let p = DeviceProfile::parse(KINDLE_SILK);
    assert!(p.is_kindle_fire);
    assert_eq!(p.kindle_fire_model.as_deref(), Some("Kindle Fire HD"));
    assert!(p.is_silk);
    assert!(p.is_silk_accelerated);
    assert!(p.is_tablet);
    assert!(!p.is_mobile);
}

#[test]
fn test_ie11() {
    let p = DeviceProfile::parse(IE11);
    assert_eq!(p.browser_name, "IE");
    assert_eq!(p.browser_version, "11.0");
    assert_eq!(p.os_name, "Windows 7");
    assert!(!p.is_ie_compatibility_mode);
}

#[test]
fn test_ie_compatibility_mode() {
    let p = DeviceProfile::parse(IE_COMPAT);
    assert!(p.is_ie);
    assert!(p.is_ie_compatibility_mode);
    assert_eq!(p.browser_version, "11.0");
}

#[test]
fn test_firefox_linux64() {
    let p = DeviceProfile::parse(FIREFOX_LINUX);
    assert!(p.is_firefox);
    assert!(p.is_linux);
    assert!(p.is_linux64);
    assert!(p.is_desktop);
    assert_eq!(p.os_name, "Linux 64");
}

#[test]
fn test_chromebook() {
    let p = DeviceProfile::parse(CHROMEBOOK);
    assert!(p.is_chrome_os);
    assert!(p.is_desktop);
    assert!(!p.is_linux);
}

#[test]
fn test_windows_phone() {
    let p = DeviceProfile::parse(WINDOWS_PHONE);
    assert!(p.is_windows_phone);
    assert!(p.is_mobile);
    assert!(!p.is_mac);
    assert!(!p.is_desktop);
    assert_eq!(p.os_name, "Windows Phone 8.1");
    assert_eq!(p.platform_name, "Microsoft Windows Phone");
}

#[test]
fn test_captive_network() {
    let p = DeviceProfile::parse(CAPTIVE);
    assert!(p.is_captive);
    assert!(p.is_mac);
    assert_eq!(p.platform_name, "Apple Mac");
}

#[test]
fn test_non_authoritative_parses() {
    let p = DeviceProfile::parse(CURL);
    assert_eq!(p.browser_name, "curl");
    assert_eq!(p.browser_version, "8.4.0");
    assert!(!p.is_authoritative);
    assert!(p.is_curl);
    assert_eq!(p.is_bot, "curl");

    let p = DeviceProfile::parse(CUSTOM_BOT);
    assert_eq!(p.browser_name, "ExampleFetchBot");
    assert_eq!(p.is_bot, Detection::Present);

    let p = DeviceProfile::parse(CUSTOM_APP);
    assert_eq!(p.browser_name, "MyApp");
    assert_eq!(p.browser_version, "1.0");
    assert_eq!(p.is_bot, Detection::Absent);
}

#[test]
fn test_unknown_webkit_browser() {
    let p = DeviceProfile::parse(BARE_WEBKIT);
    assert_eq!(p.browser_name, "Apple WebKit");
    assert_eq!(p.browser_version, "605.1");
    assert!(p.is_webkit);
}

#[test]
fn test_edge_is_not_chrome() {
    let p = DeviceProfile::parse(EDGE);
    assert!(p.is_edge);
    assert!(!p.is_chrome);
    assert_eq!(p.browser_version, "120.0.2210.91");
}

#[test]
fn test_windows_tablet_pc_token() {
    let p = DeviceProfile::parse(WINDOWS_TABLET_PC);
    assert!(p.is_windows);
    assert!(p.is_tablet);
    assert!(!p.is_desktop);
}

#[test]
fn test_empty_input_is_unknown() {
    for ua in ["", "   "] {
        let p = DeviceProfile::parse(ua);
        assert_eq!(p.source, "");
        assert_eq!(p.browser_name, "unknown");
        assert_eq!(p.browser_version, "unknown");
        assert_eq!(p.os_name, "unknown");
        assert_eq!(p.platform_name, "unknown");
        assert_eq!(p.form_factor_count(), 0);
        assert_eq!(p.is_bot, Detection::Absent);
    }
}

#[test]
fn test_source_is_trimmed() {
    let p = DeviceProfile::parse(&format!("  {CHROME_WINDOWS}\n"));
    assert_eq!(p.source, CHROME_WINDOWS);
}

#[test]
fn test_form_factor_mutual_exclusion() {
    for ua in CORPUS {
        let p = DeviceProfile::parse(ua);
        assert!(p.form_factor_count() <= 1, "{ua}: {p:?}");
    }
}

#[test]
fn test_ios_never_mac() {
    for ua in [SAFARI_IPAD, SAFARI_IPHONE, SAFARI_IPOD, WINDOWS_PHONE] {
        assert!(!DeviceProfile::parse(ua).is_mac, "{ua}");
    }
}

#[test]
fn test_name_fields_never_empty() {
    for ua in CORPUS {
        let p = DeviceProfile::parse(ua);
        assert!(!p.browser_name.is_empty(), "{ua}");
        assert!(!p.browser_version.is_empty(), "{ua}");
        assert!(!p.os_name.is_empty(), "{ua}");
        assert!(!p.platform_name.is_empty(), "{ua}");
    }
}

#[test]
fn test_classify_is_pure() {
    for ua in CORPUS {
        assert_eq!(DeviceProfile::parse(ua), DeviceProfile::parse(ua));
    }
}

#[test]
fn test_environment_readings() {
    let env = StaticEnvironment::with_user_agent(SAFARI_IPAD)
        .screen([820, 1180], 24, 24)
        .touch_points(5)
        .with_language("en-US")
        .with_cpu_cores(8);
    let p = classify(SAFARI_IPAD, &env);
    assert_eq!(p.resolution, [820, 1180]);
    assert_eq!(p.color_depth, 24);
    assert_eq!(p.pixel_depth, 24);
    assert_eq!(p.cpu_cores, 8);
    assert_eq!(p.language, "en-US");
    assert!(p.is_touch_screen);
}

#[test]
fn test_profile_serializes_detections() {
    let json = serde_json::to_value(DeviceProfile::parse(GOOGLEBOT)).unwrap();
    assert_eq!(json["isBot"], "googlebot");
    assert_eq!(json["isSmartTV"], false);
    assert_eq!(json["isiPad"], false);
    assert_eq!(json["browserName"], "unknown");

    let json = serde_json::to_value(DeviceProfile::parse(CUSTOM_BOT)).unwrap();
    assert_eq!(json["isBot"], true);
}
