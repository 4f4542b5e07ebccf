//! Browser identity and version rules.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{first_match, Rule};
use crate::env::UNKNOWN;

/// Browsers recognised by a named rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Edge,
    PhantomJs,
    Konqueror,
    Amaya,
    Epiphany,
    SeaMonkey,
    Flock,
    OmniWeb,
    Opera,
    Chromium,
    Chrome,
    Safari,
    WinJs,
    Ie,
    Ps3,
    Psp,
    Firefox,
    Uc,
}

impl Browser {
    /// Reported browser name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Browser::Edge => "Edge",
            Browser::PhantomJs => "PhantomJS",
            Browser::Konqueror => "Konqueror",
            Browser::Amaya => "Amaya",
            Browser::Epiphany => "Epiphany",
            Browser::SeaMonkey => "SeaMonkey",
            Browser::Flock => "Flock",
            Browser::OmniWeb => "OmniWeb",
            Browser::Opera => "Opera",
            Browser::Chromium => "Chromium",
            Browser::Chrome => "Chrome",
            Browser::Safari => "Safari",
            Browser::WinJs => "WinJs",
            Browser::Ie => "IE",
            Browser::Ps3 => "ps3",
            Browser::Psp => "psp",
            Browser::Firefox => "Firefox",
            Browser::Uc => "UCBrowser",
        }
    }
}

/// Outcome of the browser identity step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BrowserMatch {
    pub browser: Option<Browser>,
    pub name: String,
    /// `false` when the name came from the generic `name/version` heuristic.
    pub authoritative: bool,
}

// Priority order. Chromium-based browsers carry "Chrome" and "Safari"
// tokens, so they must come before both.
static BROWSER_RULES: LazyLock<Vec<Rule<Browser>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?i)\bedg(?:e|a|ios)?/", |_| Browser::Edge),
        Rule::new(r"(?i)phantomjs", |_| Browser::PhantomJs),
        Rule::new(r"(?i)konqueror", |_| Browser::Konqueror),
        Rule::new(r"(?i)amaya", |_| Browser::Amaya),
        Rule::new(r"(?i)epiphany", |_| Browser::Epiphany),
        Rule::new(r"(?i)seamonkey", |_| Browser::SeaMonkey),
        Rule::new(r"(?i)flock", |_| Browser::Flock),
        Rule::new(r"(?i)omniweb", |_| Browser::OmniWeb),
        Rule::new(r"(?i)opera|\bopr/", |_| Browser::Opera),
        Rule::new(r"(?i)chromium", |_| Browser::Chromium),
        Rule::new(r"(?i)chrome|crios", |_| Browser::Chrome),
        Rule::new(r"(?i)safari", |_| Browser::Safari),
        Rule::new(r"(?i)msapphost", |_| Browser::WinJs),
        Rule::new(r"(?i)msie|trident", |_| Browser::Ie),
        Rule::new(r"(?i)playstation 3", |_| Browser::Ps3),
        Rule::new(r"(?i)playstation portable", |_| Browser::Psp),
        Rule::new(r"(?i)firefox|fxios", |_| Browser::Firefox),
        Rule::new(r"(?i)ucbrowser", |_| Browser::Uc),
    ]
});

static GENERIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w\-.]+)/[\w.\-]+").unwrap());

/// Identify the browser. Named rules first, then the generic heuristic.
pub(crate) fn identify(source: &str) -> BrowserMatch {
    if let Some(browser) = first_match(&BROWSER_RULES, source) {
        return BrowserMatch {
            browser: Some(browser),
            name: browser.name().to_string(),
            authoritative: true,
        };
    }

    // Only strings that do not claim to be Mozilla get the heuristic
    if !source.starts_with("Mozilla") {
        if let Some(caps) = GENERIC_NAME.captures(source) {
            return BrowserMatch {
                browser: None,
                name: caps[1].to_string(),
                authoritative: false,
            };
        }
    }

    BrowserMatch {
        browser: None,
        name: UNKNOWN.to_string(),
        authoritative: true,
    }
}

fn version_regex(browser: Browser) -> &'static Regex {
    static EDGE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\bedg(?:e|a|ios)?/([\w.\-]+)").unwrap());
    static PHANTOM: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)phantomjs/([\w.\-]+)").unwrap());
    static KONQUEROR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)konqueror[/ ]([\w.\-]+)").unwrap());
    static AMAYA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)amaya/([\w.\-]+)").unwrap());
    static EPIPHANY: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)epiphany/([\w.\-]+)").unwrap());
    static SEAMONKEY: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)seamonkey/([\w.\-]+)").unwrap());
    static FLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)flock/([\w.\-]+)").unwrap());
    static OMNIWEB: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)omniweb/v([\w.\-]+)").unwrap());
    static OPERA: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)version/([\w.\-]+)").unwrap());
    static CHROMIUM: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)chromium/([\w.\-]+)").unwrap());
    static CHROME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(?:chrome|crios)/([\w.\-]+)").unwrap());
    static SAFARI: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(?:version|safari)/([\w.\-]+)").unwrap());
    static WINJS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)msapphost/([\w.\-]+)").unwrap());
    static IE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)msie\s([\d.]+\d)").unwrap());
    static PS3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\w.\-]+)\)\s*$").unwrap());
    static PSP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\w.\-]+)\)?\s*$").unwrap());
    static FIREFOX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(?:firefox|fxios)/([\w.\-]+)").unwrap());
    static UC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ucbrowser/([\w.]+)").unwrap());

    match browser {
        Browser::Edge => &EDGE,
        Browser::PhantomJs => &PHANTOM,
        Browser::Konqueror => &KONQUEROR,
        Browser::Amaya => &AMAYA,
        Browser::Epiphany => &EPIPHANY,
        Browser::SeaMonkey => &SEAMONKEY,
        Browser::Flock => &FLOCK,
        Browser::OmniWeb => &OMNIWEB,
        Browser::Opera => &OPERA,
        Browser::Chromium => &CHROMIUM,
        Browser::Chrome => &CHROME,
        Browser::Safari => &SAFARI,
        Browser::WinJs => &WINJS,
        Browser::Ie => &IE,
        Browser::Ps3 => &PS3,
        Browser::Psp => &PSP,
        Browser::Firefox => &FIREFOX,
        Browser::Uc => &UC,
    }
}

/// Modern version marker that wins over the legacy one when both appear.
fn preferred_regex(browser: Browser) -> Option<&'static Regex> {
    static OPR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bopr/([\w.\-]+)").unwrap());
    static TRIDENT_RV: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)trident/\d+\.\d+;.*rv:(\d+\.\d)").unwrap());

    match browser {
        Browser::Opera => Some(&OPR),
        Browser::Ie => Some(&TRIDENT_RV),
        _ => None,
    }
}

/// Extract the version for an identified browser, `"unknown"` on failure.
pub(crate) fn version(identity: &BrowserMatch, source: &str) -> String {
    let found = match identity.browser {
        Some(browser) => preferred_regex(browser)
            .and_then(|re| re.captures(source))
            .or_else(|| version_regex(browser).captures(source))
            .map(|caps| caps[1].to_string()),
        None if identity.name == UNKNOWN => None,
        None => Regex::new(&format!(r"(?i){}[/ ]([\w.\-]+)", regex::escape(&identity.name)))
            .ok()
            .and_then(|re| re.captures(source).map(|caps| caps[1].to_string())),
    };
    found.unwrap_or_else(|| UNKNOWN.to_string())
}
