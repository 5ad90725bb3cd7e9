//! Detect the browser family from its user agent.

/// Browser family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Browser {
    /// Internet Explorer.
    Ie,
    /// Chromium based Edge.
    Edge,
    /// Any browser on Android.
    Android,
    /// Chrome on desktop.
    Chrome,
    /// Safari on desktop.
    Safari,
    /// Safari or any other WebKit browser on iOS.
    MobileSafari,
    /// Firefox on desktop.
    Firefox,
    /// Anything else.
    Unknown,
}

impl Browser {
    /// Detect the browser from a user agent string.
    ///
    /// Checks are done in order, the first match wins.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if contains_any(user_agent, &["MSIE", "Trident"]) {
            Self::Ie
        } else if user_agent.contains("Edg") {
            Self::Edge
        } else if user_agent.contains("Android") {
            Self::Android
        } else if user_agent.contains("Chrome") {
            Self::Chrome
        } else if followed_by(user_agent, &["Macintosh", "Windows"], "AppleWebKit") {
            Self::Safari
        } else if followed_by(user_agent, &["iPhone", "iPad", "iPod"], "AppleWebKit") {
            Self::MobileSafari
        } else if user_agent.contains("Firefox") {
            Self::Firefox
        } else {
            Self::Unknown
        }
    }

    /// Whether page visibility changes are reported with the prefixed `webkitvisibilitychange` event.
    #[inline]
    #[must_use]
    pub const fn uses_webkit_visibility(self) -> bool {
        matches!(self, Self::Safari | Self::MobileSafari)
    }

    /// Whether the game should go fullscreen on the first gesture.
    #[inline]
    #[must_use]
    pub const fn wants_fullscreen(self) -> bool {
        matches!(self, Self::Android)
    }
}

/// Whether any of the needles is part of the haystack.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whether any of the prefixes occurs with the suffix somewhere after it.
fn followed_by(haystack: &str, prefixes: &[&str], suffix: &str) -> bool {
    prefixes.iter().any(|prefix| {
        haystack
            .find(prefix)
            .and_then(|index| haystack.get(index + prefix.len()..))
            .is_some_and(|rest| rest.contains(suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::Browser;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1";
    const FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const IE: &str = "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko";

    #[test]
    fn detection() {
        assert_eq!(Browser::from_user_agent(CHROME_DESKTOP), Browser::Chrome);
        assert_eq!(Browser::from_user_agent(EDGE), Browser::Edge);
        assert_eq!(Browser::from_user_agent(ANDROID_CHROME), Browser::Android);
        assert_eq!(Browser::from_user_agent(SAFARI), Browser::Safari);
        assert_eq!(Browser::from_user_agent(IPHONE), Browser::MobileSafari);
        assert_eq!(Browser::from_user_agent(FIREFOX), Browser::Firefox);
        assert_eq!(Browser::from_user_agent(IE), Browser::Ie);
        assert_eq!(Browser::from_user_agent(""), Browser::Unknown);
    }

    #[test]
    fn precedence() {
        // IE wins over everything
        assert_eq!(Browser::from_user_agent("Trident Edg Android"), Browser::Ie);
        // Edge contains Chrome
        assert_eq!(Browser::from_user_agent("Chrome Edg"), Browser::Edge);
        // WebKit has to come after the platform
        assert_eq!(
            Browser::from_user_agent("AppleWebKit Macintosh"),
            Browser::Unknown
        );
        // Firefox on a Mac doesn't use WebKit
        assert_eq!(
            Browser::from_user_agent("Macintosh; rv:121.0 Gecko Firefox/121.0"),
            Browser::Firefox
        );
    }

    #[test]
    fn platform_behavior() {
        assert!(Browser::Safari.uses_webkit_visibility());
        assert!(Browser::MobileSafari.uses_webkit_visibility());
        assert!(!Browser::Chrome.uses_webkit_visibility());
        assert!(Browser::Android.wants_fullscreen());
        assert!(!Browser::MobileSafari.wants_fullscreen());
    }
}
