//! Client classification from the `User-Agent` header.

use woothee::parser::Parser;

/// Value used for any classification the parser cannot determine.
pub const UNKNOWN: &str = "unknown";

/// Device type, operating system, and browser derived from a user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub device_type: String,
    pub os: String,
    pub browser: String,
}

impl ClientProfile {
    fn unknown() -> Self {
        Self {
            device_type: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
        }
    }
}

/// Classifies a raw user-agent string.
///
/// Deterministic and infallible: empty or unparseable input yields
/// [`UNKNOWN`] for every field instead of an error.
///
/// Device types follow woothee categories: `pc`, `smartphone`,
/// `mobilephone`, `appliance`, `crawler`.
pub fn classify(user_agent: &str) -> ClientProfile {
    let user_agent = user_agent.trim();
    if user_agent.is_empty() {
        return ClientProfile::unknown();
    }

    match Parser::new().parse(user_agent) {
        Some(result) => ClientProfile {
            device_type: known_or_unknown(result.category),
            os: known_or_unknown(result.os),
            browser: known_or_unknown(result.name),
        },
        None => ClientProfile::unknown(),
    }
}

fn known_or_unknown(value: &str) -> String {
    if value.is_empty() || value.eq_ignore_ascii_case("UNKNOWN") {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_desktop_chrome() {
        let profile = classify(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        );

        assert_eq!(profile.device_type, "pc");
        assert_eq!(profile.browser, "Chrome");
        assert!(profile.os.starts_with("Windows"));
    }

    #[test]
    fn test_classify_iphone() {
        let profile = classify(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        );

        assert_eq!(profile.device_type, "smartphone");
        assert_eq!(profile.os, "iPhone");
        assert_eq!(profile.browser, "Safari");
    }

    #[test]
    fn test_classify_empty_is_unknown() {
        assert_eq!(classify(""), ClientProfile::unknown());
        assert_eq!(classify("   "), ClientProfile::unknown());
    }

    #[test]
    fn test_classify_garbage_is_unknown() {
        let profile = classify("???");

        assert_eq!(profile.device_type, UNKNOWN);
        assert_eq!(profile.os, UNKNOWN);
        assert_eq!(profile.browser, UNKNOWN);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        assert_eq!(classify(ua), classify(ua));
    }
}
