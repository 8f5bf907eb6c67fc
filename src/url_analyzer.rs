use crate::report::UrlStructuralFindings;
use regex::Regex;
use url::Url;

/// Keywords commonly planted in phishing URLs. Scan order is list order.
pub const SUSPICIOUS_URL_KEYWORDS: [&str; 17] = [
    "verify",
    "account",
    "suspended",
    "urgent",
    "security",
    "update",
    "confirm",
    "login",
    "password",
    "banking",
    "paypal",
    "amazon",
    "microsoft",
    "apple",
    "google",
    "secure",
    "alert",
];

/// Inspects the raw URL string for structural red flags. Works on any
/// input, parsed or not, and cannot fail.
pub struct UrlStructuralAnalyzer {
    ip_pattern: Regex,
    long_label_pattern: Regex,
    digit_run_pattern: Regex,
    keywords: Vec<String>,
}

impl Default for UrlStructuralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlStructuralAnalyzer {
    pub fn new() -> Self {
        Self::with_keywords(SUSPICIOUS_URL_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }

    pub fn with_keywords(keywords: Vec<String>) -> Self {
        // Patterns are literals, so compilation cannot fail at runtime
        Self {
            ip_pattern: Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap(),
            long_label_pattern: Regex::new(r"[a-z0-9-]{30,}").unwrap(),
            digit_run_pattern: Regex::new(r"\d{5,}").unwrap(),
            keywords,
        }
    }

    pub fn analyze(&self, url: &str) -> UrlStructuralFindings {
        let mut findings = UrlStructuralFindings::default();

        // A dotted-quad anywhere in the URL marks it both as IP-hosted and
        // structurally suspicious
        if self.ip_pattern.is_match(url) {
            findings.has_ip_address = true;
            findings.has_suspicious_pattern = true;
        }

        if self.long_label_pattern.is_match(url)
            || url.contains('@')
            || url.contains("--")
            || self.digit_run_pattern.is_match(url)
        {
            findings.has_suspicious_pattern = true;
        }

        findings.uses_https = url.starts_with("https://");

        // Subdomain depth needs a parsed host; malformed URLs skip the
        // check here and are penalized by the aggregator instead
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                if host.split('.').count() > 4 {
                    findings.has_excessive_subdomains = true;
                }
            }
        }

        let url_lower = url.to_lowercase();
        for keyword in &self.keywords {
            if url_lower.contains(keyword.as_str()) {
                findings.matched_keywords.push(keyword.clone());
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_address_detection() {
        let analyzer = UrlStructuralAnalyzer::new();

        let findings = analyzer.analyze("http://192.168.1.1/login");
        assert!(findings.has_ip_address);
        assert!(findings.has_suspicious_pattern);

        let findings = analyzer.analyze("https://example.com/page");
        assert!(!findings.has_ip_address);
    }

    #[test]
    fn test_userinfo_trick_detection() {
        let analyzer = UrlStructuralAnalyzer::new();

        let findings = analyzer.analyze("http://example.com@evil.example/");
        assert!(findings.has_suspicious_pattern);
    }

    #[test]
    fn test_repeated_hyphens() {
        let analyzer = UrlStructuralAnalyzer::new();

        assert!(analyzer.analyze("http://cheap--deals.example/").has_suspicious_pattern);
        assert!(!analyzer.analyze("http://one-hyphen.example/").has_suspicious_pattern);
    }

    #[test]
    fn test_long_digit_run() {
        let analyzer = UrlStructuralAnalyzer::new();

        assert!(analyzer.analyze("http://example.com/id/1234567").has_suspicious_pattern);
        assert!(!analyzer.analyze("http://example.com/id/1234").has_suspicious_pattern);
    }

    #[test]
    fn test_overlong_label() {
        let analyzer = UrlStructuralAnalyzer::new();

        let long_host = format!("http://{}.example/", "a".repeat(30));
        assert!(analyzer.analyze(&long_host).has_suspicious_pattern);
    }

    #[test]
    fn test_https_prefix_is_exact() {
        let analyzer = UrlStructuralAnalyzer::new();

        assert!(analyzer.analyze("https://example.com").uses_https);
        assert!(!analyzer.analyze("http://example.com").uses_https);
        // Case-sensitive exact prefix
        assert!(!analyzer.analyze("HTTPS://example.com").uses_https);
    }

    #[test]
    fn test_excessive_subdomains() {
        let analyzer = UrlStructuralAnalyzer::new();

        let findings = analyzer.analyze("http://a.b.c.d.example.com/");
        assert!(findings.has_excessive_subdomains);

        let findings = analyzer.analyze("http://www.example.com/");
        assert!(!findings.has_excessive_subdomains);

        // Unparseable URL silently skips the subdomain check
        let findings = analyzer.analyze("not a url at all");
        assert!(!findings.has_excessive_subdomains);
    }

    #[test]
    fn test_keyword_scan_order_and_dedup() {
        let analyzer = UrlStructuralAnalyzer::new();

        let findings = analyzer.analyze("https://secure-paypal-verify.com");
        assert_eq!(findings.matched_keywords, vec!["verify", "paypal", "secure"]);

        // Differently-cased occurrences count once per keyword
        let findings = analyzer.analyze("http://example.com/LOGIN/login");
        assert_eq!(findings.matched_keywords, vec!["login"]);
    }

    #[test]
    fn test_clean_url_has_no_findings() {
        let analyzer = UrlStructuralAnalyzer::new();

        let findings = analyzer.analyze("https://example.com/docs");
        assert!(!findings.has_suspicious_pattern);
        assert!(!findings.has_ip_address);
        assert!(!findings.has_excessive_subdomains);
        assert!(findings.uses_https);
        assert!(findings.matched_keywords.is_empty());
    }
}
