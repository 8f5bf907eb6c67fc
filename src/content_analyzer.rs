use crate::report::ContentFindings;
use regex::Regex;

/// Pressure/urgency phrases typical of phishing copy.
pub const URGENCY_KEYWORDS: [&str; 13] = [
    "urgent",
    "immediately",
    "act now",
    "limited time",
    "expires",
    "suspended",
    "locked",
    "verify now",
    "click here",
    "confirm",
    "unusual activity",
    "security alert",
    "action required",
];

/// Financial-request phrases typical of phishing copy.
pub const FINANCIAL_KEYWORDS: [&str; 14] = [
    "refund",
    "payment",
    "invoice",
    "transaction",
    "account",
    "credit card",
    "bank",
    "wire transfer",
    "prize",
    "winner",
    "claim",
    "reward",
    "bonus",
    "free money",
];

/// Keyword matches above this count saturate the urgency score.
const SCORE_SATURATION: f64 = 5.0;

/// Scans optional page or email text for urgency and financial-request
/// language and for anchor tags whose visible text points somewhere other
/// than the href. Operates on raw strings and cannot fail.
pub struct ContentAnalyzer {
    anchor_pattern: Regex,
    urgency_keywords: Vec<String>,
    financial_keywords: Vec<String>,
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self::with_keywords(
            URGENCY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            FINANCIAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        )
    }

    pub fn with_keywords(urgency_keywords: Vec<String>, financial_keywords: Vec<String>) -> Self {
        Self {
            anchor_pattern: Regex::new(
                r#"(?s)<[aA][^>]*href\s*=\s*["']([^"']+)["'][^>]*>([^<]+)</[aA]>"#,
            )
            .unwrap(),
            urgency_keywords,
            financial_keywords,
        }
    }

    pub fn analyze(&self, content: &str) -> ContentFindings {
        let content_lower = content.to_lowercase();

        let urgency_matches = self
            .urgency_keywords
            .iter()
            .filter(|k| content_lower.contains(k.as_str()))
            .count();
        let financial_matches = self
            .financial_keywords
            .iter()
            .filter(|k| content_lower.contains(k.as_str()))
            .count();

        let urgency_score = (urgency_matches as f64 / SCORE_SATURATION).min(1.0);
        // The financial score only feeds the combined suspicion score and
        // is not reported on its own
        let financial_score = (financial_matches as f64 / SCORE_SATURATION).min(1.0);

        ContentFindings {
            has_urgency_keywords: urgency_matches > 0,
            has_financial_keywords: financial_matches > 0,
            has_mismatched_links: self.has_mismatched_links(content),
            urgency_score,
            suspicion_score: (urgency_score + financial_score) / 2.0,
        }
    }

    /// Flags anchors whose display text looks like a URL but names a
    /// destination the href does not contain
    fn has_mismatched_links(&self, content: &str) -> bool {
        for capture in self.anchor_pattern.captures_iter(content) {
            if let (Some(href), Some(text)) = (capture.get(1), capture.get(2)) {
                let text = text.as_str();
                if text.contains("http") && !href.as_str().contains(text) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_keyword_counting() {
        let analyzer = ContentAnalyzer::new();

        let findings = analyzer.analyze("URGENT: your account is suspended, act now!");
        assert!(findings.has_urgency_keywords);
        // urgent, suspended, act now = 3 matches
        assert!((findings.urgency_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_urgency_score_saturates_at_one() {
        let analyzer = ContentAnalyzer::new();

        let findings = analyzer.analyze(
            "urgent immediately act now limited time expires suspended locked verify now",
        );
        assert!((findings.urgency_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_financial_keywords_feed_suspicion_score() {
        let analyzer = ContentAnalyzer::new();

        // One financial match, no urgency: suspicion = (0.0 + 0.2) / 2
        let findings = analyzer.analyze("please see the attached invoice");
        assert!(findings.has_financial_keywords);
        assert!(!findings.has_urgency_keywords);
        assert!((findings.urgency_score - 0.0).abs() < 1e-9);
        assert!((findings.suspicion_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_clean_content() {
        let analyzer = ContentAnalyzer::new();

        let findings = analyzer.analyze("Here are the meeting notes from Tuesday.");
        assert!(!findings.has_urgency_keywords);
        assert!(!findings.has_financial_keywords);
        assert!(!findings.has_mismatched_links);
        assert!((findings.suspicion_score - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_link_detection() {
        let analyzer = ContentAnalyzer::new();

        // Display text claims one URL, href points elsewhere
        let findings = analyzer
            .analyze(r#"<a href="http://evil.example/steal">http://paypal.com/account</a>"#);
        assert!(findings.has_mismatched_links);

        // Display text matches the destination
        let findings =
            analyzer.analyze(r#"<a href="http://example.com/page">http://example.com/page</a>"#);
        assert!(!findings.has_mismatched_links);

        // Plain-text display labels are never flagged
        let findings = analyzer.analyze(r#"<a href="http://example.com/page">click here</a>"#);
        assert!(!findings.has_mismatched_links);
    }
}
