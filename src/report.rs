use serde::{Deserialize, Serialize};

/// Raw score at or above which a URL is classified as suspicious.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.3;
/// Raw score at or above which a URL is classified as dangerous.
pub const DANGEROUS_THRESHOLD: f64 = 0.5;
/// Raw score at or above which a URL is classified as malicious.
pub const MALICIOUS_THRESHOLD: f64 = 0.8;

/// Ordinal threat classification derived from the accumulated raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Safe,
    Suspicious,
    Dangerous,
    Malicious,
}

impl ThreatLevel {
    /// Classify an unclamped raw score. Thresholds are fixed, not configurable.
    pub fn from_score(raw_score: f64) -> Self {
        if raw_score >= MALICIOUS_THRESHOLD {
            ThreatLevel::Malicious
        } else if raw_score >= DANGEROUS_THRESHOLD {
            ThreatLevel::Dangerous
        } else if raw_score >= SUSPICIOUS_THRESHOLD {
            ThreatLevel::Suspicious
        } else {
            ThreatLevel::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "safe",
            ThreatLevel::Suspicious => "suspicious",
            ThreatLevel::Dangerous => "dangerous",
            ThreatLevel::Malicious => "malicious",
        }
    }
}

/// Structural red flags found in the raw URL string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlStructuralFindings {
    pub has_suspicious_pattern: bool,
    pub uses_https: bool,
    pub has_ip_address: bool,
    pub has_excessive_subdomains: bool,
    /// Matched suspicious keywords, in scan order over the fixed list.
    /// Each keyword appears at most once regardless of occurrence count.
    pub matched_keywords: Vec<String>,
}

/// Results of comparing a hostname against the reference set of
/// legitimate domains and the known-malicious blacklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainCheckFindings {
    pub is_known_malicious: bool,
    pub is_spoofed: bool,
    /// The first reference domain whose similarity fell inside (0.7, 1.0).
    pub similar_to: Option<String>,
    /// Levenshtein distance to `similar_to`.
    pub edit_distance: Option<usize>,
    pub is_homograph: bool,
}

/// Urgency/financial language signals from optional page or email text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFindings {
    pub has_urgency_keywords: bool,
    pub has_financial_keywords: bool,
    pub has_mismatched_links: bool,
    pub urgency_score: f64,
    pub suspicion_score: f64,
}

/// Aggregated threat verdict for a single URL. Immutable once produced;
/// serializes to JSON for the surrounding system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub url: String,
    pub is_safe: bool,
    pub threat_level: ThreatLevel,
    /// The accumulated raw score clamped to [0, 1].
    pub confidence: f64,
    /// Human-readable explanations, appended in evaluation order
    /// (structural, then domain, then content).
    pub threats: Vec<String>,
    pub recommendations: Vec<String>,
    pub url_findings: UrlStructuralFindings,
    /// None when the URL did not parse to a hostname.
    pub domain_findings: Option<DomainCheckFindings>,
    /// None when no content was supplied.
    pub content_findings: Option<ContentFindings>,
}
