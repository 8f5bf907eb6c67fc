use crate::content_analyzer::{FINANCIAL_KEYWORDS, URGENCY_KEYWORDS};
use crate::domain_similarity::LEGITIMATE_DOMAINS;
use crate::url_analyzer::SUSPICIOUS_URL_KEYWORDS;
use serde::{Deserialize, Serialize};

/// Hostnames treated as known-malicious. Exact, case-sensitive match.
pub const DEFAULT_BLACKLIST: [&str; 5] = [
    "phishing-login.com",
    "account-verify-secure.net",
    "banking-alert-update.com",
    "free-prize-claim.com",
    "malware-delivery.net",
];

/// Scanner configuration. Defaults reproduce the built-in reference
/// tables and score weights; a YAML file can override any of them. The
/// classification thresholds are fixed and deliberately not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub blacklist: Vec<String>,
    pub legitimate_domains: Vec<String>,
    pub url_keywords: Vec<String>,
    pub urgency_keywords: Vec<String>,
    pub financial_keywords: Vec<String>,
    pub weights: ScoreWeights,
    pub cache: CacheConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLIST.iter().map(|d| d.to_string()).collect(),
            legitimate_domains: LEGITIMATE_DOMAINS.iter().map(|d| d.to_string()).collect(),
            url_keywords: SUSPICIOUS_URL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            urgency_keywords: URGENCY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            financial_keywords: FINANCIAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            weights: ScoreWeights::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ScannerConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScannerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Additive score contribution per triggered condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub suspicious_pattern: f64,
    pub no_https: f64,
    pub ip_address: f64,
    /// Applied once per matched URL keyword.
    pub keyword_match: f64,
    pub blacklisted_domain: f64,
    pub spoofed_domain: f64,
    pub homograph: f64,
    pub urgency_language: f64,
    pub financial_language: f64,
    pub mismatched_links: f64,
    pub invalid_url: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            suspicious_pattern: 0.3,
            no_https: 0.2,
            ip_address: 0.4,
            keyword_match: 0.2,
            blacklisted_domain: 1.0,
            spoofed_domain: 0.8,
            homograph: 0.7,
            urgency_language: 0.3,
            financial_language: 0.3,
            mismatched_links: 0.4,
            invalid_url: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            ttl_seconds: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tables() {
        let config = ScannerConfig::default();

        assert_eq!(config.legitimate_domains.len(), 12);
        assert_eq!(config.legitimate_domains[0], "google.com");
        assert_eq!(config.url_keywords.len(), 17);
        assert_eq!(config.urgency_keywords.len(), 13);
        assert_eq!(config.financial_keywords.len(), 14);
        assert!(!config.blacklist.is_empty());
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoreWeights::default();

        assert!((weights.suspicious_pattern - 0.3).abs() < 1e-9);
        assert!((weights.no_https - 0.2).abs() < 1e-9);
        assert!((weights.ip_address - 0.4).abs() < 1e-9);
        assert!((weights.keyword_match - 0.2).abs() < 1e-9);
        assert!((weights.blacklisted_domain - 1.0).abs() < 1e-9);
        assert!((weights.spoofed_domain - 0.8).abs() < 1e-9);
        assert!((weights.homograph - 0.7).abs() < 1e-9);
        assert!((weights.invalid_url - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ScannerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: ScannerConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.blacklist, config.blacklist);
        assert_eq!(parsed.legitimate_domains, config.legitimate_domains);
        assert_eq!(parsed.cache.max_entries, config.cache.max_entries);
        assert_eq!(parsed.cache.ttl_seconds, config.cache.ttl_seconds);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let parsed: ScannerConfig = serde_yaml::from_str("blacklist:\n  - evil.example\n").unwrap();

        assert_eq!(parsed.blacklist, vec!["evil.example"]);
        assert_eq!(parsed.url_keywords.len(), 17);
        assert!((parsed.weights.blacklisted_domain - 1.0).abs() < 1e-9);
    }
}
