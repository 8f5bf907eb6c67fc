use crate::cache::AnalysisCache;
use crate::config::{ScannerConfig, ScoreWeights};
use crate::content_analyzer::ContentAnalyzer;
use crate::domain_similarity::DomainSimilarityDetector;
use crate::report::{ThreatLevel, ThreatReport};
use crate::url_analyzer::UrlStructuralAnalyzer;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Facade over the three analyzers. Runs whichever apply, accumulates a
/// weighted score with human-readable explanations, classifies the total
/// into a threat level and attaches recommendations.
///
/// `check` never fails: malformed input is folded into the score rather
/// than surfaced as an error, so every call yields a usable report.
pub struct ThreatAggregator {
    url_analyzer: UrlStructuralAnalyzer,
    domain_detector: DomainSimilarityDetector,
    content_analyzer: ContentAnalyzer,
    blacklist: HashSet<String>,
    weights: ScoreWeights,
    cache: AnalysisCache,
}

impl Default for ThreatAggregator {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl ThreatAggregator {
    pub fn new(config: ScannerConfig) -> Self {
        let cache = AnalysisCache::new(
            config.cache.max_entries,
            Duration::from_secs(config.cache.ttl_seconds),
        );
        Self {
            url_analyzer: UrlStructuralAnalyzer::with_keywords(config.url_keywords),
            domain_detector: DomainSimilarityDetector::with_domains(config.legitimate_domains),
            content_analyzer: ContentAnalyzer::with_keywords(
                config.urgency_keywords,
                config.financial_keywords,
            ),
            blacklist: config.blacklist.into_iter().collect(),
            weights: config.weights,
            cache,
        }
    }

    /// Replace the owned result cache, e.g. with different bounds.
    pub fn with_cache(mut self, cache: AnalysisCache) -> Self {
        self.cache = cache;
        self
    }

    /// Evaluate a single URL, with optional page or email text.
    pub fn check(&self, url: &str, content: Option<&str>) -> ThreatReport {
        let key = AnalysisCache::key(url, content);
        if let Some(report) = self.cache.get(&key) {
            log::debug!("cache hit for {url}");
            return report;
        }

        let mut score = 0.0_f64;
        let mut threats = Vec::new();

        let url_findings = self.url_analyzer.analyze(url);

        let hostname = extract_hostname(url);

        let domain_findings = hostname.as_deref().map(|host| {
            let mut findings = self.domain_detector.analyze(host);
            findings.is_known_malicious = self.blacklist.contains(host);
            findings
        });

        let content_findings = content.map(|text| self.content_analyzer.analyze(text));

        // Structural signals. The flat suspicious-pattern weight is
        // skipped when the IP match is the only structural trigger: the
        // dedicated IP weight already covers it.
        if url_findings.has_suspicious_pattern && !url_findings.has_ip_address {
            score += self.weights.suspicious_pattern;
            threats.push("URL contains suspicious structural patterns".to_string());
        }
        if !url_findings.uses_https {
            score += self.weights.no_https;
            threats.push("Connection does not use HTTPS".to_string());
        }
        if url_findings.has_ip_address {
            score += self.weights.ip_address;
            threats.push("URL uses a raw IP address instead of a domain name".to_string());
        }
        // Keyword hits against a host that IS the legitimate domain are
        // noise (https://google.com would flag itself on "google")
        let trusted_host = hostname
            .as_deref()
            .map(|host| self.domain_detector.is_reference_domain(host))
            .unwrap_or(false);
        if !url_findings.matched_keywords.is_empty() && !trusted_host {
            score += self.weights.keyword_match * url_findings.matched_keywords.len() as f64;
            threats.push(format!(
                "Suspicious keywords in URL: {}",
                url_findings.matched_keywords.join(", ")
            ));
        }

        // Domain signals, or the malformed-URL penalty in their place
        match (&domain_findings, hostname.as_deref()) {
            (Some(findings), Some(host)) => {
                if findings.is_known_malicious {
                    score += self.weights.blacklisted_domain;
                    threats.push(format!("Domain {host} is on the known-malicious blacklist"));
                }
                if findings.is_spoofed {
                    score += self.weights.spoofed_domain;
                    let reference = findings.similar_to.as_deref().unwrap_or("a known domain");
                    threats.push(format!(
                        "Domain closely resembles legitimate domain {reference}"
                    ));
                }
                if findings.is_homograph {
                    score += self.weights.homograph;
                    threats.push(
                        "Domain contains lookalike characters (possible homograph attack)"
                            .to_string(),
                    );
                }
            }
            _ => {
                score += self.weights.invalid_url;
                threats.push("Invalid URL format".to_string());
            }
        }

        // Content signals
        if let Some(findings) = &content_findings {
            if findings.has_urgency_keywords {
                score += self.weights.urgency_language;
                threats.push("Content uses urgency or pressure language".to_string());
            }
            if findings.has_financial_keywords {
                score += self.weights.financial_language;
                threats.push("Content requests financial or payment details".to_string());
            }
            if findings.has_mismatched_links {
                score += self.weights.mismatched_links;
                threats.push("Link text does not match its destination URL".to_string());
            }
        }

        let threat_level = ThreatLevel::from_score(score);
        if threat_level != ThreatLevel::Safe {
            log::debug!(
                "{url} classified {} (score {score:.2}, {} threats)",
                threat_level.as_str(),
                threats.len()
            );
        }

        let report = ThreatReport {
            url: url.to_string(),
            is_safe: threat_level == ThreatLevel::Safe,
            threat_level,
            confidence: score.min(1.0),
            threats,
            recommendations: recommendations_for(threat_level),
            url_findings,
            domain_findings,
            content_findings,
        };

        self.cache.insert(key, report.clone());
        report
    }

    /// Evaluate a batch of URLs concurrently, one task per URL. Results
    /// preserve input order; elements share no state beyond the read-only
    /// tables and the report cache. A task that fails to join falls back
    /// to an inline check, so the batch always returns a full set.
    pub async fn batch_check(self: Arc<Self>, urls: &[String]) -> Vec<ThreatReport> {
        let mut handles = Vec::with_capacity(urls.len());
        for url in urls {
            let aggregator = Arc::clone(&self);
            let url = url.clone();
            handles.push(tokio::spawn(async move { aggregator.check(&url, None) }));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    log::warn!("batch task for {url} did not complete: {e}");
                    reports.push(self.check(url, None));
                }
            }
        }
        reports
    }
}

/// Hostname as written in the input. `Url::parse` decides validity, but
/// its host is IDNA-mapped to punycode, which would hide lookalike
/// characters from the homograph scan; the domain checks get the raw
/// spelling instead.
fn extract_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str()?;

    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = after_scheme.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);
    // Bracketed IPv6 literals keep their brackets; otherwise drop a port
    let host = if host.starts_with('[') {
        host.split_inclusive(']').next().unwrap_or(host)
    } else {
        host.rsplit_once(':').map(|(host, _)| host).unwrap_or(host)
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Fixed advice per threat level; independent of which signals fired.
fn recommendations_for(level: ThreatLevel) -> Vec<String> {
    let messages: &[&str] = match level {
        ThreatLevel::Malicious => &[
            "Block this URL immediately",
            "Report it to your security team",
            "Delete any message containing this link",
        ],
        ThreatLevel::Dangerous => &[
            "Avoid visiting this URL",
            "Verify the request through a separate channel",
            "Go to the official website directly instead of following the link",
        ],
        ThreatLevel::Suspicious => &[
            "Hover over the link to preview its destination before clicking",
            "Contact the sender directly to confirm the message is genuine",
        ],
        ThreatLevel::Safe => &["URL appears safe, but always exercise caution online"],
    };
    messages.iter().map(|m| m.to_string()).collect()
}
