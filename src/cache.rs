use crate::report::ThreatReport;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    report: ThreatReport,
    inserted_at: Instant,
    sequence: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    next_sequence: u64,
}

/// Bounded TTL cache for finished threat reports, keyed by the request
/// fingerprint. Owned by the aggregator rather than hidden in a global;
/// size bound and TTL are explicit so eviction is testable.
pub struct AnalysisCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries,
            ttl,
        }
    }

    /// Fingerprint for a (url, content) request pair. The unit separator
    /// cannot occur in a URL, so keys are unambiguous.
    pub fn key(url: &str, content: Option<&str>) -> String {
        match content {
            Some(content) => format!("{url}\u{1f}{content}"),
            None => url.to_string(),
        }
    }

    pub fn get(&self, key: &str) -> Option<ThreatReport> {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(entry) = inner.entries.get(key) {
                if entry.inserted_at.elapsed() < self.ttl {
                    return Some(entry.report.clone());
                }
                inner.entries.remove(key);
            }
        }
        None
    }

    pub fn insert(&self, key: String, report: ThreatReport) {
        if self.max_entries == 0 {
            return;
        }
        if let Ok(mut inner) = self.inner.lock() {
            let now = Instant::now();
            let ttl = self.ttl;
            inner
                .entries
                .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);

            // Still full after dropping expired entries: evict the oldest
            if inner.entries.len() >= self.max_entries && !inner.entries.contains_key(&key) {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.sequence)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    inner.entries.remove(&oldest);
                }
            }

            let sequence = inner.next_sequence;
            inner.next_sequence += 1;
            inner.entries.insert(
                key,
                CacheEntry {
                    report,
                    inserted_at: now,
                    sequence,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ThreatLevel, ThreatReport, UrlStructuralFindings};

    fn dummy_report(url: &str) -> ThreatReport {
        ThreatReport {
            url: url.to_string(),
            is_safe: true,
            threat_level: ThreatLevel::Safe,
            confidence: 0.0,
            threats: Vec::new(),
            recommendations: Vec::new(),
            url_findings: UrlStructuralFindings::default(),
            domain_findings: None,
            content_findings: None,
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = AnalysisCache::new(8, Duration::from_secs(60));
        let key = AnalysisCache::key("https://example.com", None);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), dummy_report("https://example.com"));

        let hit = cache.get(&key).expect("cached report");
        assert_eq!(hit.url, "https://example.com");
    }

    #[test]
    fn test_key_distinguishes_content() {
        let plain = AnalysisCache::key("https://example.com", None);
        let with_content = AnalysisCache::key("https://example.com", Some("hello"));
        assert_ne!(plain, with_content);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = AnalysisCache::new(8, Duration::ZERO);
        let key = AnalysisCache::key("https://example.com", None);

        cache.insert(key.clone(), dummy_report("https://example.com"));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_size_bound_evicts_oldest() {
        let cache = AnalysisCache::new(2, Duration::from_secs(60));

        cache.insert("a".to_string(), dummy_report("a"));
        cache.insert("b".to_string(), dummy_report("b"));
        cache.insert("c".to_string(), dummy_report("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_reinsert_does_not_evict_others() {
        let cache = AnalysisCache::new(2, Duration::from_secs(60));

        cache.insert("a".to_string(), dummy_report("a"));
        cache.insert("b".to_string(), dummy_report("b"));
        cache.insert("a".to_string(), dummy_report("a"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = AnalysisCache::new(0, Duration::from_secs(60));

        cache.insert("a".to_string(), dummy_report("a"));
        assert!(cache.is_empty());
    }
}
