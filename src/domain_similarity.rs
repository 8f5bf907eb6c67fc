use crate::report::DomainCheckFindings;

/// Well-known legitimate second-level domains, in fixed scan order.
/// Spoof detection reports the FIRST reference that falls inside the
/// similarity window, not the closest one; reordering this list changes
/// results.
pub const LEGITIMATE_DOMAINS: [&str; 12] = [
    "google.com",
    "facebook.com",
    "amazon.com",
    "microsoft.com",
    "apple.com",
    "paypal.com",
    "netflix.com",
    "linkedin.com",
    "twitter.com",
    "instagram.com",
    "github.com",
    "stackoverflow.com",
];

/// Confusable lookalikes for common Latin letters. The ASCII substitutes
/// (`0`, `1`, `l`) are listed for completeness only; the presence scan
/// fires solely on the non-ASCII entries, since nearly every legitimate
/// domain contains an `l` or a digit.
const HOMOGRAPH_TABLE: &[(char, &[char])] = &[
    ('a', &['а', 'α']),           // Cyrillic a, Greek alpha
    ('e', &['е', 'ε']),           // Cyrillic ie, Greek epsilon
    ('o', &['о', 'ο', '0']),      // Cyrillic o, Greek omicron, zero
    ('i', &['і', 'ι', '1', 'l']), // Cyrillic i, Greek iota, one, ell
    ('c', &['с', 'ϲ']),           // Cyrillic es, Greek lunate sigma
];

/// Similarity window for spoof detection: close to a reference domain,
/// but not an exact match.
const SPOOF_SIMILARITY_FLOOR: f64 = 0.7;

/// Compares hostnames against the reference set of legitimate domains
/// via Levenshtein edit distance, and scans for confusable-character
/// (homograph) substitution.
pub struct DomainSimilarityDetector {
    reference_domains: Vec<String>,
}

impl Default for DomainSimilarityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainSimilarityDetector {
    pub fn new() -> Self {
        Self::with_domains(LEGITIMATE_DOMAINS.iter().map(|d| d.to_string()).collect())
    }

    pub fn with_domains(reference_domains: Vec<String>) -> Self {
        Self { reference_domains }
    }

    /// Run both the spoof and homograph checks against a hostname.
    /// `is_known_malicious` is left untouched; blacklist membership is
    /// the aggregator's concern.
    pub fn analyze(&self, domain: &str) -> DomainCheckFindings {
        let mut findings = self.check_spoofing(domain);
        findings.is_homograph = contains_homograph(domain);
        findings
    }

    /// Edit-distance comparison against the reference list. The first
    /// reference whose similarity lies strictly inside (0.7, 1.0) wins
    /// and iteration stops; exact matches are never flagged.
    pub fn check_spoofing(&self, domain: &str) -> DomainCheckFindings {
        let mut findings = DomainCheckFindings::default();
        let candidate = canonicalize_domain(domain);
        let candidate_len = candidate.chars().count();

        for reference in &self.reference_domains {
            let distance = levenshtein(&candidate, reference);
            let max_len = candidate_len.max(reference.chars().count());
            if max_len == 0 {
                continue;
            }
            let similarity = 1.0 - distance as f64 / max_len as f64;
            if similarity > SPOOF_SIMILARITY_FLOOR && similarity < 1.0 {
                log::debug!(
                    "{candidate} resembles {reference} (distance {distance}, similarity {similarity:.2})"
                );
                findings.is_spoofed = true;
                findings.similar_to = Some(reference.clone());
                findings.edit_distance = Some(distance);
                break;
            }
        }

        findings
    }

    /// Whether the normalized hostname is an exact member of the
    /// reference list.
    pub fn is_reference_domain(&self, domain: &str) -> bool {
        let candidate = canonicalize_domain(domain);
        self.reference_domains.iter().any(|d| *d == candidate)
    }
}

/// Lowercase and strip a single leading `www.`.
fn canonicalize_domain(domain: &str) -> String {
    let domain_lower = domain.to_lowercase();
    match domain_lower.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => domain_lower,
    }
}

/// Binary presence test: any confusable character anywhere in the string
/// sets the flag. No position or count is recorded; this is a coarse
/// best-effort signal, not a structural per-script analysis.
pub fn contains_homograph(domain: &str) -> bool {
    domain.chars().any(|c| {
        !c.is_ascii()
            && HOMOGRAPH_TABLE
                .iter()
                .any(|(_, lookalikes)| lookalikes.contains(&c))
    })
}

/// Standard dynamic-programming Levenshtein distance; insert, delete and
/// substitute each cost 1. O(n*m) time and space over the two inputs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}
