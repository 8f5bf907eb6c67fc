pub mod aggregator;
pub mod cache;
pub mod config;
pub mod content_analyzer;
pub mod domain_similarity;
pub mod report;
pub mod url_analyzer;

pub use aggregator::ThreatAggregator;
pub use cache::AnalysisCache;
pub use config::{CacheConfig, ScannerConfig, ScoreWeights};
pub use content_analyzer::ContentAnalyzer;
pub use domain_similarity::DomainSimilarityDetector;
pub use report::{
    ContentFindings, DomainCheckFindings, ThreatLevel, ThreatReport, UrlStructuralFindings,
};
pub use url_analyzer::UrlStructuralAnalyzer;
