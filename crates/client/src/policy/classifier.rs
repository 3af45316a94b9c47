//! Origin classification by host name.

use serde::{Deserialize, Serialize};
use url::Url;

/// Which strategy a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginClass {
    /// Host matches the allowlist: cache-first.
    Accelerated,
    /// Everything else: network-first.
    Default,
}

/// Maps a URL's host to an [`OriginClass`] by substring match.
#[derive(Debug, Clone)]
pub struct OriginClassifier {
    patterns: Vec<String>,
}

impl OriginClassifier {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn classify(&self, url: &Url) -> OriginClass {
        match url.host_str() {
            Some(host) if self.matches_host(host) => OriginClass::Accelerated,
            _ => OriginClass::Default,
        }
    }

    fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.patterns.iter().any(|p| host.contains(p.as_str()))
    }
}
