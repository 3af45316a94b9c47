//! Bucket naming: `<prefix>-v<N>`.

use std::fmt;

/// A versioned bucket name such as `sahajyog-v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName {
    prefix: String,
    version: u32,
}

impl BucketName {
    pub fn new(prefix: impl Into<String>, version: u32) -> Self {
        Self { prefix: prefix.into(), version }
    }

    /// Parse a name following the `<prefix>-v<N>` convention.
    ///
    /// Returns `None` for names that do not carry a version suffix; such
    /// buckets are never current and get swept on activation.
    pub fn parse(name: &str) -> Option<Self> {
        let (prefix, version) = name.rsplit_once("-v")?;
        if prefix.is_empty() || version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let version = version.parse().ok()?;
        Some(Self { prefix: prefix.to_string(), version })
    }

    /// Whether `name` is this bucket under a different version.
    pub fn is_older_sibling(&self, name: &str) -> bool {
        Self::parse(name).is_some_and(|other| other.prefix == self.prefix && other.version < self.version)
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-v{}", self.prefix, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BucketName::new("sahajyog", 1).to_string(), "sahajyog-v1");
    }

    #[test]
    fn test_parse_with_dashes_in_prefix() {
        let name = BucketName::parse("youtube-resources-v12").unwrap();
        assert_eq!(name, BucketName::new("youtube-resources", 12));
    }

    #[test]
    fn test_parse_rejects_unversioned() {
        assert!(BucketName::parse("workbox-precache").is_none());
        assert!(BucketName::parse("-v1").is_none());
        assert!(BucketName::parse("app-v").is_none());
        assert!(BucketName::parse("app-v1a").is_none());
        assert!(BucketName::parse("app-v+1").is_none());
    }

    #[test]
    fn test_is_older_sibling() {
        let current = BucketName::new("sahajyog", 3);
        assert!(current.is_older_sibling("sahajyog-v2"));
        assert!(!current.is_older_sibling("sahajyog-v3"));
        assert!(!current.is_older_sibling("sahajyog-v4"));
        assert!(!current.is_older_sibling("other-v1"));
    }
}
