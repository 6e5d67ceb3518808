use regex::Regex;

use crate::error::FeedError;

/// Version pair embedded in an archive filename, e.g. `prices_v2_3.zip`
/// carries major 2 and minor 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveVersion {
    pub major: u32,
    pub minor: u32,
}

impl ArchiveVersion {
    pub const ZERO: ArchiveVersion = ArchiveVersion { major: 0, minor: 0 };

    /// Strict major-then-minor recency comparison.
    pub fn is_newer_than(&self, other: &ArchiveVersion) -> bool {
        self.major > other.major || (self.major == other.major && self.minor > other.minor)
    }
}

/// Parses the version pair out of an archive filename. The `.zip` suffix is
/// stripped first; the major version is the single `v<digits>` run in the
/// name, the minor version the single trailing `_<digits>` run.
pub fn parse_version(file_name: &str) -> Result<ArchiveVersion, FeedError> {
    let cleaned = file_name.strip_suffix(".zip").unwrap_or(file_name);
    let major = extract_component(cleaned, r"v[0-9]+", "v", file_name)?;
    let minor = extract_component(cleaned, r"_[0-9]+$", "_", file_name)?;
    Ok(ArchiveVersion { major, minor })
}

fn extract_component(
    cleaned: &str,
    pattern: &str,
    prefix: &str,
    file_name: &str,
) -> Result<u32, FeedError> {
    let regex = Regex::new(pattern).unwrap();
    let mut matches = regex.find_iter(cleaned);
    let first = matches
        .next()
        .ok_or_else(|| FeedError::VersionMissing(file_name.to_string()))?;
    if matches.next().is_some() {
        return Err(FeedError::AmbiguousVersion(file_name.to_string()));
    }
    // The pattern guarantees a digit run; only overflow can fail here.
    first
        .as_str()
        .trim_start_matches(prefix)
        .parse()
        .map_err(|_| FeedError::VersionMissing(file_name.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_well_formed_name() {
        let version = parse_version("prices_v2_3.zip").unwrap();
        assert_eq!(version, ArchiveVersion { major: 2, minor: 3 });
    }

    #[test]
    fn parse_full_archive_name() {
        let version = parse_version("edm_premium_full_v1_9.zip").unwrap();
        assert_eq!(version, ArchiveVersion { major: 1, minor: 9 });
    }

    #[test]
    fn missing_major_version() {
        let err = parse_version("prices_2_3.zip").unwrap_err();
        assert_matches!(err, FeedError::VersionMissing(_));
    }

    #[test]
    fn missing_minor_version() {
        let err = parse_version("prices_v2.zip").unwrap_err();
        assert_matches!(err, FeedError::VersionMissing(_));
    }

    #[test]
    fn duplicate_major_marker_is_ambiguous() {
        let err = parse_version("v1_prices_v2_3.zip").unwrap_err();
        assert_matches!(err, FeedError::AmbiguousVersion(_));
    }

    #[test]
    fn suffix_stripping_keeps_minor_anchored() {
        // Without stripping, the trailing `_<digits>` anchor would never
        // match a `.zip` name.
        let version = parse_version("prices_v10_21.zip").unwrap();
        assert_eq!(
            version,
            ArchiveVersion {
                major: 10,
                minor: 21
            }
        );
    }

    #[test]
    fn recency_ordering() {
        let v2_3 = ArchiveVersion { major: 2, minor: 3 };
        let v2_4 = ArchiveVersion { major: 2, minor: 4 };
        let v3_0 = ArchiveVersion { major: 3, minor: 0 };
        assert!(v2_4.is_newer_than(&v2_3));
        assert!(v3_0.is_newer_than(&v2_4));
        assert!(!v2_3.is_newer_than(&v2_3));
    }
}
