use crate::domain::DirectoryEntry;
use crate::error::FeedError;
use crate::version::{ArchiveVersion, parse_version};

/// First resolver pass: the strictly-greatest version pair across the whole
/// listing, seeded at zero. Every entry must parse; one malformed name
/// anywhere fails the scan, even when the entry is unrelated to the search
/// term.
pub fn most_recent_version(entries: &[DirectoryEntry]) -> Result<ArchiveVersion, FeedError> {
    let mut best = ArchiveVersion::ZERO;
    for entry in entries {
        let version = parse_version(&entry.name)?;
        if version.is_newer_than(&best) {
            best = version;
        }
    }
    Ok(best)
}

/// Second resolver pass: every entry whose name contains the search term and
/// the decimal text of both resolved version numbers. The version match is a
/// substring match on the numeric text, not a structural comparison, so a
/// minor version `1` also matches inside an unrelated `21`.
pub fn select_matching(
    entries: &[DirectoryEntry],
    term: &str,
    version: ArchiveVersion,
) -> Vec<String> {
    let major = version.major.to_string();
    let minor = version.minor.to_string();
    entries
        .iter()
        .filter(|entry| {
            entry.name.contains(term)
                && entry.name.contains(major.as_str())
                && entry.name.contains(minor.as_str())
        })
        .map(|entry| entry.name.clone())
        .collect()
}

/// Resolves the archives to process: scans the full listing for the most
/// recent version, then collects the names matching the search term at that
/// version. More than one archive can share the resolved version.
pub fn most_recent_archives(
    entries: &[DirectoryEntry],
    term: &str,
) -> Result<Vec<String>, FeedError> {
    let best = most_recent_version(entries)?;
    let matching = select_matching(entries, term, best);
    if matching.is_empty() {
        return Err(FeedError::NoMatchingArchive {
            term: term.to_string(),
            major: best.major,
            minor: best.minor,
        });
    }
    Ok(matching)
}
