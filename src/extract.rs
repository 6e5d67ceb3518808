use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use zip::ZipArchive;

use crate::domain::CadenceDirs;
use crate::error::FeedError;

/// Suffix stripped from requested member names before substring matching, so
/// `prices_2021.txt` also matches a member named `prices_2021_full.txt`.
const TEXT_EXT: &str = ".txt";

/// Copies selected members out of a downloaded archive into the cadence
/// partition under the staging root.
#[derive(Debug, Clone, Default)]
pub struct ArchiveExtractor {
    cadence: CadenceDirs,
}

impl ArchiveExtractor {
    pub fn new(cadence: CadenceDirs) -> Self {
        Self { cadence }
    }

    /// Extracts every archive member whose name contains one of the requested
    /// base names, returning the written names relative to the cadence
    /// directory in member-scan order. The cadence partition is chosen per
    /// archive: weekly when the archive name carries the "full" marker,
    /// daily otherwise. A member containing several requested base names is
    /// copied once per match.
    pub fn extract(
        &self,
        archive: &str,
        members: &[&str],
        dest: &Utf8Path,
    ) -> Result<Vec<String>, FeedError> {
        let archive_path = dest.join(archive);
        let file = fs::File::open(archive_path.as_std_path()).map_err(|err| {
            FeedError::ArchiveOpenFailed {
                archive: archive.to_string(),
                message: err.to_string(),
            }
        })?;
        let mut reader = ZipArchive::new(file).map_err(|err| FeedError::ArchiveOpenFailed {
            archive: archive.to_string(),
            message: err.to_string(),
        })?;

        let out_dir = self.cadence_dir(archive, dest);
        fs::create_dir_all(out_dir.as_std_path()).map_err(|err| {
            FeedError::DestinationWriteFailed {
                path: out_dir.to_string(),
                message: err.to_string(),
            }
        })?;

        // Names are collected first so a member can be reopened once per
        // matching base name below.
        let mut entry_names = Vec::with_capacity(reader.len());
        for index in 0..reader.len() {
            let name = reader
                .name_for_index(index)
                .ok_or_else(|| FeedError::MemberOpenFailed {
                    member: format!("{archive}#{index}"),
                    message: "member name is not valid UTF-8".to_string(),
                })?;
            entry_names.push(name.to_string());
        }

        let mut files_to_write = Vec::new();
        for (index, entry_name) in entry_names.iter().enumerate() {
            for member in members {
                let base_name = member.strip_suffix(TEXT_EXT).unwrap_or(member);
                if !entry_name.contains(base_name) {
                    continue;
                }
                let mut entry =
                    reader
                        .by_index(index)
                        .map_err(|err| FeedError::MemberOpenFailed {
                            member: entry_name.clone(),
                            message: err.to_string(),
                        })?;
                let out_path = out_dir.join(entry_name);
                let mut out_file =
                    fs::File::create(out_path.as_std_path()).map_err(|err| {
                        FeedError::DestinationWriteFailed {
                            path: out_path.to_string(),
                            message: err.to_string(),
                        }
                    })?;
                io::copy(&mut entry, &mut out_file).map_err(|err| {
                    FeedError::DestinationWriteFailed {
                        path: out_path.to_string(),
                        message: err.to_string(),
                    }
                })?;
                files_to_write.push(entry_name.clone());
            }
        }
        Ok(files_to_write)
    }

    fn cadence_dir(&self, archive: &str, dest: &Utf8Path) -> Utf8PathBuf {
        if archive.contains("full") {
            dest.join(&self.cadence.weekly)
        } else {
            dest.join(&self.cadence.daily)
        }
    }
}
