use std::time::Instant;

use camino::Utf8Path;
use tracing::{info, warn};

use crate::domain::{CadenceDirs, ResourceSpec, ZipCollection};
use crate::error::FeedError;
use crate::extract::ArchiveExtractor;
use crate::feed::FeedTransport;
use crate::resolve::most_recent_archives;

/// Result of one pipeline run. Archives processed before the first failure
/// keep their collections; the failing archive contributes nothing.
#[derive(Debug)]
pub struct ReadOutcome {
    pub collections: Vec<ZipCollection>,
    pub error: Option<FeedError>,
}

impl ReadOutcome {
    fn done(collections: Vec<ZipCollection>) -> Self {
        Self {
            collections,
            error: None,
        }
    }

    fn failed(collections: Vec<ZipCollection>, error: FeedError) -> Self {
        Self {
            collections,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Sequential pipeline: list the feed directory, resolve the most recent
/// archives for the resource, then download and extract each in turn.
pub struct FeedReader<T: FeedTransport> {
    transport: T,
    extractor: ArchiveExtractor,
}

impl<T: FeedTransport> FeedReader<T> {
    pub fn new(transport: T, cadence: CadenceDirs) -> Self {
        Self {
            transport,
            extractor: ArchiveExtractor::new(cadence),
        }
    }

    pub fn read(&self, spec: &ResourceSpec, dest: &Utf8Path) -> ReadOutcome {
        let (dir, term) = spec.split_archive();

        let mut entries = match self.transport.list(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("could not find {dir} on the feed");
                return ReadOutcome::failed(Vec::new(), err);
            }
        };
        if spec.is_weekly {
            entries.retain(|entry| entry.name.contains("full"));
        }

        let archives = match most_recent_archives(&entries, term) {
            Ok(archives) => archives,
            Err(err) => return ReadOutcome::failed(Vec::new(), err),
        };

        let members = spec.member_names();
        let mut collections = Vec::new();
        for archive in archives {
            if let Err(err) = self.download(dir, &archive, dest) {
                return ReadOutcome::failed(collections, err);
            }
            match self.extractor.extract(&archive, &members, dest) {
                Ok(files_to_write) => collections.push(ZipCollection {
                    archive,
                    files_to_write,
                }),
                Err(err) => return ReadOutcome::failed(collections, err),
            }
        }
        ReadOutcome::done(collections)
    }

    fn download(&self, dir: &str, archive: &str, dest: &Utf8Path) -> Result<(), FeedError> {
        let remote_path = if dir.is_empty() {
            archive.to_string()
        } else {
            format!("{dir}/{archive}")
        };
        let start = Instant::now();
        info!("downloading file [{remote_path}]");
        self.transport.fetch(&remote_path, dest)?;
        info!(
            "file [{remote_path}] was downloaded successfully in {:?}",
            start.elapsed()
        );
        Ok(())
    }
}
