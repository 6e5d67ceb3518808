use serde::{Deserialize, Serialize};

/// One entry of a remote directory listing. The transport reports size and
/// modification time alongside the name, but only the name drives resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified: Option<String>,
}

impl DirectoryEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            modified: None,
        }
    }
}

/// Caller-supplied description of one feed resource: which archive to look
/// for and which member files to pull out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Remote directory plus search-term basename, e.g. `datasets/prices`.
    pub archive: String,
    /// Semicolon-delimited member file names to extract.
    pub file_names: String,
    /// Weekly cadence restricts resolution to "full" archives.
    #[serde(default)]
    pub is_weekly: bool,
}

impl ResourceSpec {
    /// Splits `archive` into the remote directory and the search term, the
    /// same way a final path segment is peeled off. No slash means the whole
    /// value is the search term and the directory is empty.
    pub fn split_archive(&self) -> (&str, &str) {
        match self.archive.rsplit_once('/') {
            Some((dir, term)) => (dir, term),
            None => ("", self.archive.as_str()),
        }
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.file_names.split(';').collect()
    }
}

/// Record of one processed archive: its name and the member files that were
/// staged from it, relative to the cadence directory, in archive scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCollection {
    pub archive: String,
    pub files_to_write: Vec<String>,
}

/// Names of the two cadence partitions under the staging root. The selection
/// logic keys off the "full" marker in the archive name regardless of what
/// the partitions are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadenceDirs {
    pub weekly: String,
    pub daily: String,
}

impl Default for CadenceDirs {
    fn default() -> Self {
        Self {
            weekly: "weekly".to_string(),
            daily: "daily".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_archive_peels_search_term() {
        let spec = ResourceSpec {
            archive: "datasets/edm/prices".to_string(),
            file_names: String::new(),
            is_weekly: false,
        };
        assert_eq!(spec.split_archive(), ("datasets/edm", "prices"));
    }

    #[test]
    fn split_archive_without_directory() {
        let spec = ResourceSpec {
            archive: "prices".to_string(),
            file_names: String::new(),
            is_weekly: false,
        };
        assert_eq!(spec.split_archive(), ("", "prices"));
    }

    #[test]
    fn member_names_split_on_semicolon() {
        let spec = ResourceSpec {
            archive: String::new(),
            file_names: "prices.txt;rates.txt".to_string(),
            is_weekly: false,
        };
        assert_eq!(spec.member_names(), vec!["prices.txt", "rates.txt"]);
    }
}
