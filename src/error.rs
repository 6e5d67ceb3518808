use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FeedError {
    #[error("remote directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("the version is missing or not correctly specified in {0}")]
    VersionMissing(String),

    #[error("more than one version marker found in {0}")]
    AmbiguousVersion(String),

    #[error(
        "found no archive matching name {term}, major version {major}, or minor version {minor}"
    )]
    NoMatchingArchive {
        term: String,
        major: u32,
        minor: u32,
    },

    #[error("failed to download {archive}: {message}")]
    DownloadFailed { archive: String, message: String },

    #[error("failed to open archive {archive}: {message}")]
    ArchiveOpenFailed { archive: String, message: String },

    #[error("failed to open archive member {member}: {message}")]
    MemberOpenFailed { member: String, message: String },

    #[error("failed to write {path}: {message}")]
    DestinationWriteFailed { path: String, message: String },

    #[error("failed to upload {key}: {message}")]
    UploadFailed { key: String, message: String },

    #[error("missing config file feedstage.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("feed request failed: {0}")]
    FeedHttp(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
