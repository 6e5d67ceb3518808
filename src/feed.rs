use std::io;
use std::time::Duration;

use camino::Utf8Path;
use reqwest::blocking::Client;

use crate::domain::DirectoryEntry;
use crate::error::FeedError;

/// Remote feed transport: directory listing plus archive download. The
/// download must leave the archive readable at `dest/<archive name>`.
pub trait FeedTransport: Send + Sync {
    fn list(&self, dir: &str) -> Result<Vec<DirectoryEntry>, FeedError>;
    fn fetch(&self, remote_path: &str, dest: &Utf8Path) -> Result<(), FeedError>;
}

/// Blocking HTTP feed client. Listing a directory is a GET on the directory
/// path returning a JSON array of entries; fetching is a GET on the file
/// path streamed to disk.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
    base_url: String,
}

impl HttpFeedClient {
    pub fn new(base_url: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(format!("feedstage/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FeedError::FeedHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl FeedTransport for HttpFeedClient {
    fn list(&self, dir: &str) -> Result<Vec<DirectoryEntry>, FeedError> {
        let response = self
            .client
            .get(self.url_for(dir))
            .send()
            .map_err(|err| FeedError::FeedHttp(err.to_string()))?;
        if !response.status().is_success() {
            return Err(FeedError::DirectoryNotFound(dir.to_string()));
        }
        response
            .json::<Vec<DirectoryEntry>>()
            .map_err(|err| FeedError::FeedHttp(err.to_string()))
    }

    fn fetch(&self, remote_path: &str, dest: &Utf8Path) -> Result<(), FeedError> {
        let file_name = remote_path.rsplit('/').next().unwrap_or(remote_path);
        let download_failed = |message: String| FeedError::DownloadFailed {
            archive: remote_path.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(self.url_for(remote_path))
            .send()
            .map_err(|err| download_failed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(download_failed(format!("status {}", response.status())));
        }

        // Stream into a tempfile next to the destination, then persist, so a
        // broken download never leaves a half-written archive behind.
        let mut temp = tempfile::Builder::new()
            .prefix("feedstage-dl")
            .tempfile_in(dest.as_std_path())
            .map_err(|err| download_failed(err.to_string()))?;
        io::copy(&mut response, temp.as_file_mut())
            .map_err(|err| download_failed(err.to_string()))?;
        temp.persist(dest.join(file_name).as_std_path())
            .map_err(|err| download_failed(err.to_string()))?;
        Ok(())
    }
}
