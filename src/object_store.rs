use std::fs;
use std::time::Duration;

use camino::Utf8Path;
use reqwest::blocking::{Body, Client};

use crate::error::FeedError;

/// Durable object store: writes a local file under a storage key and reports
/// the number of bytes written.
pub trait ObjectStore: Send + Sync {
    fn put(&self, key: &str, local_path: &Utf8Path) -> Result<u64, FeedError>;
}

/// Blocking HTTP object store: PUTs the file body under the key path.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
}

impl HttpObjectStore {
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
}

impl ObjectStore for HttpObjectStore {
    fn put(&self, key: &str, local_path: &Utf8Path) -> Result<u64, FeedError> {
        let upload_failed = |message: String| FeedError::UploadFailed {
            key: key.to_string(),
            message,
        };

        let file = fs::File::open(local_path.as_std_path())
            .map_err(|err| upload_failed(err.to_string()))?;
        let size = file
            .metadata()
            .map_err(|err| upload_failed(err.to_string()))?
            .len();

        let response = self
            .client
            .put(format!("{}/{}", self.base_url, key.trim_start_matches('/')))
            .body(Body::new(file))
            .send()
            .map_err(|err| upload_failed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(upload_failed(format!("status {}", response.status())));
        }
        Ok(size)
    }
}
