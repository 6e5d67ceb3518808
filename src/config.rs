use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::{CadenceDirs, ResourceSpec};
use crate::error::FeedError;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub feed_url: String,
    pub store_url: String,
    #[serde(default)]
    pub staging_dir: Option<String>,
    #[serde(default)]
    pub weekly_dir: Option<String>,
    #[serde(default)]
    pub daily_dir: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub feed_url: String,
    pub store_url: String,
    pub staging_dir: Utf8PathBuf,
    pub cadence: CadenceDirs,
    pub resources: Vec<ResourceSpec>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, FeedError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("feedstage.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Err(FeedError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| FeedError::ConfigRead(config_path.clone()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| FeedError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        let defaults = CadenceDirs::default();
        ResolvedConfig {
            feed_url: config.feed_url,
            store_url: config.store_url,
            staging_dir: Utf8PathBuf::from(
                config.staging_dir.unwrap_or_else(|| "staging".to_string()),
            ),
            cadence: CadenceDirs {
                weekly: config.weekly_dir.unwrap_or(defaults.weekly),
                daily: config.daily_dir.unwrap_or(defaults.daily),
            },
            resources: config.resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_config_defaults() {
        let config = Config {
            feed_url: "https://feed.example.com".to_string(),
            store_url: "https://store.example.com".to_string(),
            staging_dir: None,
            weekly_dir: None,
            daily_dir: None,
            resources: Vec::new(),
        };

        let resolved = ConfigLoader::resolve_config(config);
        assert_eq!(resolved.staging_dir, Utf8PathBuf::from("staging"));
        assert_eq!(resolved.cadence, CadenceDirs::default());
    }

    #[test]
    fn resolve_config_cadence_overrides() {
        let config = Config {
            feed_url: "https://feed.example.com".to_string(),
            store_url: "https://store.example.com".to_string(),
            staging_dir: Some("/var/lib/feedstage".to_string()),
            weekly_dir: Some("wk".to_string()),
            daily_dir: Some("dy".to_string()),
            resources: Vec::new(),
        };

        let resolved = ConfigLoader::resolve_config(config);
        assert_eq!(resolved.staging_dir, Utf8PathBuf::from("/var/lib/feedstage"));
        assert_eq!(resolved.cadence.weekly, "wk");
        assert_eq!(resolved.cadence.daily, "dy");
    }
}
