use crate::core::ProjectRecord;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("data source returned HTTP {0}")]
    Status(u16),
    #[error("invalid project data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where project data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl DataSource {
    /// `http(s)` URLs are fetched, anything else is read as a local path.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DataSource::Remote(url),
            _ => DataSource::File(PathBuf::from(input)),
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

pub struct ProjectLoader {
    client: reqwest::Client,
}

impl ProjectLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn load(&self, source: &DataSource) -> Result<Vec<ProjectRecord>, LoadError> {
        let body = match source {
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?,
            DataSource::Remote(url) => self.fetch(url).await?,
        };

        parse_records(&body)
    }

    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Parses the project collection. Entries that are not usable records are
/// skipped rather than failing the whole load.
pub fn parse_records(body: &str) -> Result<Vec<ProjectRecord>, LoadError> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    let total = entries.len();

    let records: Vec<ProjectRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                warn!("Skipping project entry {}: not an object", index);
                return None;
            }
            match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping project entry {}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    debug!("Parsed {} of {} project entries", records.len(), total);
    Ok(records)
}
