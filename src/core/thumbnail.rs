use crate::config::Config;
use crate::core::{Provider, VideoHost, VideoReference};
use crate::extractors::YouTube;
use crate::utils::{append_query, non_blank};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Thumbnail of one rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "url", rename_all = "snake_case")]
pub enum ThumbnailState {
    Resolved(String),
    /// Waiting on a metadata lookup.
    Pending,
    Unavailable,
}

/// Synchronous part of thumbnail resolution. An explicit image always wins.
pub fn resolve_thumbnail(reference: &VideoReference, explicit: Option<&str>) -> ThumbnailState {
    if let Some(url) = non_blank(explicit) {
        return ThumbnailState::Resolved(url.to_string());
    }

    match (reference.provider, reference.id.as_deref()) {
        (Provider::YouTube, Some(id)) => YouTube
            .thumbnail_url(id)
            .map(ThumbnailState::Resolved)
            .unwrap_or(ThumbnailState::Unavailable),
        (Provider::Vimeo, _) => ThumbnailState::Pending,
        _ => ThumbnailState::Unavailable,
    }
}

/// Rewrites a trailing `_<w>` / `_<w>x<h>` size suffix to `_<size_token>`.
/// URLs without such a suffix are returned unchanged.
pub fn upgrade_thumbnail_url(url: &str, size_token: &str) -> String {
    static SIZE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let pattern = SIZE_SUFFIX.get_or_init(|| {
        Regex::new(r"(?i)_\d+(?:x\d+)?(\.(?:jpe?g|png|webp|gif))?$").expect("valid size regex")
    });

    let (base, query) = match url.find('?') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };

    match pattern.captures(base) {
        Some(captures) => {
            let whole = captures.get(0).map(|m| m.start()).unwrap_or(base.len());
            let extension = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            format!("{}_{}{}{}", &base[..whole], size_token, extension, query)
        }
        None => url.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("invalid metadata response: {0}")]
    Decode(String),
    #[error("metadata has no thumbnail")]
    MissingThumbnail,
}

/// Subset of an oEmbed response the pipeline reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbedResponse {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[async_trait]
pub trait MetadataEndpoint: Send + Sync {
    fn name(&self) -> &str;
    async fn lookup(&self, canonical_url: &str) -> Result<OEmbedResponse, LookupError>;
}

/// oEmbed-style endpoint queried as `{base}?url={canonical_url}`.
pub struct OEmbedEndpoint {
    client: reqwest::Client,
    base: String,
}

impl OEmbedEndpoint {
    pub fn new(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub fn request_url(&self, canonical_url: &str) -> String {
        append_query(&self.base, &format!("url={}", urlencoding::encode(canonical_url)))
    }
}

#[async_trait]
impl MetadataEndpoint for OEmbedEndpoint {
    fn name(&self) -> &str {
        &self.base
    }

    async fn lookup(&self, canonical_url: &str) -> Result<OEmbedResponse, LookupError> {
        let request_url = self.request_url(canonical_url);
        debug!("Metadata lookup: {}", request_url);

        let response = self
            .client
            .get(&request_url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

pub struct ThumbnailResolver {
    primary: Box<dyn MetadataEndpoint>,
    fallback: Box<dyn MetadataEndpoint>,
    size_token: String,
}

impl ThumbnailResolver {
    pub fn new(
        primary: Box<dyn MetadataEndpoint>,
        fallback: Box<dyn MetadataEndpoint>,
        size_token: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            size_token: size_token.into(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = config.http_client()?;
        Ok(Self::new(
            Box::new(OEmbedEndpoint::new(client.clone(), config.oembed_endpoint.clone())),
            Box::new(OEmbedEndpoint::new(client, config.fallback_endpoint.clone())),
            config.thumbnail_size.clone(),
        ))
    }

    /// Asynchronous part of thumbnail resolution: asks the primary endpoint,
    /// then the fallback once. Every failure degrades to `None`.
    pub async fn fetch_remote_thumbnail(&self, reference: &VideoReference) -> Option<String> {
        if reference.provider != Provider::Vimeo {
            return None;
        }
        let canonical_url = reference.canonical_url.as_deref()?;

        for endpoint in [&self.primary, &self.fallback] {
            match Self::thumbnail_from(&**endpoint, canonical_url).await {
                Ok(url) => return Some(upgrade_thumbnail_url(&url, &self.size_token)),
                Err(e) => warn!(
                    "Thumbnail lookup via {} failed for {}: {}",
                    endpoint.name(),
                    canonical_url,
                    e
                ),
            }
        }

        None
    }

    async fn thumbnail_from(
        endpoint: &dyn MetadataEndpoint,
        canonical_url: &str,
    ) -> Result<String, LookupError> {
        let metadata = endpoint.lookup(canonical_url).await?;
        non_blank(metadata.thumbnail_url.as_deref())
            .map(str::to_string)
            .ok_or(LookupError::MissingThumbnail)
    }
}
