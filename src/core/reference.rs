use crate::core::{ProjectRecord, VideoHost};
use crate::extractors::{Vimeo, YouTube};
use crate::utils::has_media_extension;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "vimeo")]
    Vimeo,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "none")]
    None,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::YouTube => write!(f, "youtube"),
            Provider::Vimeo => write!(f, "vimeo"),
            Provider::File => write!(f, "file"),
            Provider::Other => write!(f, "other"),
            Provider::None => write!(f, "none"),
        }
    }
}

/// Canonical playable reference derived from a project record.
///
/// `canonical_url` is set for every provider except [`Provider::None`] and
/// doubles as the cache key for thumbnail lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    pub provider: Provider,
    pub id: Option<String>,
    pub canonical_url: Option<String>,
}

impl VideoReference {
    pub fn none() -> Self {
        Self {
            provider: Provider::None,
            id: None,
            canonical_url: None,
        }
    }

    pub fn is_playable(&self) -> bool {
        self.provider != Provider::None
    }

    fn hosted(host: &dyn VideoHost, id: String, canonical_url: String) -> Self {
        Self {
            provider: host.provider(),
            id: Some(id),
            canonical_url: Some(canonical_url),
        }
    }

    /// Vimeo URLs are kept verbatim so author-set query parameters survive.
    fn vimeo_on_domain(raw: &str, id: Option<String>) -> Self {
        Self {
            provider: Provider::Vimeo,
            id,
            canonical_url: Some(raw.to_string()),
        }
    }

    fn verbatim(provider: Provider, raw: &str) -> Self {
        Self {
            provider,
            id: None,
            canonical_url: Some(raw.to_string()),
        }
    }
}

pub fn normalize(record: &ProjectRecord) -> VideoReference {
    match record.video_source() {
        Some((field, raw)) => {
            let reference = classify(raw);
            debug!(field, raw, provider = %reference.provider, "normalized video reference");
            reference
        }
        None => VideoReference::none(),
    }
}

/// Classifies a single non-empty reference string.
pub fn classify(raw: &str) -> VideoReference {
    let raw = raw.trim();
    if raw.is_empty() {
        return VideoReference::none();
    }

    let youtube_id = YouTube.extract_video_id(raw);
    let vimeo_id = Vimeo.extract_video_id(raw);

    // A vimeo.com host wins even when the YouTube parser found a plausible id
    if Vimeo.host_matches(raw) {
        return VideoReference::vimeo_on_domain(raw, vimeo_id);
    }

    match (youtube_id, vimeo_id) {
        (Some(_), Some(vimeo)) if raw.bytes().all(|b| b.is_ascii_digit()) => {
            let canonical = Vimeo.canonical_url(&vimeo);
            VideoReference::hosted(&Vimeo, vimeo, canonical)
        }
        (Some(youtube), _) => {
            let canonical = YouTube.canonical_url(&youtube);
            VideoReference::hosted(&YouTube, youtube, canonical)
        }
        (None, Some(vimeo)) => {
            let canonical = Vimeo.canonical_url(&vimeo);
            VideoReference::hosted(&Vimeo, vimeo, canonical)
        }
        (None, None) if has_media_extension(raw) => VideoReference::verbatim(Provider::File, raw),
        (None, None) => VideoReference::verbatim(Provider::Other, raw),
    }
}
