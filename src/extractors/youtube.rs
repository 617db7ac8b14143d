use crate::core::{Provider, VideoHost};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const SHORT_DOMAIN: &str = "youtu.be";
const EMBED_PARAMS: &str = "autoplay=1&rel=0&modestbranding=1";

pub struct YouTube;

/// Extracts a YouTube video id from a bare id, a watch URL, a `youtu.be`
/// short link or an `/embed/` URL.
pub fn parse_youtube_id(input: &str) -> Option<String> {
    static BARE_ID: OnceLock<Regex> = OnceLock::new();

    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Raw ids are accepted in place of a URL
    let bare = BARE_ID.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{10,}$").expect("valid id regex"));
    if bare.is_match(input) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;
    extract_from_url(&url)
}

fn extract_from_url(url: &Url) -> Option<String> {
    if url.host_str().is_some_and(|host| host.contains(SHORT_DOMAIN)) {
        return url
            .path_segments()?
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string());
    }

    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        if !v.is_empty() {
            return Some(v.to_string());
        }
    }

    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "embed")?;
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

impl VideoHost for YouTube {
    fn name(&self) -> &'static str {
        "YouTube"
    }

    fn provider(&self) -> Provider {
        Provider::YouTube
    }

    fn suitable(&self, url: &Url) -> bool {
        if let Some(host) = url.host_str() {
            host.contains("youtube.com") || host.contains(SHORT_DOMAIN)
        } else {
            false
        }
    }

    fn extract_video_id(&self, input: &str) -> Option<String> {
        parse_youtube_id(input)
    }

    fn canonical_url(&self, id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", id)
    }

    fn thumbnail_url(&self, id: &str) -> Option<String> {
        Some(format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id))
    }

    fn embed_url(&self, input: &str) -> Option<String> {
        let id = parse_youtube_id(input)?;
        Some(format!("https://www.youtube.com/embed/{}?{}", id, EMBED_PARAMS))
    }

    fn iframe_allow(&self) -> &'static str {
        "autoplay; encrypted-media"
    }
}
