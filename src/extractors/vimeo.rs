use crate::core::{Provider, VideoHost};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

const DOMAIN: &str = "vimeo.com";
const PLAYER_HOST: &str = "player.vimeo.com";
const PLAYER_PARAMS: [(&str, &str); 8] = [
    ("autoplay", "1"),
    ("muted", "0"),
    ("controls", "1"),
    ("title", "0"),
    ("byline", "0"),
    ("portrait", "0"),
    ("dnt", "1"),
    ("transparent", "0"),
];

pub struct Vimeo;

/// Path shapes in match order. The player shape must run first because
/// player and showcase URLs carry numeric segments that are not the video id.
/// A trailing numeric segment beats a leading one (`/groups/<n>/videos/<id>`);
/// the leading form only covers unlisted `/<id>/<hash>` links.
fn path_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"/video/(\d+)(?:/|$)",
            r"^/channels/[^/]+/(\d+)(?:/|$)",
            r"^/album/\d+/video/(\d+)(?:/|$)",
            r"/(\d+)$",
            r"^/(\d+)/[A-Za-z0-9]+$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid vimeo path regex"))
        .collect()
    })
}

fn is_vimeo_host(url: &Url) -> bool {
    url.host_str().is_some_and(|host| host.contains(DOMAIN))
}

/// Collapses repeated slashes and drops the trailing one: `//a///b/` -> `/a/b`.
fn collapse_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Extracts a numeric Vimeo id from a bare id (6+ digits) or a vimeo.com URL.
pub fn parse_vimeo_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.len() >= 6 && input.bytes().all(|b| b.is_ascii_digit()) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;
    if !is_vimeo_host(&url) {
        return None;
    }

    let path = collapse_path(url.path());
    path_patterns()
        .iter()
        .find_map(|pattern| pattern.captures(&path))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

fn is_player_url(url: &Url) -> bool {
    url.host_str() == Some(PLAYER_HOST) && url.path().starts_with("/video/")
}

/// Adds the playback parameters the URL does not already set.
fn with_player_params(mut url: Url) -> String {
    let existing: HashSet<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in PLAYER_PARAMS {
            if !existing.contains(key) {
                pairs.append_pair(key, value);
            }
        }
    }
    url.to_string()
}

impl VideoHost for Vimeo {
    fn name(&self) -> &'static str {
        "Vimeo"
    }

    fn provider(&self) -> Provider {
        Provider::Vimeo
    }

    fn suitable(&self, url: &Url) -> bool {
        is_vimeo_host(url)
    }

    fn extract_video_id(&self, input: &str) -> Option<String> {
        parse_vimeo_id(input)
    }

    fn canonical_url(&self, id: &str) -> String {
        format!("https://{}/{}", DOMAIN, id)
    }

    fn thumbnail_url(&self, _id: &str) -> Option<String> {
        // Needs an oEmbed lookup
        None
    }

    fn embed_url(&self, input: &str) -> Option<String> {
        let input = input.trim();
        let player = match Url::parse(input) {
            Ok(url) if is_player_url(&url) => url,
            _ => {
                let id = parse_vimeo_id(input)?;
                Url::parse(&format!("https://{}/video/{}", PLAYER_HOST, id)).ok()?
            }
        };
        Some(with_player_params(player))
    }

    fn iframe_allow(&self) -> &'static str {
        "autoplay; fullscreen; picture-in-picture"
    }
}
