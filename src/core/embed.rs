use crate::core::{VideoHost, VideoReference};
use crate::extractors::{Vimeo, YouTube};
use crate::utils::{escape_html, has_media_extension};

const GENERIC_ALLOW: &str = "autoplay; fullscreen; picture-in-picture";

/// Player shape chosen for a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    Native { src: String },
    Hosted { src: String, allow: &'static str, host: &'static str },
    Generic { src: String },
}

impl Embed {
    /// Media files first, then Vimeo by host, then anything YouTube can parse,
    /// then a generic iframe of the raw input.
    pub fn classify(input: &str) -> Self {
        let input = input.trim();

        if has_media_extension(input) {
            return Embed::Native { src: input.to_string() };
        }

        if Vimeo.host_matches(input) {
            if let Some(src) = Vimeo.embed_url(input) {
                return Self::hosted(&Vimeo, src);
            }
        } else if let Some(src) = YouTube.embed_url(input) {
            return Self::hosted(&YouTube, src);
        }

        Embed::Generic { src: input.to_string() }
    }

    fn hosted(host: &dyn VideoHost, src: String) -> Self {
        Embed::Hosted {
            src,
            allow: host.iframe_allow(),
            host: host.name(),
        }
    }

    pub fn src(&self) -> &str {
        match self {
            Embed::Native { src } | Embed::Hosted { src, .. } | Embed::Generic { src } => src,
        }
    }

    pub fn to_markup(&self) -> String {
        match self {
            Embed::Native { src } => format!(
                "<video src=\"{}\" controls autoplay playsinline></video>",
                escape_html(src)
            ),
            Embed::Hosted { src, allow, .. } => iframe(src, allow),
            Embed::Generic { src } => iframe(src, GENERIC_ALLOW),
        }
    }
}

fn iframe(src: &str, allow: &str) -> String {
    format!(
        "<iframe src=\"{}\" allow=\"{}\" allowfullscreen></iframe>",
        escape_html(src),
        allow
    )
}

/// Player markup for a clicked reference string.
pub fn build_embed(input: &str) -> String {
    Embed::classify(input).to_markup()
}

/// Player markup for a normalized reference; `None` when nothing is playable.
pub fn build_embed_for(reference: &VideoReference) -> Option<String> {
    reference
        .canonical_url
        .as_deref()
        .filter(|_| reference.is_playable())
        .map(build_embed)
}
