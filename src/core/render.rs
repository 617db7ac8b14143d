use crate::core::{ProjectRecord, ThumbnailState, VideoReference};
use crate::utils::{escape_html, is_missing_sentinel, non_blank};

pub const LOAD_ERROR_MESSAGE: &str = "Could not load projects.";

/// One credit line; blank values render nothing, the `CHANGE` sentinel is flagged.
pub fn render_info(label: &str, value: Option<&str>) -> String {
    let Some(value) = non_blank(value) else {
        return String::new();
    };

    let class = if is_missing_sentinel(value) {
        " class=\"is-missing\""
    } else {
        ""
    };
    format!(
        "<li{}><strong>{}:</strong> {}</li>",
        class,
        escape_html(label),
        escape_html(value)
    )
}

/// Clickable thumbnail, or the inert NO VIDEO placeholder when nothing is playable.
///
/// Only interactive variants carry `data-video`, so delegated click handlers
/// skip the placeholder.
pub fn render_thumbnail(title: &str, reference: &VideoReference, state: &ThumbnailState) -> String {
    let Some(video) = reference.canonical_url.as_deref().filter(|_| reference.is_playable()) else {
        return concat!(
            "<div class=\"thumb is-missing\" aria-disabled=\"true\" title=\"No video provided\">",
            "<span class=\"missing-label\">NO VIDEO</span>",
            "</div>"
        )
        .to_string();
    };
    let video = escape_html(video);

    match state {
        ThumbnailState::Resolved(src) => format!(
            "<button class=\"thumb thumb--clean\" type=\"button\" data-video=\"{}\">\
             <img src=\"{}\" alt=\"{} thumbnail\" loading=\"lazy\">\
             <div class=\"play-btn\"></div></button>",
            video,
            escape_html(src),
            escape_html(title)
        ),
        ThumbnailState::Pending => format!(
            "<button class=\"thumb thumb--clean is-loading\" type=\"button\" \
             data-video=\"{}\" data-thumb=\"pending\">\
             <div class=\"play-btn\"></div></button>",
            video
        ),
        ThumbnailState::Unavailable => format!(
            "<button class=\"thumb thumb--clean thumb--no-image\" type=\"button\" \
             data-video=\"{}\">\
             <div class=\"play-btn\"></div></button>",
            video
        ),
    }
}

pub fn render_card(
    record: &ProjectRecord,
    reference: &VideoReference,
    state: &ThumbnailState,
) -> String {
    let title = non_blank(record.title.as_deref());
    let thumbnail = render_thumbnail(title.unwrap_or("Project"), reference, state);
    let info: String = record
        .info_fields()
        .iter()
        .map(|(label, value)| render_info(label, *value))
        .collect();

    format!(
        "<article class=\"card\">\
         <header class=\"card-header\"><h2 class=\"card-title\">{}</h2></header>\
         {}\
         <ul class=\"info-list\">{}</ul>\
         </article>",
        escape_html(title.unwrap_or("")),
        thumbnail,
        info
    )
}

pub fn render_load_error() -> String {
    format!("<p class=\"load-error\">{}</p>", LOAD_ERROR_MESSAGE)
}
