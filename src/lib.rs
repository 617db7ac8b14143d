pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod utils;

pub use crate::core::{
    build_embed, normalize, render_card, resolve_thumbnail, Gallery, ThumbnailResolver,
    VideoReference,
};
pub use crate::extractors::{parse_vimeo_id, parse_youtube_id};
