pub mod vimeo;
pub mod youtube;

pub use vimeo::{parse_vimeo_id, Vimeo};
pub use youtube::{parse_youtube_id, YouTube};
