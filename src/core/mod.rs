pub mod embed;
pub mod extractor;
pub mod gallery;
pub mod loader;
pub mod record;
pub mod reference;
pub mod render;
pub mod thumbnail;

pub use embed::{build_embed, build_embed_for, Embed};
pub use extractor::VideoHost;
pub use gallery::{Card, Gallery, GalleryMarkup, GenerationTicket, RenderGeneration};
pub use loader::{parse_records, DataSource, LoadError, ProjectLoader};
pub use record::{Category, ProjectRecord, VIDEO_FIELDS};
pub use reference::{classify, normalize, Provider, VideoReference};
pub use render::{render_card, render_info, render_load_error, render_thumbnail};
pub use thumbnail::{
    resolve_thumbnail, upgrade_thumbnail_url, LookupError, MetadataEndpoint, OEmbedEndpoint,
    OEmbedResponse, ThumbnailResolver, ThumbnailState,
};
