use crate::core::Provider;
use url::Url;

/// A video hosting service the pipeline can recognise, link to and embed.
pub trait VideoHost: Send + Sync {
    fn name(&self) -> &'static str;
    fn provider(&self) -> Provider;
    fn suitable(&self, url: &Url) -> bool;

    /// Pulls the provider-scoped id out of a bare id or any known URL shape.
    /// Malformed input yields `None`.
    fn extract_video_id(&self, input: &str) -> Option<String>;

    fn canonical_url(&self, id: &str) -> String;

    /// Thumbnail derivable from the id alone, when the host publishes one.
    fn thumbnail_url(&self, id: &str) -> Option<String>;

    /// Player iframe source for the input, with playback parameters applied.
    fn embed_url(&self, input: &str) -> Option<String>;

    /// `allow` attribute for the player iframe.
    fn iframe_allow(&self) -> &'static str;

    fn host_matches(&self, input: &str) -> bool {
        Url::parse(input.trim())
            .map(|url| self.suitable(&url))
            .unwrap_or(false)
    }
}
