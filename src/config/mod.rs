use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "showreel.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Request timeout in seconds for data and metadata fetches.
    pub timeout: u64,
    pub oembed_endpoint: String,
    pub fallback_endpoint: String,
    /// Size token written into upgraded Vimeo thumbnail URLs.
    pub thumbnail_size: String,
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: format!("showreel/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            oembed_endpoint: "https://vimeo.com/api/oembed.json".to_string(),
            fallback_endpoint: "https://noembed.com/embed".to_string(),
            thumbnail_size: "1280x720".to_string(),
            output: None,
        }
    }
}

impl Config {
    /// Loads `path` when given, else `showreel.toml` from the working
    /// directory if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(std::time::Duration::from_secs(self.timeout))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("failed to create HTTP client")?;
        Ok(client)
    }
}
