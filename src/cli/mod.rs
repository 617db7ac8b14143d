use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::core::{build_embed, Card, DataSource, Gallery, ProjectLoader, ThumbnailResolver};

#[derive(Parser)]
#[command(name = "showreel")]
#[command(about = "Resolve project video references and render portfolio cards")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the project grids from a data file or URL
    Render {
        /// Project data (path or http(s) URL)
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output file for the rendered fragment
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip remote thumbnail lookups
        #[arg(long)]
        no_enrich: bool,
    },
    /// Print the player markup for a video reference
    Embed {
        #[arg(value_name = "REFERENCE")]
        reference: String,
    },
    /// Print normalized references and initial thumbnail states as JSON
    Inspect {
        #[arg(value_name = "SOURCE")]
        source: String,
    },
}

#[derive(Serialize)]
struct InspectEntry<'a> {
    title: Option<&'a str>,
    #[serde(flatten)]
    card: &'a Card,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match &self.command {
            Command::Render {
                source,
                output,
                no_enrich,
            } => {
                let source = DataSource::parse(source);
                info!("Rendering projects from {}", source);

                let loader = ProjectLoader::new(config.http_client()?);
                let gallery = Gallery::new(ThumbnailResolver::from_config(&config)?);
                let markup = gallery.render(&loader, &source, !no_enrich).await;

                match output.as_ref().or(config.output.as_ref()) {
                    Some(path) => {
                        tokio::fs::write(path, markup.to_html()).await?;
                        println!("Output file: {}", path.display());
                    }
                    None => print!("{}", markup.to_html()),
                }
            }
            Command::Embed { reference } => {
                println!("{}", build_embed(reference));
            }
            Command::Inspect { source } => {
                let loader = ProjectLoader::new(config.http_client()?);
                let records = loader.load(&DataSource::parse(source)).await?;
                let cards: Vec<Card> = records.into_iter().map(Card::new).collect();
                let entries: Vec<InspectEntry> = cards
                    .iter()
                    .map(|card| InspectEntry {
                        title: card.record.title.as_deref(),
                        card,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }

        Ok(())
    }
}
