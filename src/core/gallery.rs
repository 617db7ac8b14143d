use crate::core::{
    normalize, render_card, render_load_error, resolve_thumbnail, Category, DataSource,
    ProjectLoader, ProjectRecord, ThumbnailResolver, ThumbnailState, VideoReference,
};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// A rendered project card and its mutable thumbnail state.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub record: ProjectRecord,
    pub reference: VideoReference,
    pub thumbnail: ThumbnailState,
}

impl Card {
    pub fn new(record: ProjectRecord) -> Self {
        let reference = normalize(&record);
        let thumbnail = resolve_thumbnail(&reference, record.explicit_thumbnail());
        Self {
            record,
            reference,
            thumbnail,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.thumbnail == ThumbnailState::Pending
    }

    /// Settles a pending thumbnail. Returns false, leaving the card untouched,
    /// once the card has left the pending state.
    pub fn settle(&mut self, thumbnail: Option<String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.thumbnail = match thumbnail {
            Some(url) => ThumbnailState::Resolved(url),
            None => ThumbnailState::Unavailable,
        };
        true
    }

    pub fn render(&self) -> String {
        render_card(&self.record, &self.reference, &self.thumbnail)
    }
}

/// Monotonic render generation shared by every pass of a gallery.
#[derive(Debug, Clone, Default)]
pub struct RenderGeneration {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct GenerationTicket {
    value: u64,
    current: Arc<AtomicU64>,
}

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, invalidating every earlier ticket.
    pub fn advance(&self) -> GenerationTicket {
        let value = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationTicket {
            value,
            current: self.current.clone(),
        }
    }
}

impl GenerationTicket {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryMarkup {
    pub animation: String,
    pub vfx: String,
}

impl GalleryMarkup {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut markup = Self::default();
        for card in cards {
            let grid = match card.record.category() {
                Category::Animation => &mut markup.animation,
                Category::Vfx => &mut markup.vfx,
            };
            grid.push_str(&card.render());
        }
        markup
    }

    pub fn load_error() -> Self {
        Self {
            animation: render_load_error(),
            vfx: render_load_error(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<section id=\"gridAnimation\" class=\"grid\">{}</section>\n\
             <section id=\"gridVfx\" class=\"grid\">{}</section>\n",
            self.animation, self.vfx
        )
    }
}

pub struct Gallery {
    resolver: ThumbnailResolver,
    generation: RenderGeneration,
}

impl Gallery {
    pub fn new(resolver: ThumbnailResolver) -> Self {
        Self {
            resolver,
            generation: RenderGeneration::new(),
        }
    }

    pub fn generation(&self) -> &RenderGeneration {
        &self.generation
    }

    /// Initial paint: every card is built synchronously with placeholders
    /// for pending thumbnails.
    pub fn paint(&self, records: Vec<ProjectRecord>) -> (GenerationTicket, Vec<Card>) {
        let ticket = self.generation.advance();
        let cards: Vec<Card> = records.into_iter().map(Card::new).collect();
        debug!("Painted {} cards for generation {}", cards.len(), ticket.value());
        (ticket, cards)
    }

    /// Runs every pending lookup concurrently and settles each card as its
    /// own lookup finishes. Results for a stale ticket are dropped.
    /// Returns the number of cards updated.
    pub async fn enrich(&self, cards: &mut [Card], ticket: &GenerationTicket) -> usize {
        let resolver = &self.resolver;
        let mut lookups: FuturesUnordered<_> = cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_pending())
            .map(|(index, card)| {
                let reference = card.reference.clone();
                async move { (index, resolver.fetch_remote_thumbnail(&reference).await) }
            })
            .collect();

        let mut updated = 0;
        while let Some((index, thumbnail)) = lookups.next().await {
            if !ticket.is_current() {
                debug!(
                    "Dropping thumbnail for card {} from stale generation {}",
                    index,
                    ticket.value()
                );
                continue;
            }
            if cards[index].settle(thumbnail) {
                updated += 1;
            }
        }
        updated
    }

    /// Full render pass: load, paint, optionally enrich, then emit markup.
    /// A failed load renders the inline error message in both grids.
    pub async fn render(
        &self,
        loader: &ProjectLoader,
        source: &DataSource,
        enrich: bool,
    ) -> GalleryMarkup {
        let records = match loader.load(source).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading {}: {}", source, e);
                return GalleryMarkup::load_error();
            }
        };

        let (ticket, mut cards) = self.paint(records);
        if enrich {
            let updated = self.enrich(&mut cards, &ticket).await;
            info!("Rendered {} cards ({} thumbnails fetched)", cards.len(), updated);
        } else {
            info!("Rendered {} cards", cards.len());
        }

        GalleryMarkup::from_cards(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LookupError, MetadataEndpoint, OEmbedResponse};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    const LOOKUP_DELAY: Duration = Duration::from_millis(200);

    /// Answers every lookup after a fixed delay.
    struct SlowEndpoint {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MetadataEndpoint for SlowEndpoint {
        fn name(&self) -> &str {
            "slow"
        }

        async fn lookup(&self, canonical_url: &str) -> Result<OEmbedResponse, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(LOOKUP_DELAY).await;
            Ok(OEmbedResponse {
                thumbnail_url: Some(format!("{}/thumb_295x166.jpg", canonical_url)),
                title: None,
            })
        }
    }

    fn slow_gallery() -> (Gallery, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = ThumbnailResolver::new(
            Box::new(SlowEndpoint { calls: calls.clone() }),
            Box::new(SlowEndpoint { calls: calls.clone() }),
            "1280x720",
        );
        (Gallery::new(resolver), calls)
    }

    fn vimeo_records(count: usize) -> Vec<ProjectRecord> {
        (0..count)
            .map(|i| ProjectRecord {
                vimeo_id: Some(format!("7697987{}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn vimeo_record() -> ProjectRecord {
        ProjectRecord {
            vimeo_url: Some("https://vimeo.com/76979871".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut card = Card::new(vimeo_record());
        assert!(card.is_pending());
        assert!(card.settle(Some("https://i.vimeocdn.com/a.jpg".to_string())));
        assert!(!card.settle(None));
        assert_eq!(
            card.thumbnail,
            ThumbnailState::Resolved("https://i.vimeocdn.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_settle_failure_leaves_no_pending() {
        let mut card = Card::new(vimeo_record());
        assert!(card.settle(None));
        assert_eq!(card.thumbnail, ThumbnailState::Unavailable);
        assert!(!card.render().contains("is-loading"));
    }

    #[test]
    fn test_generation_tickets() {
        let generation = RenderGeneration::new();
        let first = generation.advance();
        assert!(first.is_current());
        let second = generation.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.value() > first.value());
    }

    #[test]
    fn test_markup_partitions_by_category() {
        let cards = vec![
            Card::new(ProjectRecord {
                title: Some("Short".to_string()),
                category: Some("animation".to_string()),
                ..Default::default()
            }),
            Card::new(ProjectRecord {
                title: Some("Comp".to_string()),
                ..Default::default()
            }),
        ];
        let markup = GalleryMarkup::from_cards(&cards);
        assert!(markup.animation.contains("Short"));
        assert!(!markup.animation.contains("Comp"));
        assert!(markup.vfx.contains("Comp"));
        assert!(markup.to_html().contains("id=\"gridVfx\""));
    }

    #[tokio::test]
    async fn test_enrich_runs_lookups_concurrently() {
        let (gallery, calls) = slow_gallery();
        let (ticket, mut cards) = gallery.paint(vimeo_records(5));

        let started = Instant::now();
        let updated = gallery.enrich(&mut cards, &ticket).await;
        let elapsed = started.elapsed();

        assert_eq!(updated, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(cards.iter().all(|card| matches!(card.thumbnail, ThumbnailState::Resolved(_))));
        // Sequential lookups would take 5 x LOOKUP_DELAY
        assert!(elapsed < LOOKUP_DELAY * 3, "batch took {:?}", elapsed);
    }

    #[test]
    fn test_enrich_without_pending_cards_never_suspends() {
        let (gallery, calls) = slow_gallery();
        let records = vec![
            ProjectRecord {
                youtube_id: Some("dQw4w9WgXcQ".to_string()),
                ..Default::default()
            },
            ProjectRecord {
                vimeo_id: Some("76979871".to_string()),
                thumb: Some("https://cdn.test/still.jpg".to_string()),
                ..Default::default()
            },
        ];
        let (ticket, mut cards) = gallery.paint(records);

        let mut task = tokio_test::task::spawn(gallery.enrich(&mut cards, &ticket));
        let updated = tokio_test::assert_ready!(task.poll());
        drop(task);

        assert_eq!(updated, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            cards[1].thumbnail,
            ThumbnailState::Resolved("https://cdn.test/still.jpg".to_string())
        );
    }
}
