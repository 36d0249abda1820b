//! HistoryFetcher: walks backward from a draw number, skipping gaps.
//!
//! Draws that cannot be retrieved are skipped, not retried, and do not count
//! toward the requested total: the result may be shorter than asked for.

use std::sync::Arc;
use std::time::Duration;

use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::draws::cache::DrawLookupCache;
use crate::draws::LookupSettings;
use crate::models::Draw;

pub struct HistoryFetcher {
    cache: Arc<DrawLookupCache>,
    concurrency: usize,
    ttl: Duration,
}

impl HistoryFetcher {
    pub fn new(cache: Arc<DrawLookupCache>, settings: &LookupSettings) -> Self {
        Self {
            cache,
            concurrency: settings.concurrency.max(1),
            ttl: settings.history_ttl,
        }
    }

    /// Up to `count` draws from `from_draw_no` downward, most recent first.
    pub async fn fetch_backward(&self, from_draw_no: u32, count: u32) -> Vec<Draw> {
        if count == 0 || from_draw_no == 0 {
            return Vec::new();
        }

        let lowest = from_draw_no.saturating_sub(count - 1).max(1);
        let walked = (from_draw_no - lowest + 1) as usize;

        let draws: Vec<Draw> = stream::iter((lowest..=from_draw_no).rev())
            .map(|draw_no| self.cache.get(draw_no, self.ttl))
            .buffered(self.concurrency)
            .filter_map(|found| async move { found })
            .collect()
            .await;

        let missing = walked - draws.len();
        if missing > 0 {
            warn!(
                "History walk from #{from_draw_no}: {missing} of {walked} draws unavailable, skipped"
            );
        }
        debug!(
            "Fetched {} draws backward from #{from_draw_no}",
            draws.len()
        );

        draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::testing::SimulatedSource;

    fn fetcher_over(source: &Arc<SimulatedSource>) -> HistoryFetcher {
        let settings = LookupSettings::default();
        let cache = Arc::new(DrawLookupCache::new(source.clone(), settings.history_ttl));
        HistoryFetcher::new(cache, &settings)
    }

    fn numbers_of(draws: &[Draw]) -> Vec<u32> {
        draws.iter().map(|d| d.draw_no).collect()
    }

    #[tokio::test]
    async fn test_gap_free_walk_returns_exact_window() {
        let source = Arc::new(SimulatedSource::sequential(100));
        let fetcher = fetcher_over(&source);

        let draws = fetcher.fetch_backward(100, 24).await;

        assert_eq!(draws.len(), 24);
        assert_eq!(numbers_of(&draws), (77..=100).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_gaps_are_skipped_not_backfilled() {
        let source = Arc::new(SimulatedSource::sequential(100).without(&[98, 95]));
        let fetcher = fetcher_over(&source);

        let draws = fetcher.fetch_backward(100, 6).await;

        assert_eq!(numbers_of(&draws), vec![100, 99, 97, 96]);
        assert_eq!(source.calls(), 6);
    }

    #[tokio::test]
    async fn test_walk_stops_at_first_draw() {
        let source = Arc::new(SimulatedSource::sequential(10));
        let fetcher = fetcher_over(&source);

        let draws = fetcher.fetch_backward(3, 10).await;

        assert_eq!(numbers_of(&draws), vec![3, 2, 1]);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_zero_count_fetches_nothing() {
        let source = Arc::new(SimulatedSource::sequential(10));
        let fetcher = fetcher_over(&source);

        assert!(fetcher.fetch_backward(10, 0).await.is_empty());
        assert_eq!(source.calls(), 0);
    }
}
