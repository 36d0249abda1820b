//! LatestDrawResolver: finds the newest published draw without a listing endpoint.
//!
//! Algorithm:
//! 1. Estimate the draw number from whole weeks elapsed since draw #1.
//! 2. Probe `estimate + buffer` down to `estimate - buffer`, descending.
//! 3. The first candidate that exists is the latest draw.
//!
//! Probes run with bounded parallelism but are consumed in candidate order, so
//! the answer is the same as a sequential walk. Once a hit is seen the stream
//! is dropped and any probes still in flight are cancelled.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::{stream, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::draws::cache::DrawLookupCache;
use crate::draws::schedule::{estimate_draw_no, probe_window, today_kst};
use crate::draws::LookupSettings;
use crate::models::Draw;

#[derive(Debug, Clone, Error)]
#[error(
    "could not find any draw between #{low} and #{high} (estimated latest: #{estimate}); \
    the draw source may be unavailable or the probe window miscalibrated"
)]
pub struct Unresolvable {
    pub estimate: u32,
    pub low: u32,
    pub high: u32,
}

pub struct LatestDrawResolver {
    cache: Arc<DrawLookupCache>,
    buffer: u32,
    concurrency: usize,
    ttl: Duration,
    clock: fn() -> NaiveDate,
}

impl LatestDrawResolver {
    pub fn new(cache: Arc<DrawLookupCache>, settings: &LookupSettings) -> Self {
        Self {
            cache,
            buffer: settings.probe_buffer,
            concurrency: settings.concurrency.max(1),
            ttl: settings.probe_ttl,
            clock: today_kst,
        }
    }

    /// Replaces the source of "today" used for the estimate.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub async fn resolve_latest(&self) -> Result<Draw, Unresolvable> {
        self.resolve_latest_on((self.clock)()).await
    }

    pub async fn resolve_latest_on(&self, today: NaiveDate) -> Result<Draw, Unresolvable> {
        let estimate = estimate_draw_no(today);
        let candidates = probe_window(estimate, self.buffer);
        debug!(
            "Probing {} candidates around estimated draw #{estimate}",
            candidates.len()
        );

        let mut probes = stream::iter(candidates.iter().copied())
            .map(|draw_no| self.cache.get(draw_no, self.ttl))
            .buffered(self.concurrency);

        while let Some(found) = probes.next().await {
            if let Some(draw) = found {
                info!(
                    "Latest draw resolved: #{} (estimate #{estimate})",
                    draw.draw_no
                );
                return Ok(draw);
            }
        }

        let error = Unresolvable {
            estimate,
            low: candidates.last().copied().unwrap_or(estimate),
            high: candidates.first().copied().unwrap_or(estimate),
        };
        warn!("{error}");
        Err(error)
    }
}
