// Draw retrieval: point lookups against the results endpoint, a TTL cache
// with single-flight, latest-draw resolution and the backward history walk.

pub mod cache;
pub mod handlers;
pub mod history;
pub mod resolver;
pub mod schedule;
pub mod source;

#[cfg(test)]
pub mod testing;

use std::time::Duration;

pub use cache::DrawLookupCache;
pub use history::HistoryFetcher;
pub use resolver::{LatestDrawResolver, Unresolvable};
pub use source::HttpDrawSource;

/// Tunables shared by the resolver and the history walk.
#[derive(Debug, Clone, Copy)]
pub struct LookupSettings {
    /// Half-width of the probe window around the estimated latest draw.
    pub probe_buffer: u32,
    /// Maximum lookups in flight for one probe or walk.
    pub concurrency: usize,
    pub probe_ttl: Duration,
    pub history_ttl: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            probe_buffer: 10,
            concurrency: 8,
            probe_ttl: Duration::from_secs(3 * 3600),
            history_ttl: Duration::from_secs(6 * 3600),
        }
    }
}
