//! DrawLookupCache — memoized point lookups with per-read TTL and single-flight.
//!
//! Successful lookups are stored with the instant they were fetched; each
//! caller states the maximum age it accepts. `None` (not found, transport
//! failure, malformed payload) is never stored, so draws published later
//! become visible on the next lookup.
//!
//! Concurrent misses for the same draw number await one shared fetch instead
//! of each hitting the source. The fetch runs as its own task: it stores its
//! result and leaves the in-flight registry even when every caller has gone.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::draws::source::{DrawSource, LookupError};
use crate::models::Draw;

/// Entry count above which an insert first drops entries older than the retention period.
const PURGE_THRESHOLD: usize = 4096;

type SharedLookup = Shared<BoxFuture<'static, Option<Draw>>>;
type Entries = RwLock<HashMap<u32, CachedDraw>>;

struct CachedDraw {
    draw: Draw,
    fetched_at: Instant,
}

pub struct DrawLookupCache {
    source: Arc<dyn DrawSource>,
    retention: Duration,
    entries: Arc<Entries>,
    in_flight: Arc<Mutex<HashMap<u32, SharedLookup>>>,
}

impl DrawLookupCache {
    /// `retention` bounds how long any entry is kept, whatever TTL readers ask for.
    pub fn new(source: Arc<dyn DrawSource>, retention: Duration) -> Self {
        Self {
            source,
            retention,
            entries: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the draw if it exists, using a cached copy no older than `ttl`.
    ///
    /// `None` means "does not exist (yet or ever)"; callers must not retry on it.
    pub async fn get(&self, draw_no: u32, ttl: Duration) -> Option<Draw> {
        if let Some(draw) = self.cached(draw_no, ttl).await {
            debug!("Draw cache hit: {draw_no}");
            return Some(draw);
        }

        let lookup = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(&draw_no) {
                Some(lookup) => {
                    debug!("Draw {draw_no} already in flight, joining");
                    lookup.clone()
                }
                None => {
                    debug!("Draw cache miss: {draw_no}");
                    let lookup = self.spawn_lookup(draw_no);
                    in_flight.insert(draw_no, lookup.clone());
                    lookup
                }
            }
        };

        lookup.await
    }

    /// Starts the source fetch on its own task. Only that task stores the
    /// result and unregisters the lookup, so dropped callers cannot strand it.
    fn spawn_lookup(&self, draw_no: u32) -> SharedLookup {
        let source = Arc::clone(&self.source);
        let entries = Arc::clone(&self.entries);
        let in_flight = Arc::clone(&self.in_flight);
        let retention = self.retention;

        let task = tokio::spawn(async move {
            let result = fetch_from(source, draw_no).await;
            if let Some(draw) = &result {
                store(&entries, retention, draw.clone()).await;
            }
            in_flight.lock().await.remove(&draw_no);
            result
        });

        async move {
            task.await.unwrap_or_else(|e| {
                warn!("Draw {draw_no} lookup task failed: {e}");
                None
            })
        }
        .boxed()
        .shared()
    }

    /// Drops every entry fetched more than `max_age` ago.
    pub async fn purge_expired(&self, max_age: Duration) -> usize {
        purge(&self.entries, max_age).await
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn cached(&self, draw_no: u32, ttl: Duration) -> Option<Draw> {
        let entries = self.entries.read().await;
        entries
            .get(&draw_no)
            .filter(|cached| cached.fetched_at.elapsed() < ttl)
            .map(|cached| cached.draw.clone())
    }
}

async fn purge(entries: &Entries, max_age: Duration) -> usize {
    let mut entries = entries.write().await;
    let before = entries.len();
    entries.retain(|_, cached| cached.fetched_at.elapsed() < max_age);
    before - entries.len()
}

async fn store(entries: &Entries, retention: Duration, draw: Draw) {
    if entries.read().await.len() >= PURGE_THRESHOLD {
        let purged = purge(entries, retention).await;
        debug!("Purged {purged} expired draw cache entries");
    }

    entries.write().await.insert(
        draw.draw_no,
        CachedDraw {
            draw,
            fetched_at: Instant::now(),
        },
    );
}

/// One source lookup, with every failure collapsed to `None`.
async fn fetch_from(source: Arc<dyn DrawSource>, draw_no: u32) -> Option<Draw> {
    match source.fetch(draw_no).await {
        Ok(draw) => Some(draw),
        Err(LookupError::NotFound(_)) => {
            debug!("Draw {draw_no} not found at source");
            None
        }
        Err(e) => {
            warn!("Draw lookup failed, treating as not found: {e}");
            None
        }
    }
}
