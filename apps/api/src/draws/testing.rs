//! In-memory draw source for tests: holds a fixed set of draws, counts every
//! fetch, and can hold each response back to widen concurrency windows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::draws::schedule::first_draw_date;
use crate::draws::source::{DrawSource, LookupError};
use crate::models::Draw;

pub struct SimulatedSource {
    draws: HashMap<u32, Draw>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requested: Mutex<Vec<u32>>,
}

impl SimulatedSource {
    /// Draws `1..=latest`, all present.
    pub fn sequential(latest: u32) -> Self {
        Self::from_draws((1..=latest).map(synthetic_draw))
    }

    pub fn from_draws(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().map(|d| (d.draw_no, d)).collect(),
            delay: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn without(mut self, draw_nos: &[u32]) -> Self {
        for no in draw_nos {
            self.draws.remove(no);
        }
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DrawSource for SimulatedSource {
    async fn fetch(&self, draw_no: u32) -> Result<Draw, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(draw_no);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.draws
            .get(&draw_no)
            .cloned()
            .ok_or(LookupError::NotFound(draw_no))
    }
}

/// A valid, deterministic draw for `draw_no`.
pub fn synthetic_draw(draw_no: u32) -> Draw {
    let base = (draw_no * 7) % 45;
    let numbers = [0u32, 5, 10, 15, 20, 25].map(|step| ((base + step) % 45 + 1) as u8);
    let bonus_number = ((base + 30) % 45 + 1) as u8;

    Draw {
        draw_no,
        draw_date: first_draw_date()
            .checked_add_days(Days::new(7 * (draw_no as u64 - 1)))
            .unwrap(),
        numbers,
        bonus_number,
        first_tier_winner_count: (draw_no % 20) as u64,
        first_tier_prize_per_winner: 2_000_000_000,
    }
}

/// The calendar day on which `draw_no` is the newest published draw.
pub fn date_of_draw(draw_no: u32) -> NaiveDate {
    synthetic_draw(draw_no).draw_date
}
