use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Smallest and largest number a ball can carry.
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;
/// Main numbers per draw.
pub const PICK_COUNT: usize = 6;

/// One official draw result, as published by the draw source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub draw_no: u32,
    pub draw_date: NaiveDate,
    pub numbers: [u8; PICK_COUNT],
    pub bonus_number: u8,
    pub first_tier_winner_count: u64,
    /// Per-winner amount; meaningless when `first_tier_winner_count` is 0.
    pub first_tier_prize_per_winner: u64,
}

impl Draw {
    /// Checks the record against the invariants every published draw obeys:
    /// six distinct main numbers in range, bonus in range and not among them.
    pub fn validate(&self) -> Result<(), String> {
        if self.draw_no == 0 {
            return Err("draw number must be positive".to_string());
        }

        for (i, &n) in self.numbers.iter().enumerate() {
            if !in_range(n) {
                return Err(format!("main number {n} is outside {MIN_NUMBER}-{MAX_NUMBER}"));
            }
            if self.numbers[..i].contains(&n) {
                return Err(format!("main number {n} appears more than once"));
            }
        }

        if !in_range(self.bonus_number) {
            return Err(format!(
                "bonus number {} is outside {MIN_NUMBER}-{MAX_NUMBER}",
                self.bonus_number
            ));
        }
        if self.numbers.contains(&self.bonus_number) {
            return Err(format!(
                "bonus number {} duplicates a main number",
                self.bonus_number
            ));
        }

        Ok(())
    }
}

pub fn in_range(n: u8) -> bool {
    (MIN_NUMBER..=MAX_NUMBER).contains(&n)
}

/// A draw plus the per-draw figures the statistics are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedDraw {
    #[serde(flatten)]
    pub draw: Draw,
    pub sorted_numbers: [u8; PICK_COUNT],
    pub sum: u32,
    pub even_count: u8,
    pub odd_count: u8,
}

impl ProcessedDraw {
    /// "even:odd", e.g. "4:2".
    pub fn parity_ratio(&self) -> String {
        format!("{}:{}", self.even_count, self.odd_count)
    }
}

impl From<Draw> for ProcessedDraw {
    fn from(draw: Draw) -> Self {
        let mut sorted_numbers = draw.numbers;
        sorted_numbers.sort_unstable();

        let sum = draw.numbers.iter().map(|&n| n as u32).sum();
        let even_count = draw.numbers.iter().filter(|&&n| n % 2 == 0).count() as u8;

        Self {
            draw,
            sorted_numbers,
            sum,
            even_count,
            odd_count: PICK_COUNT as u8 - even_count,
        }
    }
}
