//! StatisticsAggregator: descriptive statistics over a window of draws.
//!
//! Pure function of its input: no I/O, no hidden state, recomputed per request.

use serde::Serialize;

use crate::models::draw::{MAX_NUMBER, MIN_NUMBER};
use crate::models::ProcessedDraw;
use crate::statistics::narrative::render_narrative;

/// How many entries each ranked list keeps.
pub const DISPLAY_LIMIT: usize = 7;

/// Reported when there is nothing to tally.
pub const EMPTY_PARITY_RATIO: &str = "0:0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Draws actually analyzed (may be fewer than requested).
    pub window_size: usize,
    pub oldest_draw_no: Option<u32>,
    pub newest_draw_no: Option<u32>,
    pub average_sum: f64,
    /// Most frequent "even:odd" string; ties go to the ratio seen first.
    pub dominant_parity_ratio: String,
    pub top_frequent: Vec<NumberCount>,
    pub least_frequent: Vec<NumberCount>,
    /// Numbers never drawn in the window, capped at `DISPLAY_LIMIT`.
    pub unseen_numbers: Vec<u8>,
    /// Size of the uncapped unseen set.
    pub unseen_total: usize,
    pub narrative_text: String,
}

pub fn aggregate(draws: &[ProcessedDraw]) -> StatisticsSummary {
    let window_size = draws.len();

    let average_sum = if draws.is_empty() {
        0.0
    } else {
        draws.iter().map(|d| d.sum as f64).sum::<f64>() / window_size as f64
    };

    let counts = count_numbers(draws);

    // Ascending number order before the stable sorts: equal counts rank the lower number first.
    let observed: Vec<NumberCount> = (MIN_NUMBER..=MAX_NUMBER)
        .map(|number| NumberCount {
            number,
            count: counts[number as usize],
        })
        .filter(|nc| nc.count > 0)
        .collect();

    let mut top_frequent = observed.clone();
    top_frequent.sort_by(|a, b| b.count.cmp(&a.count));
    top_frequent.truncate(DISPLAY_LIMIT);

    let mut least_frequent = observed;
    least_frequent.sort_by(|a, b| a.count.cmp(&b.count));
    least_frequent.truncate(DISPLAY_LIMIT);

    let unseen: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER)
        .filter(|&n| counts[n as usize] == 0)
        .collect();
    let unseen_total = if draws.is_empty() { 0 } else { unseen.len() };
    let unseen_numbers = if draws.is_empty() {
        Vec::new()
    } else {
        unseen.into_iter().take(DISPLAY_LIMIT).collect()
    };

    let mut summary = StatisticsSummary {
        window_size,
        oldest_draw_no: draws.iter().map(|d| d.draw.draw_no).min(),
        newest_draw_no: draws.iter().map(|d| d.draw.draw_no).max(),
        average_sum,
        dominant_parity_ratio: dominant_parity_ratio(draws),
        top_frequent,
        least_frequent,
        unseen_numbers,
        unseen_total,
        narrative_text: String::new(),
    };
    summary.narrative_text = render_narrative(&summary);
    summary
}

/// Occurrences of each main number, indexed by the number itself.
fn count_numbers(draws: &[ProcessedDraw]) -> [u32; MAX_NUMBER as usize + 1] {
    let mut counts = [0u32; MAX_NUMBER as usize + 1];
    for &n in draws.iter().flat_map(|d| d.draw.numbers.iter()) {
        if let Some(slot) = counts.get_mut(n as usize) {
            *slot += 1;
        }
    }
    counts
}

fn dominant_parity_ratio(draws: &[ProcessedDraw]) -> String {
    // Insertion-ordered tally so ties resolve to the first ratio encountered.
    let mut tally: Vec<(String, u32)> = Vec::new();
    for draw in draws {
        let ratio = draw.parity_ratio();
        match tally.iter_mut().find(|(r, _)| *r == ratio) {
            Some((_, count)) => *count += 1,
            None => tally.push((ratio, 1)),
        }
    }

    let mut best: Option<&(String, u32)> = None;
    for entry in &tally {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }

    best.map(|(ratio, _)| ratio.clone())
        .unwrap_or_else(|| EMPTY_PARITY_RATIO.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::testing::synthetic_draw;
    use crate::models::Draw;

    fn processed(draw_no: u32, numbers: [u8; 6]) -> ProcessedDraw {
        let bonus_number = (1..=45).find(|n| !numbers.contains(n)).unwrap();
        ProcessedDraw::from(Draw {
            numbers,
            bonus_number,
            ..synthetic_draw(draw_no)
        })
    }

    #[test]
    fn test_empty_window() {
        let summary = aggregate(&[]);

        assert_eq!(summary.window_size, 0);
        assert_eq!(summary.average_sum, 0.0);
        assert_eq!(summary.dominant_parity_ratio, "0:0");
        assert!(summary.top_frequent.is_empty());
        assert!(summary.least_frequent.is_empty());
        assert!(summary.unseen_numbers.is_empty());
        assert_eq!(summary.oldest_draw_no, None);
        assert!(summary.narrative_text.contains("No draw data"));

        assert_eq!(aggregate(&[]), summary);
    }

    #[test]
    fn test_average_sum_and_bounds() {
        let draws = vec![
            processed(12, [1, 2, 3, 4, 5, 6]), // 21
            processed(11, [10, 11, 12, 13, 14, 15]), // 75
            processed(10, [40, 41, 42, 43, 44, 45]), // 255
        ];
        let summary = aggregate(&draws);

        assert_eq!(summary.window_size, 3);
        assert!((summary.average_sum - 117.0).abs() < 1e-9);
        assert_eq!(summary.oldest_draw_no, Some(10));
        assert_eq!(summary.newest_draw_no, Some(12));
    }

    #[test]
    fn test_frequency_rankings() {
        let draws = vec![
            processed(3, [1, 2, 3, 4, 5, 6]),
            processed(2, [1, 2, 3, 4, 5, 7]),
            processed(1, [1, 2, 3, 8, 9, 10]),
        ];
        let summary = aggregate(&draws);

        let top: Vec<(u8, u32)> = summary
            .top_frequent
            .iter()
            .map(|nc| (nc.number, nc.count))
            .collect();
        assert_eq!(
            top,
            vec![(1, 3), (2, 3), (3, 3), (4, 2), (5, 2), (6, 1), (7, 1)]
        );

        let least: Vec<(u8, u32)> = summary
            .least_frequent
            .iter()
            .map(|nc| (nc.number, nc.count))
            .collect();
        assert_eq!(
            least,
            vec![(6, 1), (7, 1), (8, 1), (9, 1), (10, 1), (4, 2), (5, 2)]
        );

        // 10 distinct numbers seen, 35 unseen, 7 shown.
        assert_eq!(summary.unseen_total, 35);
        assert_eq!(summary.unseen_numbers, vec![11, 12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_dominant_parity_ratio() {
        let draws = vec![
            processed(4, [1, 3, 5, 7, 9, 2]), // 1:5
            processed(3, [2, 4, 6, 1, 3, 5]), // 3:3
            processed(2, [2, 4, 6, 8, 1, 3]), // 4:2
            processed(1, [10, 12, 14, 11, 13, 15]), // 3:3
        ];
        assert_eq!(aggregate(&draws).dominant_parity_ratio, "3:3");
    }

    #[test]
    fn test_parity_tie_goes_to_first_seen() {
        let four_two = processed(2, [2, 4, 6, 8, 1, 3]);
        let two_four = processed(1, [2, 4, 1, 3, 5, 7]);

        let forward = aggregate(&[four_two.clone(), two_four.clone()]);
        assert_eq!(forward.dominant_parity_ratio, "4:2");

        let reversed = aggregate(&[two_four, four_two]);
        assert_eq!(reversed.dominant_parity_ratio, "2:4");
    }

    #[test]
    fn test_order_independent_aggregates() {
        let mut draws: Vec<ProcessedDraw> =
            (1..=30).map(|n| ProcessedDraw::from(synthetic_draw(n))).collect();
        let forward = aggregate(&draws);
        draws.reverse();
        let backward = aggregate(&draws);

        assert!((forward.average_sum - backward.average_sum).abs() < 1e-9);
        assert_eq!(forward.top_frequent, backward.top_frequent);
        assert_eq!(forward.least_frequent, backward.least_frequent);
        assert_eq!(forward.unseen_numbers, backward.unseen_numbers);
        assert_eq!(forward.oldest_draw_no, backward.oldest_draw_no);
        assert_eq!(forward.newest_draw_no, backward.newest_draw_no);
    }

    #[test]
    fn test_lists_are_capped() {
        let draws: Vec<ProcessedDraw> =
            (1..=50).map(|n| ProcessedDraw::from(synthetic_draw(n))).collect();
        let summary = aggregate(&draws);

        assert_eq!(summary.top_frequent.len(), DISPLAY_LIMIT);
        assert_eq!(summary.least_frequent.len(), DISPLAY_LIMIT);
        assert!(summary.unseen_numbers.len() <= DISPLAY_LIMIT);
        assert!(summary
            .top_frequent
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
        assert!(summary
            .least_frequent
            .windows(2)
            .all(|w| w[0].count <= w[1].count));
    }
}
