//! Prose rendering of a `StatisticsSummary`.
//!
//! This text is the only channel through which the statistics reach the
//! recommendation collaborator. Any wording change alters what it sees.

use crate::statistics::aggregator::{NumberCount, StatisticsSummary};

pub const NO_DATA_NARRATIVE: &str = "No draw data was available for analysis.";

pub fn render_narrative(summary: &StatisticsSummary) -> String {
    let (Some(oldest), Some(newest)) = (summary.oldest_draw_no, summary.newest_draw_no) else {
        return NO_DATA_NARRATIVE.to_string();
    };

    let unseen = if summary.unseen_numbers.is_empty() {
        "none".to_string()
    } else {
        let listed = join_numbers(&summary.unseen_numbers);
        let hidden = summary.unseen_total.saturating_sub(summary.unseen_numbers.len());
        if hidden > 0 {
            format!("{listed} and {hidden} more")
        } else {
            listed
        }
    };

    format!(
        "Statistics for the last {window} draws (#{oldest} to #{newest}):\n\
        - Average sum of the six main numbers: {average}\n\
        - Most common even:odd ratio: {ratio}\n\
        - Most frequently drawn: {top}\n\
        - Least frequently drawn: {least}\n\
        - Not drawn in this window: {unseen}",
        window = summary.window_size,
        average = summary.average_sum.round() as u64,
        ratio = summary.dominant_parity_ratio,
        top = join_counts(&summary.top_frequent),
        least = join_counts(&summary.least_frequent),
    )
}

fn join_counts(counts: &[NumberCount]) -> String {
    counts
        .iter()
        .map(|nc| {
            let times = if nc.count == 1 { "time" } else { "times" };
            format!("{} ({} {times})", nc.number, nc.count)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::aggregator::aggregate;

    fn summary_fixture() -> StatisticsSummary {
        StatisticsSummary {
            window_size: 24,
            oldest_draw_no: Some(77),
            newest_draw_no: Some(100),
            average_sum: 138.46,
            dominant_parity_ratio: "3:3".to_string(),
            top_frequent: vec![
                NumberCount { number: 34, count: 9 },
                NumberCount { number: 12, count: 8 },
            ],
            least_frequent: vec![NumberCount { number: 5, count: 1 }],
            unseen_numbers: vec![3, 9],
            unseen_total: 4,
            narrative_text: String::new(),
        }
    }

    #[test]
    fn test_narrative_embeds_all_figures() {
        let text = render_narrative(&summary_fixture());

        assert!(text.starts_with("Statistics for the last 24 draws (#77 to #100):"));
        assert!(text.contains("Average sum of the six main numbers: 138\n"));
        assert!(text.contains("Most common even:odd ratio: 3:3"));
        assert!(text.contains("Most frequently drawn: 34 (9 times), 12 (8 times)"));
        assert!(text.contains("Least frequently drawn: 5 (1 time)"));
        assert!(text.contains("Not drawn in this window: 3, 9 and 2 more"));
    }

    #[test]
    fn test_narrative_without_unseen_numbers() {
        let mut summary = summary_fixture();
        summary.unseen_numbers.clear();
        summary.unseen_total = 0;

        let text = render_narrative(&summary);
        assert!(text.ends_with("Not drawn in this window: none"));
    }

    #[test]
    fn test_narrative_is_deterministic() {
        assert_eq!(
            render_narrative(&summary_fixture()),
            render_narrative(&summary_fixture())
        );
    }

    #[test]
    fn test_empty_window_narrative() {
        assert_eq!(aggregate(&[]).narrative_text, NO_DATA_NARRATIVE);
    }
}
