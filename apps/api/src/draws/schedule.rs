use chrono::{Duration, NaiveDate, Utc};

const KST_OFFSET_HOURS: i64 = 9;

/// Draw #1 was held on Saturday 2002-12-07; one draw per week since.
pub fn first_draw_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2002, 12, 7).expect("first draw date is a valid calendar date")
}

/// Today's calendar date in Korea, where the draws are held.
pub fn today_kst() -> NaiveDate {
    (Utc::now() + Duration::hours(KST_OFFSET_HOURS)).date_naive()
}

/// Whole weeks since the first draw, plus one. Never below 1.
pub fn estimate_draw_no(today: NaiveDate) -> u32 {
    let days = (today - first_draw_date()).num_days();
    if days < 0 {
        return 1;
    }
    (days / 7) as u32 + 1
}

/// Probe candidates from `estimate + buffer` down to `estimate - buffer`
/// (floored at 1), in descending order.
pub fn probe_window(estimate: u32, buffer: u32) -> Vec<u32> {
    let high = estimate.saturating_add(buffer);
    let low = estimate.saturating_sub(buffer).max(1);
    (low..=high).rev().collect()
}
