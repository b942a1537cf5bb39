//! Next-period prediction by rolling-average extrapolation.

use chrono::{Duration, NaiveDate};

use super::average_cycle_length;
use crate::domain::cycle::Cycle;

/// Extrapolates the next `count` cycle start dates.
///
/// `count` is clamped to [1, 6]. Returns an empty list when the user has no
/// cycles or when the average cycle length cannot be established. No trend
/// adjustment or manual-override blending is applied.
pub fn predict_next_starts(cycles: &[Cycle], count: usize) -> Vec<NaiveDate> {
    if cycles.is_empty() {
        return Vec::new();
    }

    let mut asc: Vec<&Cycle> = cycles.iter().collect();
    asc.sort_by_key(|c| c.start_date);
    let asc: Vec<Cycle> = asc.iter().map(|c| (*c).clone()).collect();

    let average = match average_cycle_length(&asc) {
        Some(days) if days > 0 => days as i64,
        _ => return Vec::new(),
    };

    let limit = count.clamp(1, 6);
    let mut reference = asc.last().map(|c| c.start_date).unwrap_or_default();

    let mut predictions = Vec::with_capacity(limit);
    for _ in 0..limit {
        reference += Duration::days(average);
        predictions.push(reference);
    }
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle(start: NaiveDate) -> Cycle {
        Cycle::new(UserId::new("user-1").unwrap(), start, None, Utc::now()).unwrap()
    }

    #[test]
    fn extrapolates_from_most_recent_start() {
        let cycles = vec![
            cycle(date(2024, 1, 1)),
            cycle(date(2024, 1, 29)),
            cycle(date(2024, 2, 26)),
        ];
        let predictions = predict_next_starts(&cycles, 2);
        assert_eq!(predictions, vec![date(2024, 3, 25), date(2024, 4, 22)]);
    }

    #[test]
    fn no_cycles_means_no_predictions() {
        assert!(predict_next_starts(&[], 3).is_empty());
    }

    #[test]
    fn single_cycle_has_insufficient_history() {
        assert!(predict_next_starts(&[cycle(date(2024, 1, 1))], 3).is_empty());
    }

    #[test]
    fn count_is_clamped_to_six() {
        let cycles = vec![cycle(date(2024, 1, 1)), cycle(date(2024, 1, 29))];
        assert_eq!(predict_next_starts(&cycles, 100).len(), 6);
        assert_eq!(predict_next_starts(&cycles, 0).len(), 1);
    }
}
