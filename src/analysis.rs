use chrono::NaiveDate;

use crate::models::{parse_date, CycleInterval, CycleStats};

pub const DEFAULT_TYPICAL_LENGTH: i64 = 28;

/// Validity band for gaps between consecutive period starts, exclusive on
/// both ends. Gaps at or below 15 days are accidental duplicate entries;
/// gaps at or above 100 days are missed logging, not physiological signal.
const MIN_VALID_GAP: i64 = 15;
const MAX_VALID_GAP: i64 = 100;

/// Parse period history as stored: ISO date strings with possible gaps.
/// Missing or unparseable entries are dropped.
pub fn parse_history<'a, I>(dates: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    dates
        .into_iter()
        .flatten()
        .filter_map(|s| parse_date(s).ok())
        .collect()
}

/// Analyze a list of period-start dates into cycle statistics.
///
/// Input order does not matter; dates are sorted and deduplicated here,
/// never assumed pre-sorted from storage. With no valid interval the stats
/// fall back to `typical_length` with a std deviation of 0.0.
pub fn analyze(dates: &[NaiveDate], typical_length: i64) -> CycleStats {
    let mut dates = dates.to_vec();
    dates.sort();
    dates.dedup();

    let intervals: Vec<CycleInterval> = dates
        .windows(2)
        .filter_map(|w| {
            let length_days = (w[1] - w[0]).num_days();
            (length_days > MIN_VALID_GAP && length_days < MAX_VALID_GAP).then(|| CycleInterval {
                start: w[0],
                end: w[1],
                length_days,
            })
        })
        .collect();

    let last_period_date = dates.last().copied();

    if intervals.is_empty() {
        return CycleStats {
            average_length: typical_length as f64,
            std_dev: 0.0,
            date_count: dates.len(),
            last_period_date,
            intervals,
        };
    }

    let lengths: Vec<f64> = intervals.iter().map(|i| i.length_days as f64).collect();
    let average_length = mean(&lengths);
    let std_dev = if lengths.len() > 1 {
        population_std_dev(&lengths, average_length)
    } else {
        0.0
    };

    CycleStats {
        average_length,
        std_dev,
        date_count: dates.len(),
        last_period_date,
        intervals,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], avg: f64) -> f64 {
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_history_falls_back_to_typical_length() {
        let stats = analyze(&[], 28);
        assert_eq!(stats.average_length, 28.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.date_count, 0);
        assert_eq!(stats.last_period_date, None);
        assert!(stats.intervals.is_empty());
    }

    #[test]
    fn single_date_falls_back_but_reports_last_date() {
        let stats = analyze(&[d("2024-02-10")], 30);
        assert_eq!(stats.average_length, 30.0);
        assert_eq!(stats.date_count, 1);
        assert_eq!(stats.last_period_date, Some(d("2024-02-10")));
        assert!(stats.intervals.is_empty());
    }

    #[test]
    fn duplicate_dates_collapse_to_one_entry() {
        let stats = analyze(&[d("2024-02-10"), d("2024-02-10")], 28);
        assert_eq!(stats.date_count, 1);
        assert!(stats.intervals.is_empty());
    }

    #[test]
    fn mean_and_population_std_dev() {
        // Gaps of 28 and 30 days.
        let stats = analyze(&[d("2024-01-01"), d("2024-01-29"), d("2024-02-28")], 28);
        assert_eq!(stats.intervals.len(), 2);
        assert_eq!(stats.average_length, 29.0);
        assert_eq!(stats.std_dev, 1.0);
        assert_eq!(stats.last_period_date, Some(d("2024-02-28")));
    }

    #[test]
    fn single_interval_has_zero_std_dev() {
        let stats = analyze(&[d("2024-01-01"), d("2024-01-29")], 28);
        assert_eq!(stats.average_length, 28.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn validity_band_is_open_on_both_ends() {
        // Exactly 15 and exactly 100 days are excluded.
        assert!(analyze(&[d("2024-01-01"), d("2024-01-16")], 28)
            .intervals
            .is_empty());
        assert!(analyze(&[d("2024-01-01"), d("2024-04-10")], 28)
            .intervals
            .is_empty());
        // 16 and 99 days are included.
        assert_eq!(
            analyze(&[d("2024-01-01"), d("2024-01-17")], 28).intervals[0].length_days,
            16
        );
        assert_eq!(
            analyze(&[d("2024-01-01"), d("2024-04-09")], 28).intervals[0].length_days,
            99
        );
    }

    #[test]
    fn invalid_gaps_do_not_skew_statistics() {
        // 2-day typo gap and a 120-day logging gap around two clean cycles.
        let dates = [
            d("2024-01-01"),
            d("2024-01-03"),
            d("2024-01-31"),
            d("2024-02-28"),
            d("2024-06-27"),
        ];
        let stats = analyze(&dates, 28);
        assert_eq!(stats.intervals.len(), 2);
        assert_eq!(stats.average_length, 28.0);
        assert_eq!(stats.last_period_date, Some(d("2024-06-27")));
    }

    #[test]
    fn analyze_is_order_independent_and_idempotent() {
        let sorted = [d("2024-01-01"), d("2024-01-29"), d("2024-02-28")];
        let shuffled = [d("2024-02-28"), d("2024-01-01"), d("2024-01-29")];
        let a = analyze(&shuffled, 28);
        let b = analyze(&shuffled, 28);
        assert_eq!(a, b);
        assert_eq!(a, analyze(&sorted, 28));
    }

    #[test]
    fn parse_history_filters_nulls_and_garbage() {
        let dates = parse_history([Some("2024-01-01"), None, Some("garbage"), Some("2024-01-29")]);
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-29")]);
    }
}
