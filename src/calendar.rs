use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::{DailyLog, DayCell, EngineError, MonthGrid};

/// Build a Monday-first month grid against an explicit `today`.
///
/// Each row is a full week; days outside the month are blank cells. Cells
/// for logged days carry the day's dominant mood. The log map is only read.
pub fn build_month(
    year: i32,
    month: u32,
    logs: &BTreeMap<NaiveDate, DailyLog>,
    today: NaiveDate,
) -> Result<MonthGrid, EngineError> {
    let first_day =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidMonth { year, month })?;
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidMonth { year, month })?
        - Duration::days(1);
    let days_in_month = last_day.day();

    let leading_blanks = first_day.weekday().num_days_from_monday() as usize;

    let mut weeks: Vec<[DayCell; 7]> = Vec::new();
    let mut week = [DayCell::default(); 7];
    let mut column = leading_blanks;

    for day in 1..=days_in_month {
        let date = first_day + Duration::days(i64::from(day) - 1);
        week[column] = DayCell {
            day: Some(day),
            is_today: date == today,
            mood: logs.get(&date).and_then(|log| log.dominant_mood()),
        };
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [DayCell::default(); 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }

    Ok(MonthGrid { year, month, weeks })
}

/// Build the grid against the local calendar date.
pub fn build(
    year: i32,
    month: u32,
    logs: &BTreeMap<NaiveDate, DailyLog>,
) -> Result<MonthGrid, EngineError> {
    build_month(year, month, logs, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn grid(year: i32, month: u32) -> MonthGrid {
        build_month(year, month, &BTreeMap::new(), d("2020-01-01")).unwrap()
    }

    fn flat_days(grid: &MonthGrid) -> Vec<u32> {
        grid.weeks
            .iter()
            .flatten()
            .filter_map(|cell| cell.day)
            .collect()
    }

    #[test]
    fn january_2024_starts_on_monday() {
        let grid = grid(2024, 1);
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0].day, Some(1));
        // 31 days from a Monday start leave four trailing blanks.
        assert_eq!(grid.weeks[4][2].day, Some(31));
        assert_eq!(grid.weeks[4][3].day, None);
    }

    #[test]
    fn leap_february_has_29_days() {
        let grid = grid(2024, 2);
        // Feb 2024 starts on a Thursday: 3 leading blanks, 29 days, 5 rows.
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][2].day, None);
        assert_eq!(grid.weeks[0][3].day, Some(1));
        assert_eq!(flat_days(&grid).last(), Some(&29));
    }

    #[test]
    fn sunday_start_month_needs_six_rows() {
        // Sep 2024 starts on a Sunday: 6 leading blanks push it to 6 rows.
        let grid = grid(2024, 9);
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.weeks[0][6].day, Some(1));
    }

    #[test]
    fn every_day_appears_exactly_once() {
        for (year, month, days) in [(2024, 1, 31), (2024, 2, 29), (2023, 2, 28), (2024, 9, 30)] {
            let grid = grid(year, month);
            assert_eq!(flat_days(&grid), (1..=days).collect::<Vec<u32>>());
            for week in &grid.weeks {
                assert_eq!(week.len(), 7);
            }
        }
    }

    #[test]
    fn invalid_month_is_an_error() {
        assert!(build_month(2024, 13, &BTreeMap::new(), d("2024-01-01")).is_err());
        assert!(build_month(2024, 0, &BTreeMap::new(), d("2024-01-01")).is_err());
    }

    #[test]
    fn logged_days_carry_their_dominant_mood() {
        let mut logs = BTreeMap::new();
        logs.insert(
            d("2024-01-10"),
            DailyLog { primary_mood: Some(Mood::Happy), ..Default::default() },
        );
        logs.insert(
            d("2024-01-11"),
            DailyLog { moods: vec![Mood::Sad], ..Default::default() },
        );
        let grid = build_month(2024, 1, &logs, d("2024-01-10")).unwrap();

        // Jan 2024 starts on Monday, so day n sits at week (n-1)/7, col (n-1)%7.
        let day10 = grid.weeks[1][2];
        assert_eq!(day10.day, Some(10));
        assert!(day10.is_today);
        assert_eq!(day10.mood, Some(Mood::Happy));

        let day11 = grid.weeks[1][3];
        assert_eq!(day11.mood, Some(Mood::Sad));
        assert!(!day11.is_today);

        let day12 = grid.weeks[1][4];
        assert_eq!(day12.mood, None);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let grid = grid(2024, 12);
        assert_eq!(flat_days(&grid).last(), Some(&31));
    }
}
