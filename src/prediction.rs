use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Phase, Prediction};

/// How day-in-cycle maps to a phase. Two partition schemes are in use;
/// the host picks one, neither is merged into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhasePolicy {
    /// Fixed breakpoints: 1-5 menstrual, 6-13 follicular, 14-15 ovulation,
    /// 16..=cycle_length luteal. Only the luteal upper bound scales.
    #[default]
    FixedBreakpoints,
    /// Partition centered on the estimated ovulation day
    /// (cycle_length - 14), with a two-day ovulatory window either side.
    OvulationCentered,
}

/// Which anchor the ovulation estimate is computed from. Both give the same
/// date for the same rounded cycle length, but callers that re-round between
/// the two computations can observe a divergence, so both stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OvulationEstimate {
    /// `last_period_date + (cycle_length - 14)` days.
    #[default]
    LutealAnchored,
    /// `next_period_date - 14` days.
    FromNextPeriod,
}

pub fn ovulation_from_last(last_period_date: NaiveDate, cycle_length: i64) -> NaiveDate {
    last_period_date + Duration::days(cycle_length - 14)
}

pub fn ovulation_from_next(next_period_date: NaiveDate) -> NaiveDate {
    next_period_date - Duration::days(14)
}

/// Assign a phase to a 1-based day in the cycle. Out-of-range days map to
/// sentinel phases, never to an error.
pub fn phase_for_day(policy: PhasePolicy, day: i64, cycle_length: i64) -> Phase {
    match policy {
        PhasePolicy::FixedBreakpoints => match day {
            d if d <= 0 => Phase::FutureDate,
            1..=5 => Phase::Menstrual,
            6..=13 => Phase::Follicular,
            14..=15 => Phase::Ovulation,
            d if d <= cycle_length => Phase::Luteal,
            _ => Phase::Late,
        },
        PhasePolicy::OvulationCentered => {
            let ovulation_offset = cycle_length - 14;
            match day {
                d if d <= 0 => Phase::FutureDate,
                1..=5 => Phase::Menstrual,
                d if d <= ovulation_offset - 2 => Phase::Follicular,
                d if d <= ovulation_offset + 2 => Phase::Ovulation,
                d if d <= cycle_length => Phase::Luteal,
                _ => Phase::Late,
            }
        }
    }
}

/// Predict the current phase and next dates against an explicit `today`.
///
/// Returns `None` only when the last period date is unknown. A last period
/// in the future is not rejected; it surfaces as the future-date sentinel.
pub fn predict_on(
    today: NaiveDate,
    last_period_date: Option<NaiveDate>,
    average_length: f64,
    policy: PhasePolicy,
    estimate: OvulationEstimate,
) -> Option<Prediction> {
    let last = last_period_date?;

    // Nearest integer, ties away from zero.
    let cycle_length = average_length.round() as i64;

    let days_since_last = (today - last).num_days();
    let current_cycle_day = days_since_last + 1;
    let current_phase = phase_for_day(policy, current_cycle_day, cycle_length);

    let next_period_date = last + Duration::days(cycle_length);
    let estimated_ovulation_date = match estimate {
        OvulationEstimate::LutealAnchored => ovulation_from_last(last, cycle_length),
        OvulationEstimate::FromNextPeriod => ovulation_from_next(next_period_date),
    };

    let progress = if average_length > 0.0 {
        (current_cycle_day as f64 / average_length).clamp(0.0, 1.0) as f32
    } else {
        1.0
    };

    Some(Prediction {
        current_cycle_day,
        current_phase,
        next_period_date,
        estimated_ovulation_date,
        days_since_last,
        progress,
    })
}

/// Predict against the local calendar date.
pub fn predict(
    last_period_date: Option<NaiveDate>,
    average_length: f64,
    policy: PhasePolicy,
    estimate: OvulationEstimate,
) -> Option<Prediction> {
    predict_on(
        Local::now().date_naive(),
        last_period_date,
        average_length,
        policy,
        estimate,
    )
}
