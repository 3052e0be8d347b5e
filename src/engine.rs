use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{
    CycleStats, DailyLog, Diagnosis, Hint, MascotStatus, Prediction, Profile, RegularityScore,
};
use crate::prediction::{OvulationEstimate, PhasePolicy};
use crate::regularity::RegularityConfig;
use crate::{analysis, prediction, regularity, rules};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fallback cycle length when the history yields no valid interval.
    pub typical_length: i64,
    pub phase_policy: PhasePolicy,
    pub ovulation_estimate: OvulationEstimate,
    pub regularity: RegularityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            typical_length: analysis::DEFAULT_TYPICAL_LENGTH,
            phase_policy: PhasePolicy::default(),
            ovulation_estimate: OvulationEstimate::default(),
            regularity: RegularityConfig::default(),
        }
    }
}

/// Everything one evaluation needs, passed explicitly per request. The
/// engine keeps no state of its own between calls; concurrent sessions
/// each hand in their own snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub period_dates: Vec<NaiveDate>,
    pub logs: BTreeMap<NaiveDate, DailyLog>,
    pub profile: Profile,
    pub config: EngineConfig,
}

/// The full derived picture for one request, ready for the host to render
/// or persist unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub stats: CycleStats,
    pub prediction: Option<Prediction>,
    pub regularity: RegularityScore,
    pub hints: Vec<Hint>,
    /// Present only when both a prediction and a log for `today` exist.
    pub diagnosis: Option<Diagnosis>,
    pub mascot: Option<MascotStatus>,
}

/// Evaluate a snapshot against an explicit `today`.
pub fn evaluate_on(snapshot: &Snapshot, today: NaiveDate) -> Overview {
    let stats = analysis::analyze(&snapshot.period_dates, snapshot.config.typical_length);
    let prediction = prediction::predict_on(
        today,
        stats.last_period_date,
        stats.average_length,
        snapshot.config.phase_policy,
        snapshot.config.ovulation_estimate,
    );
    let regularity = regularity::score(&stats, snapshot.profile.age, &snapshot.config.regularity);

    let today_log = snapshot.logs.get(&today);
    let hints = rules::hints(
        &stats,
        prediction.as_ref(),
        &snapshot.profile,
        today_log,
        &snapshot.config.regularity,
    );

    let diagnosis = match (&prediction, today_log) {
        (Some(prediction), Some(log)) => Some(rules::diagnose(
            prediction.current_phase,
            &log.symptoms,
            log.primary_mood,
            &log.secondary_moods,
            &log.habits,
        )),
        _ => None,
    };

    let mascot = prediction.map(|p| rules::mascot_for(p.current_phase));

    Overview {
        stats,
        prediction,
        regularity,
        hints,
        diagnosis,
        mascot,
    }
}

/// Evaluate a snapshot against the local calendar date.
pub fn evaluate(snapshot: &Snapshot) -> Overview {
    evaluate_on(snapshot, Local::now().date_naive())
}
