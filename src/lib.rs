//! Rule-based menstrual cycle insights engine.
//!
//! Turns a sparse history of period-start dates into cycle statistics, a
//! current-phase forecast, a regularity score, conservative rule-based
//! observations, and a mood-annotated month calendar. Persistence and
//! presentation belong to the host; everything here is a pure function
//! over plain data passed in per request. Not a medical device.

pub mod analysis;
pub mod calendar;
pub mod engine;
pub mod models;
pub mod prediction;
pub mod regularity;
pub mod rules;

pub use engine::{evaluate, evaluate_on, EngineConfig, Overview, Snapshot};
pub use models::{
    CycleInterval, CycleStats, DailyLog, DayCell, Diagnosis, EngineError, Habit, Hint, HintKind,
    MascotStatus, MonthGrid, Mood, Phase, Prediction, Profile, RegularityLabel, RegularityScore,
    Symptom,
};
pub use prediction::{OvulationEstimate, PhasePolicy};
pub use regularity::{RegularityConfig, ToleranceBucket, ToleranceTable};
