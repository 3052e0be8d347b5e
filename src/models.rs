use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used across the persistence boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid calendar month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("invalid date string: {0}")]
    InvalidDate(#[from] chrono::ParseError),
}

/// Parse an ISO-8601 calendar date as stored by the host.
pub fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Convert a string-keyed log map from storage into a date-keyed one.
/// Entries with unparseable keys are dropped rather than failing the request.
pub fn parse_log_map(raw: &BTreeMap<String, DailyLog>) -> BTreeMap<NaiveDate, DailyLog> {
    raw.iter()
        .filter_map(|(key, log)| parse_date(key).ok().map(|date| (date, log.clone())))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
    Late,
    FutureDate,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual Phase",
            Phase::Follicular => "Follicular Phase",
            Phase::Ovulation => "Ovulation Phase",
            Phase::Luteal => "Luteal Phase",
            Phase::Late => "Late / Delayed",
            Phase::FutureDate => "Future date selected?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Calm,
    Energetic,
    Anxious,
    Irritable,
    Sad,
    Exhausted,
    Depleted,
    Tearful,
    Miserable,
}

impl Mood {
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Calm => "😌",
            Mood::Energetic => "⚡",
            Mood::Anxious => "😰",
            Mood::Irritable => "😠",
            Mood::Sad => "😢",
            Mood::Exhausted => "😫",
            Mood::Depleted => "🪫",
            Mood::Tearful => "🥲",
            Mood::Miserable => "😭",
        }
    }

    /// Moods that count toward the PMS-risk branch of the rule engine.
    pub fn is_negative_affect(&self) -> bool {
        matches!(
            self,
            Mood::Anxious
                | Mood::Irritable
                | Mood::Sad
                | Mood::Exhausted
                | Mood::Depleted
                | Mood::Tearful
                | Mood::Miserable
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    BreastTenderness,
    Backache,
    Nausea,
    Acne,
    Insomnia,
    Fatigue,
}

impl Symptom {
    pub fn glyph(&self) -> &'static str {
        match self {
            Symptom::Cramps => "🌀",
            Symptom::Headache => "🤕",
            Symptom::Bloating => "🎈",
            Symptom::BreastTenderness => "💢",
            Symptom::Backache => "🦴",
            Symptom::Nausea => "🤢",
            Symptom::Acne => "🔴",
            Symptom::Insomnia => "🌃",
            Symptom::Fatigue => "🥱",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Habit {
    PainMedication,
    Caffeine,
    LateNight,
    Exercise,
    Hydration,
}

impl Habit {
    pub fn glyph(&self) -> &'static str {
        match self {
            Habit::PainMedication => "💊",
            Habit::Caffeine => "☕",
            Habit::LateNight => "🌙",
            Habit::Exercise => "🏃",
            Habit::Hydration => "💧",
        }
    }
}

fn default_energy() -> u8 {
    50
}

/// One day's logged state. A later save for the same date replaces the
/// entry wholesale; the engine never merges logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(default)]
    pub primary_mood: Option<Mood>,
    #[serde(default)]
    pub secondary_moods: BTreeSet<Mood>,
    /// Self-reported energy, 0-100.
    #[serde(default = "default_energy")]
    pub energy: u8,
    #[serde(default)]
    pub symptoms: BTreeSet<Symptom>,
    #[serde(default)]
    pub habits: BTreeSet<Habit>,
    #[serde(default)]
    pub note: String,
    /// Legacy undifferentiated mood list from older log formats.
    #[serde(default)]
    pub moods: Vec<Mood>,
}

impl Default for DailyLog {
    fn default() -> Self {
        Self {
            primary_mood: None,
            secondary_moods: BTreeSet::new(),
            energy: default_energy(),
            symptoms: BTreeSet::new(),
            habits: BTreeSet::new(),
            note: String::new(),
            moods: Vec::new(),
        }
    }
}

impl DailyLog {
    /// The single mood that represents this day in the calendar grid:
    /// the primary mood if set, else the first legacy mood entry.
    pub fn dominant_mood(&self) -> Option<Mood> {
        self.primary_mood.or_else(|| self.moods.first().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self { age: 25 }
    }
}

/// One valid gap between consecutive period starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub length_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    /// Mean of valid interval lengths, or the caller's typical length
    /// when no valid interval exists.
    pub average_length: f64,
    /// Population standard deviation of valid interval lengths;
    /// 0.0 with fewer than two valid intervals.
    pub std_dev: f64,
    /// Number of distinct recorded period-start dates.
    pub date_count: usize,
    pub last_period_date: Option<NaiveDate>,
    pub intervals: Vec<CycleInterval>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1-based day within the current cycle.
    pub current_cycle_day: i64,
    pub current_phase: Phase,
    pub next_period_date: NaiveDate,
    pub estimated_ovulation_date: NaiveDate,
    pub days_since_last: i64,
    /// Fraction of the average cycle elapsed, capped at 1.0.
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularityLabel {
    RelativelyRegular,
    ModerateVariability,
    HighVariability,
    InsufficientData,
}

impl RegularityLabel {
    pub fn label(&self) -> &'static str {
        match self {
            RegularityLabel::RelativelyRegular => "Relatively Regular",
            RegularityLabel::ModerateVariability => "Moderate Variability",
            RegularityLabel::HighVariability => "High Variability",
            RegularityLabel::InsufficientData => "Insufficient Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularityScore {
    pub score: u8,
    pub label: RegularityLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintKind {
    LongCycles,
    ShortCycles,
    MissedPeriod,
    AgeContext,
    Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub kind: HintKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub diagnosis: String,
    pub mechanism: String,
    pub diet_advice: String,
    /// Main advice first, then habit- and symptom-specific cautions.
    pub lifestyle_advice: Vec<String>,
    pub citation: String,
}

/// Mascot status shown by the host, keyed by phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MascotStatus {
    pub emoji: &'static str,
    pub status: &'static str,
    /// Background color token for the host's theme, not a CSS value.
    pub color: &'static str,
}

/// One cell of the month grid. A blank cell (leading/trailing filler)
/// has `day == None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DayCell {
    pub day: Option<u32>,
    pub is_today: bool,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Monday-first weeks, always 7 columns.
    pub weeks: Vec<[DayCell; 7]>,
}
