use serde::{Deserialize, Serialize};

use crate::models::{CycleStats, RegularityLabel, RegularityScore};

/// One row of the age-tolerance table: applies to ages up to and
/// including `max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBucket {
    pub max_age: u32,
    pub tolerance: f64,
}

/// Age-dependent tolerance for cycle-length standard deviation, kept as
/// configuration data rather than inline conditionals. Buckets are checked
/// in order; ages beyond the last bucket get `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceTable {
    pub buckets: Vec<ToleranceBucket>,
    pub fallback: f64,
}

impl ToleranceTable {
    /// The four-bucket reproductive-age table: under 18 -> 5, 18-35 -> 3,
    /// 36-45 -> 4, over 45 -> 7.
    pub fn reproductive_age() -> Self {
        Self {
            buckets: vec![
                ToleranceBucket { max_age: 17, tolerance: 5.0 },
                ToleranceBucket { max_age: 35, tolerance: 3.0 },
                ToleranceBucket { max_age: 45, tolerance: 4.0 },
            ],
            fallback: 7.0,
        }
    }

    /// The collapsed two-bucket alternative: under 18 -> 5,
    /// 18-35 -> 3, everyone older -> 5.
    pub fn coarse() -> Self {
        Self {
            buckets: vec![
                ToleranceBucket { max_age: 17, tolerance: 5.0 },
                ToleranceBucket { max_age: 35, tolerance: 3.0 },
            ],
            fallback: 5.0,
        }
    }

    pub fn tolerance_for(&self, age: u32) -> f64 {
        self.buckets
            .iter()
            .find(|b| age <= b.max_age)
            .map(|b| b.tolerance)
            .unwrap_or(self.fallback)
    }
}

impl Default for ToleranceTable {
    fn default() -> Self {
        Self::reproductive_age()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularityConfig {
    pub baseline: f64,
    /// Intervals shorter than this cost 10 points each.
    pub min_cycle_days: i64,
    /// Intervals longer than this cost 10 points each.
    pub max_cycle_days: i64,
    pub tolerance: ToleranceTable,
}

impl Default for RegularityConfig {
    fn default() -> Self {
        Self {
            baseline: 80.0,
            min_cycle_days: 21,
            max_cycle_days: 40,
            tolerance: ToleranceTable::default(),
        }
    }
}

/// Score cycle regularity 0-100 from history statistics.
///
/// With no valid intervals the answer is the baseline with an
/// "Insufficient Data" label regardless of age. Penalties accumulate in
/// floating point and are only truncated at the final clamp.
pub fn score(stats: &CycleStats, age: u32, config: &RegularityConfig) -> RegularityScore {
    if stats.intervals.is_empty() {
        return RegularityScore {
            score: config.baseline.clamp(0.0, 100.0) as u8,
            label: RegularityLabel::InsufficientData,
        };
    }

    let mut score = config.baseline;

    let tolerance = config.tolerance.tolerance_for(age);
    if stats.std_dev > tolerance {
        score -= (stats.std_dev - tolerance) * 5.0;
    }

    for interval in &stats.intervals {
        if interval.length_days < config.min_cycle_days {
            score -= 10.0;
        }
        if interval.length_days > config.max_cycle_days {
            score -= 10.0;
        }
    }

    let score = score.clamp(0.0, 100.0) as u8;
    let label = match score {
        80..=u8::MAX => RegularityLabel::RelativelyRegular,
        50..=79 => RegularityLabel::ModerateVariability,
        _ => RegularityLabel::HighVariability,
    };

    RegularityScore { score, label }
}
