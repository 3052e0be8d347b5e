use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    CycleStats, DailyLog, Diagnosis, Habit, Hint, HintKind, MascotStatus, Mood, Phase, Prediction,
    Profile, Symptom,
};
use crate::regularity::RegularityConfig;

/// Days without a period after which the missed-period advisory fires.
const MISSED_PERIOD_DAYS: i64 = 90;
/// Logged energy below this counts as a poor-sleep/stress signal.
const LOW_ENERGY: u8 = 30;

const CITATION_PMS: &str = "acog-pms-faq";
const CITATION_NEUTRAL: &str = "nih-menstrual-basics";

pub const AFFIRMATIONS: &[&str] = &[
    "Your body is doing its best for you today.",
    "Rest is productive too.",
    "One gentle day at a time.",
    "You know your body better than any chart does.",
    "Small habits add up; logging today already counts.",
    "Whatever this cycle brings, you can meet it.",
];

/// Draw one affirmation from the fixed list. The randomness source is
/// injected so deterministic callers can seed it.
pub fn affirmation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    AFFIRMATIONS.choose(rng).copied().unwrap_or(AFFIRMATIONS[0])
}

/// Mascot status for the current phase. Sentinel phases share a neutral
/// waiting entry.
pub fn mascot_for(phase: Phase) -> MascotStatus {
    match phase {
        Phase::Menstrual => MascotStatus {
            emoji: "🫖",
            status: "Resting up with a warm tea",
            color: "rose",
        },
        Phase::Follicular => MascotStatus {
            emoji: "🌱",
            status: "Fresh energy is coming back",
            color: "mint",
        },
        Phase::Ovulation => MascotStatus {
            emoji: "✨",
            status: "Peak sparkle, feeling social",
            color: "peach",
        },
        Phase::Luteal => MascotStatus {
            emoji: "🧸",
            status: "Winding down, be gentle today",
            color: "lavender",
        },
        Phase::Late | Phase::FutureDate => MascotStatus {
            emoji: "🌙",
            status: "Quietly waiting for the next cycle",
            color: "slate",
        },
    }
}

/// Generate conservative observation hints from history and today's log.
/// Rules fire independently; the output order is fixed.
pub fn hints(
    stats: &CycleStats,
    prediction: Option<&Prediction>,
    profile: &Profile,
    today_log: Option<&DailyLog>,
    config: &RegularityConfig,
) -> Vec<Hint> {
    let mut hints = Vec::new();

    let long_cycles = stats
        .intervals
        .iter()
        .filter(|i| i.length_days > config.max_cycle_days)
        .count();
    if long_cycles >= 2 {
        hints.push(Hint {
            kind: HintKind::LongCycles,
            message: format!(
                "You have recorded {long_cycles} cycles longer than {} days. \
                 This can be normal, but worth monitoring.",
                config.max_cycle_days
            ),
        });
    }

    let short_cycles = stats
        .intervals
        .iter()
        .filter(|i| i.length_days < config.min_cycle_days)
        .count();
    if short_cycles >= 2 {
        hints.push(Hint {
            kind: HintKind::ShortCycles,
            message: format!(
                "You have recorded {short_cycles} cycles shorter than {} days.",
                config.min_cycle_days
            ),
        });
    }

    if let Some(prediction) = prediction {
        if prediction.days_since_last > MISSED_PERIOD_DAYS {
            hints.push(Hint {
                kind: HintKind::MissedPeriod,
                message: format!(
                    "It has been over {MISSED_PERIOD_DAYS} days since your last recorded \
                     period. If this is unexpected, please consider consulting a doctor \
                     or taking a pregnancy test."
                ),
            });
        }
    }

    if profile.age < 18 {
        hints.push(Hint {
            kind: HintKind::AgeContext,
            message: "At your age (under 18), cycle variability is often normal as your \
                      body adjusts."
                .to_string(),
        });
    } else if profile.age > 45 {
        hints.push(Hint {
            kind: HintKind::AgeContext,
            message: "At your age (45+), changes in cycle length may be related to \
                      perimenopause."
                .to_string(),
        });
    }

    if let Some(log) = today_log {
        if log.energy < LOW_ENERGY || log.habits.contains(&Habit::LateNight) {
            hints.push(Hint {
                kind: HintKind::Lifestyle,
                message: "High stress or poor sleep can often delay your cycle or make it \
                          irregular."
                    .to_string(),
            });
        }
    }

    hints
}

/// Map today's logged state and the current phase to a canned diagnosis.
///
/// The only diagnostic branch is the luteal PMS-risk pattern; everything
/// else gets a neutral phase statement. Habit and symptom cautions are
/// appended to whichever branch was taken.
pub fn diagnose(
    phase: Phase,
    symptoms: &BTreeSet<Symptom>,
    primary_mood: Option<Mood>,
    secondary_moods: &BTreeSet<Mood>,
    habits: &BTreeSet<Habit>,
) -> Diagnosis {
    let negative_affect = primary_mood.is_some_and(|m| m.is_negative_affect())
        || secondary_moods.iter().any(|m| m.is_negative_affect());

    let mut lifestyle_advice = Vec::new();

    let (diagnosis, mechanism, diet_advice, citation) = if phase == Phase::Luteal && negative_affect
    {
        lifestyle_advice.push(
            "Light aerobic exercise and a steady sleep schedule tend to soften PMS symptoms."
                .to_string(),
        );
        (
            "Mood pattern consistent with premenstrual syndrome (PMS) risk.".to_string(),
            "Falling progesterone and estrogen in the late luteal phase can lower serotonin, \
             which often shows up as irritability, anxiety, or low mood."
                .to_string(),
            "Favor complex carbohydrates, calcium-rich foods, and magnesium; go easy on salt, \
             sugar, and alcohol."
                .to_string(),
            CITATION_PMS.to_string(),
        )
    } else {
        lifestyle_advice.push(
            "Keep logging daily; trends across a few cycles say more than any single day."
                .to_string(),
        );
        (
            format!("No specific pattern detected; you are currently in the {}.", phase.label()),
            "Hormone levels shift across the cycle; mood and energy swings within a phase \
             are common and usually benign."
                .to_string(),
            "A balanced plate with iron-rich foods and steady hydration supports most of \
             the cycle."
                .to_string(),
            CITATION_NEUTRAL.to_string(),
        )
    };

    if habits.contains(&Habit::PainMedication) {
        lifestyle_advice.push(
            "Avoid taking pain medication on an empty stomach; pair it with food to protect \
             your stomach lining."
                .to_string(),
        );
    }
    if habits.contains(&Habit::Caffeine) {
        lifestyle_advice.push(
            "Caffeine during the luteal phase can sharpen anxiety and breast tenderness; \
             consider switching to decaf this week."
                .to_string(),
        );
    }
    if habits.contains(&Habit::LateNight) {
        lifestyle_advice.push(
            "Late nights build sleep debt, which can amplify cramps and mood dips; aim for \
             a consistent bedtime."
                .to_string(),
        );
    }
    if symptoms.contains(&Symptom::Cramps) {
        lifestyle_advice.push(
            "A heating pad and gentle stretching can ease cramps; seek care if the pain is \
             severe or unusual."
                .to_string(),
        );
    }

    Diagnosis {
        diagnosis,
        mechanism,
        diet_advice,
        lifestyle_advice,
        citation,
    }
}
