use crate::typology::{Axis, TypologyCode};
use serde::{Deserialize, Serialize};

const ATTRACTION_BASE: f64 = 60.0;
const ATTRACTION_PER_DELTA_POINT: f64 = 0.4;
const ATTRACTION_ENERGY_CONTRAST: f64 = 5.0;

const STABILITY_BASE: f64 = 50.0;
const STABILITY_SHARED_LETTER: f64 = 20.0;
const STABILITY_CLOSE_SCORES: f64 = 30.0;
const STABILITY_NEAR_SCORES: f64 = 10.0;
const STABILITY_EXTREME_GAP_PENALTY: f64 = 10.0;

const CONFLICT_BASE: f64 = 30.0;
const CONFLICT_HIGH_AVERAGE: f64 = 20.0;
const CONFLICT_LIFESTYLE_CLASH: f64 = 25.0;
const CONFLICT_DECISION_CLASH: f64 = 15.0;

/// One party's input to the compatibility calculation. Deserialisation goes
/// through [`CompatibilityProfile::new`] so the range check always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileFields")]
pub struct CompatibilityProfile {
    pub percentage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typology: Option<TypologyCode>,
}

impl CompatibilityProfile {
    pub fn new(percentage: u8, typology: Option<TypologyCode>) -> Result<Self, ProfileError> {
        if percentage > 100 {
            return Err(ProfileError::PercentageOutOfRange(percentage));
        }
        Ok(Self {
            percentage,
            typology,
        })
    }
}

#[derive(Deserialize)]
struct ProfileFields {
    percentage: u8,
    #[serde(default)]
    typology: Option<TypologyCode>,
}

impl TryFrom<ProfileFields> for CompatibilityProfile {
    type Error = ProfileError;

    fn try_from(fields: ProfileFields) -> Result<Self, Self::Error> {
        Self::new(fields.percentage, fields.typology)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("percentage must be between 0 and 100, found {0}")]
    PercentageOutOfRange(u8),
}

/// Three independent 0-100 metrics; they are not normalized against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub attraction: u8,
    pub stability: u8,
    pub conflict: u8,
}

/// Percentages and codes of both parties, shared by the three metric rules.
struct Pairing {
    delta: f64,
    average: f64,
    codes: Option<(TypologyCode, TypologyCode)>,
}

impl Pairing {
    fn new(own: &CompatibilityProfile, other: &CompatibilityProfile) -> Self {
        let (own_pct, other_pct) = (own.percentage as f64, other.percentage as f64);
        Self {
            delta: (own_pct - other_pct).abs(),
            average: (own_pct + other_pct) / 2.0,
            codes: own.typology.zip(other.typology),
        }
    }

    /// `None` unless both codes are known.
    fn shares(&self, axis: Axis) -> Option<bool> {
        self.codes
            .map(|(own, other)| own.letter(axis) == other.letter(axis))
    }
}

fn attraction(pairing: &Pairing) -> f64 {
    let mut value = ATTRACTION_BASE + pairing.delta * ATTRACTION_PER_DELTA_POINT;
    if pairing.shares(Axis::Energy) == Some(false) {
        value += ATTRACTION_ENERGY_CONTRAST;
    }
    value
}

fn stability(pairing: &Pairing) -> f64 {
    let mut value = STABILITY_BASE;

    if pairing.codes.is_some() {
        if pairing.shares(Axis::Information) == Some(true) {
            value += STABILITY_SHARED_LETTER;
        }
        if pairing.shares(Axis::Lifestyle) == Some(true) {
            value += STABILITY_SHARED_LETTER;
        }
    } else if pairing.delta < 20.0 {
        value += STABILITY_CLOSE_SCORES;
    } else if pairing.delta < 40.0 {
        value += STABILITY_NEAR_SCORES;
    }

    if pairing.delta > 60.0 {
        value -= STABILITY_EXTREME_GAP_PENALTY;
    }
    value
}

fn conflict(pairing: &Pairing) -> f64 {
    let mut value = CONFLICT_BASE;
    if pairing.average >= 70.0 {
        value += CONFLICT_HIGH_AVERAGE;
    }
    if pairing.shares(Axis::Lifestyle) == Some(false) {
        value += CONFLICT_LIFESTYLE_CLASH;
    }
    if pairing.shares(Axis::Decision) == Some(false) {
        value += CONFLICT_DECISION_CLASH;
    }
    value
}

fn finish(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Scores the pairing of `own` with `other`. Missing codes fall back to the
/// percentage-only rules and are never an error.
pub fn compatibility(own: &CompatibilityProfile, other: &CompatibilityProfile) -> CompatibilityResult {
    let pairing = Pairing::new(own, other);
    CompatibilityResult {
        attraction: finish(attraction(&pairing)),
        stability: finish(stability(&pairing)),
        conflict: finish(conflict(&pairing)),
    }
}

/// Convenience form taking the four raw inputs.
pub fn compatibility_from_parts(
    own_pct: u8,
    other_pct: u8,
    own_code: Option<TypologyCode>,
    other_code: Option<TypologyCode>,
) -> CompatibilityResult {
    compatibility(
        &CompatibilityProfile {
            percentage: own_pct,
            typology: own_code,
        },
        &CompatibilityProfile {
            percentage: other_pct,
            typology: other_code,
        },
    )
}
