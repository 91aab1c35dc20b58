use crate::quiz::PersonalityLabel;
use crate::typology::{AxisLetter, TypologyCode};
use serde::{Deserialize, Serialize};

/// The three compatibility metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Attraction,
    Stability,
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationTier {
    High,
    Moderate,
    Low,
}

impl Metric {
    /// Lower bounds of the High and Moderate tiers.
    fn thresholds(&self) -> (u8, u8) {
        match self {
            Metric::Attraction => (85, 65),
            Metric::Stability => (80, 60),
            Metric::Conflict => (70, 40),
        }
    }

    pub fn tier(&self, score: u8) -> InterpretationTier {
        let (high, moderate) = self.thresholds();
        if score >= high {
            InterpretationTier::High
        } else if score >= moderate {
            InterpretationTier::Moderate
        } else {
            InterpretationTier::Low
        }
    }

    pub fn headline(&self, tier: InterpretationTier) -> &'static str {
        match (self, tier) {
            (Metric::Attraction, InterpretationTier::High) => "Instant, intense pull",
            (Metric::Attraction, InterpretationTier::Moderate) => {
                "Curious about each other's differences"
            }
            (Metric::Attraction, InterpretationTier::Low) => "Easygoing, friend-like bond",
            (Metric::Stability, InterpretationTier::High) => "Understand each other without words",
            (Metric::Stability, InterpretationTier::Moderate) => {
                "A mature relationship built on adjusting"
            }
            (Metric::Stability, InterpretationTier::Low) => {
                "Takes effort to understand each other's world"
            }
            (Metric::Conflict, InterpretationTier::High) => "Fiery, cat-and-mouse quarrels",
            (Metric::Conflict, InterpretationTier::Moderate) => "Small spats that blow over fast",
            (Metric::Conflict, InterpretationTier::Low) => "Calm waters, hardly any friction",
        }
    }
}

/// Tier and headline for one metric score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub metric: Metric,
    pub score: u8,
    pub tier: InterpretationTier,
    pub headline: &'static str,
}

impl Interpretation {
    pub fn new(metric: Metric, score: u8) -> Self {
        let tier = metric.tier(score);
        Self {
            metric,
            score,
            tier,
            headline: metric.headline(tier),
        }
    }
}

/// Grouping of the two parties' labels used to pick match copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingKind {
    Opposites,
    BothPrimary,
    BothSecondary,
    BothMixed,
    MixedWithPole,
}

impl PairingKind {
    pub fn from_labels(own: PersonalityLabel, other: PersonalityLabel) -> Self {
        use PersonalityLabel::{Mixed, Primary, Secondary};
        match (own, other) {
            (Primary, Secondary) | (Secondary, Primary) => Self::Opposites,
            (Primary, Primary) => Self::BothPrimary,
            (Secondary, Secondary) => Self::BothSecondary,
            (Mixed, Mixed) => Self::BothMixed,
            (Mixed, _) | (_, Mixed) => Self::MixedWithPole,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            PairingKind::Opposites => "Magnet couple: drawn together by their differences",
            PairingKind::BothPrimary => "Success partners who communicate without friction",
            PairingKind::BothSecondary => "Healing couple with deep emotional support",
            PairingKind::BothMixed => "Golden balance: best-friend banter",
            PairingKind::MixedWithPole => "Chameleon chemistry: one leads, one adapts",
        }
    }
}

/// How a personality label combines with the decision letter of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chemistry {
    LogicalPowerhouse,
    EmpathicHealer,
    WarmStrategist,
    GentleCharisma,
    Balanced,
}

impl Chemistry {
    pub fn from_label_and_code(label: PersonalityLabel, code: TypologyCode) -> Self {
        let thinking = code.contains(AxisLetter::T);
        match (label, thinking) {
            (PersonalityLabel::Primary, true) => Self::LogicalPowerhouse,
            (PersonalityLabel::Secondary, false) => Self::EmpathicHealer,
            (PersonalityLabel::Primary, false) => Self::WarmStrategist,
            (PersonalityLabel::Secondary, true) => Self::GentleCharisma,
            (PersonalityLabel::Mixed, _) => Self::Balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typology::validate;

    #[test]
    fn tiers_follow_metric_thresholds() {
        assert_eq!(Metric::Attraction.tier(85), InterpretationTier::High);
        assert_eq!(Metric::Attraction.tier(84), InterpretationTier::Moderate);
        assert_eq!(Metric::Attraction.tier(64), InterpretationTier::Low);
        assert_eq!(Metric::Stability.tier(80), InterpretationTier::High);
        assert_eq!(Metric::Stability.tier(60), InterpretationTier::Moderate);
        assert_eq!(Metric::Conflict.tier(70), InterpretationTier::High);
        assert_eq!(Metric::Conflict.tier(40), InterpretationTier::Moderate);
        assert_eq!(Metric::Conflict.tier(39), InterpretationTier::Low);
    }

    #[test]
    fn pairing_is_symmetric() {
        use PersonalityLabel::{Mixed, Primary, Secondary};
        let labels = [Primary, Secondary, Mixed];
        for own in labels {
            for other in labels {
                assert_eq!(
                    PairingKind::from_labels(own, other),
                    PairingKind::from_labels(other, own)
                );
            }
        }
        assert_eq!(PairingKind::from_labels(Primary, Secondary), PairingKind::Opposites);
        assert_eq!(PairingKind::from_labels(Mixed, Primary), PairingKind::MixedWithPole);
    }

    #[test]
    fn chemistry_depends_on_decision_letter() {
        let intj = validate("INTJ").unwrap();
        let enfp = validate("ENFP").unwrap();
        assert_eq!(
            Chemistry::from_label_and_code(PersonalityLabel::Primary, intj),
            Chemistry::LogicalPowerhouse
        );
        assert_eq!(
            Chemistry::from_label_and_code(PersonalityLabel::Primary, enfp),
            Chemistry::WarmStrategist
        );
        assert_eq!(
            Chemistry::from_label_and_code(PersonalityLabel::Secondary, enfp),
            Chemistry::EmpathicHealer
        );
        assert_eq!(
            Chemistry::from_label_and_code(PersonalityLabel::Mixed, intj),
            Chemistry::Balanced
        );
    }
}
