use super::compatibility::{compatibility, CompatibilityProfile, CompatibilityResult};
use super::content::{Interpretation, Metric, PairingKind};
use crate::quiz::PersonalityLabel;
use serde::Serialize;

/// Compatibility metrics plus the content keys needed to render them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub scores: CompatibilityResult,
    pub interpretations: Vec<Interpretation>,
    pub pairing: PairingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_distance: Option<u8>,
}

impl MatchReport {
    pub fn build(own: &CompatibilityProfile, other: &CompatibilityProfile) -> Self {
        let scores = compatibility(own, other);
        let interpretations = vec![
            Interpretation::new(Metric::Attraction, scores.attraction),
            Interpretation::new(Metric::Stability, scores.stability),
            Interpretation::new(Metric::Conflict, scores.conflict),
        ];
        let pairing = PairingKind::from_labels(
            PersonalityLabel::from_percentage(own.percentage),
            PersonalityLabel::from_percentage(other.percentage),
        );
        let code_distance = own
            .typology
            .zip(other.typology)
            .map(|(left, right)| left.distance(&right));

        Self {
            scores,
            interpretations,
            pairing,
            code_distance,
        }
    }

    pub fn interpretation(&self, metric: Metric) -> Option<&Interpretation> {
        self.interpretations
            .iter()
            .find(|entry| entry.metric == metric)
    }
}
