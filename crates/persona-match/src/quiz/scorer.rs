use super::questionnaire::{max_raw_score, Polarity, QuestionnaireItem, QUESTIONNAIRE};
use crate::typology::TypologyCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Highest value on the agreement scale.
pub const MAX_RESPONSE: u8 = 4;

const PRIMARY_THRESHOLD: u8 = 60;
const SECONDARY_THRESHOLD: u8 = 40;

/// Categorical reading of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityLabel {
    Primary,
    Secondary,
    Mixed,
}

impl PersonalityLabel {
    /// `>= 60` is Primary, `<= 40` is Secondary, 41..=59 is Mixed.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= PRIMARY_THRESHOLD {
            Self::Primary
        } else if percentage <= SECONDARY_THRESHOLD {
            Self::Secondary
        } else {
            Self::Mixed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PersonalityLabel::Primary => "Primary",
            PersonalityLabel::Secondary => "Secondary",
            PersonalityLabel::Mixed => "Mixed",
        }
    }
}

/// Outcome of one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub percentage: u8,
    pub label: PersonalityLabel,
    pub raw_responses: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typology: Option<TypologyCode>,
    pub created_at: DateTime<Utc>,
}

impl ScoreResult {
    pub fn with_typology(&self, code: TypologyCode) -> Self {
        Self {
            typology: Some(code),
            ..self.clone()
        }
    }
}

/// Applies polarity-aware scoring over an item table.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    items: &'a [QuestionnaireItem],
}

impl Default for Scorer<'static> {
    fn default() -> Self {
        Self::new(&QUESTIONNAIRE)
    }
}

impl<'a> Scorer<'a> {
    pub fn new(items: &'a [QuestionnaireItem]) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &'a [QuestionnaireItem] {
        self.items
    }

    /// Scores `responses` in item order. Extra responses are ignored and a
    /// short sequence is scored over the items it covers; both cases only
    /// log a warning.
    pub fn score(&self, responses: &[u8]) -> ScoreResult {
        if responses.len() != self.items.len() {
            warn!(
                answered = responses.len(),
                expected = self.items.len(),
                "response count does not match questionnaire length"
            );
        }

        let raw: u32 = self
            .items
            .iter()
            .zip(responses)
            .map(|(item, &response)| item_points(item.polarity, response))
            .sum();

        let percentage = self.percentage(raw);

        ScoreResult {
            percentage,
            label: PersonalityLabel::from_percentage(percentage),
            raw_responses: responses.to_vec(),
            typology: None,
            created_at: Utc::now(),
        }
    }

    /// Estimates someone else's percentage from yes/no answers to the same
    /// items: agreeing with a Primary item is a full 4, a Secondary item 0.
    pub fn estimate(&self, answers: &[bool]) -> u8 {
        if answers.len() != self.items.len() {
            warn!(
                answered = answers.len(),
                expected = self.items.len(),
                "proxy answer count does not match questionnaire length"
            );
        }

        let raw: u32 = self
            .items
            .iter()
            .zip(answers)
            .map(|(item, &is_yes)| {
                let response = if is_yes { MAX_RESPONSE } else { 0 };
                item_points(item.polarity, response)
            })
            .sum();

        self.percentage(raw)
    }

    fn percentage(&self, raw: u32) -> u8 {
        let max = max_raw_score(self.items);
        if max == 0 {
            return 0;
        }
        let pct = (raw as f64 / max as f64) * 100.0;
        pct.round().clamp(0.0, 100.0) as u8
    }
}

fn item_points(polarity: Polarity, response: u8) -> u32 {
    let response = response.min(MAX_RESPONSE);
    match polarity {
        Polarity::Primary => response as u32,
        Polarity::Secondary => (MAX_RESPONSE - response) as u32,
    }
}

/// Scores against the canonical questionnaire.
pub fn score(responses: &[u8]) -> ScoreResult {
    Scorer::default().score(responses)
}

/// Proxy estimate against the canonical questionnaire.
pub fn estimate_percentage(answers: &[bool]) -> u8 {
    Scorer::default().estimate(answers)
}
