use serde::{Deserialize, Serialize};

/// Five-step band of a percentage score, used as a content lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    StrongSecondary,
    LeaningSecondary,
    Hybrid,
    LeaningPrimary,
    StrongPrimary,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            0..=29 => Self::StrongSecondary,
            30..=45 => Self::LeaningSecondary,
            46..=54 => Self::Hybrid,
            55..=79 => Self::LeaningPrimary,
            _ => Self::StrongPrimary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::StrongSecondary => "Strong Secondary",
            ScoreBand::LeaningSecondary => "Leaning Secondary",
            ScoreBand::Hybrid => "Hybrid",
            ScoreBand::LeaningPrimary => "Leaning Primary",
            ScoreBand::StrongPrimary => "Strong Primary",
        }
    }
}
