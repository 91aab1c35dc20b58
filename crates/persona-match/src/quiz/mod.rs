mod bands;
pub mod questionnaire;
mod scorer;

pub use bands::ScoreBand;
pub use questionnaire::{
    DiagnosisQuestion, Polarity, QuestionCategory, QuestionnaireItem, DIAGNOSIS_QUESTIONS,
    QUESTIONNAIRE,
};
pub use scorer::{
    estimate_percentage, score, PersonalityLabel, ScoreResult, Scorer, MAX_RESPONSE,
};
