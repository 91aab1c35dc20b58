mod code;
mod diagnosis;

pub use code::{
    validate, Axis, AxisLetter, Decision, Energy, Information, Lifestyle, Temperament,
    TypologyCode, TypologyError,
};
pub use diagnosis::{diagnose, DiagnosisAnswer, Tally, TIE_BREAKS};
