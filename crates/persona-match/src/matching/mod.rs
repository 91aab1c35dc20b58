mod compatibility;
mod content;
mod report;

pub use compatibility::{
    compatibility, compatibility_from_parts, CompatibilityProfile, CompatibilityResult,
    ProfileError,
};
pub use content::{Chemistry, Interpretation, InterpretationTier, Metric, PairingKind};
pub use report::MatchReport;
