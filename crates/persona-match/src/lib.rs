//! Personality quiz scoring, typology diagnosis, and two-party compatibility.
//!
//! The engine modules (`quiz`, `typology`, `matching`) are pure functions over
//! immutable inputs. `experiment`, `classifier`, and `router` sit around them
//! and connect the engine to the HTTP service.

pub mod classifier;
pub mod config;
pub mod error;
pub mod experiment;
pub mod matching;
pub mod quiz;
pub mod router;
pub mod telemetry;
pub mod typology;
