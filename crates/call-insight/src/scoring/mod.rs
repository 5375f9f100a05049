//! Lead scoring, review queueing, and validation merge for BANT/MEDDIC score sets.
//!
//! Everything in this module is synchronous and free of shared state: each function takes a
//! snapshot and returns a new value.

pub mod accuracy;
pub mod domain;
pub mod lead_score;
pub mod review;
pub mod validation;

#[cfg(test)]
mod tests;

pub use accuracy::{is_accurate, DEFAULT_ACCURACY_THRESHOLD};
pub use domain::{
    BantScores, Framework, MeddicScores, Metric, MetricConfidence, ScoreSet, UnknownMetric,
    MAX_METRIC_SCORE, MIN_METRIC_SCORE,
};
pub use lead_score::{compute_lead_score, ComputationError, BANT_WEIGHT, MEDDIC_WEIGHT};
pub use review::select_for_review;
pub use validation::{apply_validations, HumanValidation, ValidationError};
