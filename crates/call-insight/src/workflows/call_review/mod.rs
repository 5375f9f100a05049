//! Call review workflow: transcript analysis, human validation, and rep gamification.

pub mod domain;
pub mod rewards;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisReport, AnalyzeRequest, ValidateRequest, ValidationFeedback, ValidationResponse,
};
pub use rewards::{RepLevel, RepProfile, RewardPolicy};
pub use router::call_review_router;
pub use service::{CallReviewError, CallReviewService, MISSING_REQUIRED_FIELDS, TRANSCRIPT_REQUIRED};
pub use session::{ReviewSession, SessionValidation};
