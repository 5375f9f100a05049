use chrono::Utc;
use tracing::info;

use super::domain::{
    AnalysisReport, AnalyzeRequest, ValidateRequest, ValidationFeedback, ValidationResponse,
};
use super::rewards::RewardPolicy;
use crate::config::ScoringConfig;
use crate::extraction::{ExtractionSource, ResilientExtractor};
use crate::scoring::{is_accurate, ComputationError, ValidationError};

pub const TRANSCRIPT_REQUIRED: &str = "Transcript is required";
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Service composing extraction, scoring, and feedback grading for the HTTP layer.
pub struct CallReviewService {
    extractor: ResilientExtractor,
    scoring: ScoringConfig,
    rewards: RewardPolicy,
}

impl CallReviewService {
    pub fn new(extractor: ResilientExtractor, scoring: ScoringConfig, rewards: RewardPolicy) -> Self {
        Self {
            extractor,
            scoring,
            rewards,
        }
    }

    /// Source the extractor tries before falling back to synthetic scores.
    pub fn primary_source(&self) -> ExtractionSource {
        self.extractor.primary_source()
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn rewards(&self) -> &RewardPolicy {
        &self.rewards
    }

    /// Extract scores from a transcript and compute the lead score and review queue.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisReport, CallReviewError> {
        let transcript = request
            .transcript
            .filter(|transcript| !transcript.trim().is_empty())
            .ok_or(CallReviewError::InvalidRequest(TRANSCRIPT_REQUIRED))?;

        let analysis = self.extractor.extract(&transcript).await;
        let lead_score = analysis.scores.lead_score()?;
        let review_queue = analysis.scores.review_queue(self.scoring.review_queue_size);

        info!(
            source = analysis.source.label(),
            lead_score,
            queued = review_queue.len(),
            "transcript analyzed"
        );

        Ok(AnalysisReport::from_analysis(
            analysis,
            lead_score,
            review_queue,
            Utc::now(),
        ))
    }

    /// Grade a human score against the AI score using the configured tolerance.
    pub fn validate(&self, request: ValidateRequest) -> Result<ValidationResponse, CallReviewError> {
        let ValidateRequest {
            metric_name,
            ai_score,
            human_score,
            reasoning,
        } = request;

        let (Some(metric_name), Some(ai_score), Some(human_score)) = (
            metric_name.filter(|name| !name.trim().is_empty()),
            ai_score,
            human_score,
        ) else {
            return Err(CallReviewError::InvalidRequest(MISSING_REQUIRED_FIELDS));
        };

        let is_accurate = is_accurate(ai_score, human_score, self.scoring.accuracy_threshold);
        let feedback = ValidationFeedback {
            metric_name,
            ai_score,
            human_score,
            reasoning,
            is_accurate,
            points_awarded: self.rewards.points_for(is_accurate),
            timestamp: Utc::now(),
        };

        info!(
            metric = %feedback.metric_name,
            is_accurate,
            points = feedback.points_awarded,
            "validation graded"
        );

        Ok(ValidationResponse {
            success: true,
            message: feedback.message().to_string(),
            feedback,
        })
    }
}

/// Error raised by the call review service and review sessions.
#[derive(Debug, thiserror::Error)]
pub enum CallReviewError {
    #[error("{0}")]
    InvalidRequest(&'static str),
    #[error(transparent)]
    Computation(#[from] ComputationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
