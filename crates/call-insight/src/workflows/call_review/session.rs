use std::slice;

use super::rewards::{RepProfile, RewardPolicy};
use super::service::CallReviewError;
use crate::scoring::{
    is_accurate, ComputationError, HumanValidation, Metric, MetricConfidence, ScoreSet,
    ValidationError,
};

/// Result of grading one human validation inside a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionValidation {
    pub metric: Metric,
    pub ai_score: f64,
    pub human_score: f64,
    pub is_accurate: bool,
    pub points_awarded: u32,
}

/// One rep working through the review queue of one analyzed call.
///
/// Transitions hand back the next session. A rejected validation leaves the caller's session
/// as it was, so points, streak, and queue survive a mistyped metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    scores: ScoreSet,
    queue: Vec<MetricConfidence>,
    profile: RepProfile,
}

impl ReviewSession {
    pub fn start(scores: ScoreSet, profile: RepProfile, queue_size: usize) -> Self {
        let queue = scores.review_queue(queue_size);
        Self {
            scores,
            queue,
            profile,
        }
    }

    pub fn scores(&self) -> &ScoreSet {
        &self.scores
    }

    pub fn queue(&self) -> &[MetricConfidence] {
        &self.queue
    }

    pub fn profile(&self) -> &RepProfile {
        &self.profile
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Lead score reflecting the human scores recorded so far.
    pub fn lead_score(&self) -> Result<u8, ComputationError> {
        self.scores.effective_lead_score()
    }

    /// Merge a human score, grade it, award points, and drop the metric from the queue.
    pub fn validate(
        &self,
        validation: HumanValidation,
        threshold: f64,
        policy: &RewardPolicy,
    ) -> Result<(Self, SessionValidation), CallReviewError> {
        let scores = self.scores.with_validations(slice::from_ref(&validation))?;
        let metric: Metric = validation
            .metric
            .parse()
            .map_err(|_| ValidationError::UnknownMetric(validation.metric.clone()))?;

        let ai_score = self.scores.score(metric);
        let accurate = is_accurate(ai_score, validation.score, threshold);
        let (profile, points_awarded) = self.profile.record_validation(accurate, policy);

        let queue = self
            .queue
            .iter()
            .filter(|entry| entry.metric != metric)
            .cloned()
            .collect();

        let outcome = SessionValidation {
            metric,
            ai_score,
            human_score: validation.score,
            is_accurate: accurate,
            points_awarded,
        };

        Ok((
            Self {
                scores,
                queue,
                profile,
            },
            outcome,
        ))
    }

    /// Drop a metric from the queue without scoring it.
    pub fn skip(mut self, metric: Metric) -> Self {
        self.queue.retain(|entry| entry.metric != metric);
        self
    }
}
