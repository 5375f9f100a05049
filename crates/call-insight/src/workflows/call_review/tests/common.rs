use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::extraction::{
    ExtractionError, ExtractionSource, KeywordExtractor, ResilientExtractor,
    SyntheticScoreGenerator, TranscriptAnalysis, TranscriptExtractor,
};
use crate::scoring::{BantScores, MeddicScores, Metric, MetricConfidence, ScoreSet};
use crate::workflows::call_review::{CallReviewService, RewardPolicy};

pub(super) const DISCOVERY_CALL: &str = "\
Rep: Thanks for joining. What budget have you set aside for this?
Prospect: Finance approved funding for the project. Our CFO signs off on the final decision.
Rep: What pain are you seeing today?
Prospect: Manual review is a bottleneck and a waste of time for the team.
Rep: What is the timeline?
Prospect: We want it live before the end of the quarter. Our director is a strong advocate.";

pub(super) struct StalledExtractor;

#[async_trait]
impl TranscriptExtractor for StalledExtractor {
    fn source(&self) -> ExtractionSource {
        ExtractionSource::Generative
    }

    async fn extract(&self, transcript: &str) -> Result<TranscriptAnalysis, ExtractionError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(KeywordExtractor.analyze(transcript))
    }
}

pub(super) fn keyword_service() -> Arc<CallReviewService> {
    service_with(Arc::new(KeywordExtractor), Duration::from_secs(5))
}

pub(super) fn stalled_service() -> Arc<CallReviewService> {
    service_with(Arc::new(StalledExtractor), Duration::from_millis(50))
}

fn service_with(primary: Arc<dyn TranscriptExtractor>, timeout: Duration) -> Arc<CallReviewService> {
    let extractor = ResilientExtractor::new(primary, SyntheticScoreGenerator::seeded(11), timeout);
    Arc::new(CallReviewService::new(
        extractor,
        ScoringConfig::default(),
        RewardPolicy::default(),
    ))
}

/// Scores averaging 7.0 in both frameworks with every metric at full confidence.
pub(super) fn certain_scores() -> ScoreSet {
    let bant = BantScores {
        budget: 8.0,
        authority: 6.0,
        need: 9.0,
        timeline: 5.0,
    };
    let meddic = MeddicScores {
        metrics: 7.0,
        economic_buyer: 8.0,
        decision_criteria: 6.0,
        decision_process: 5.0,
        identify_pain: 9.0,
        champion: 7.0,
    };
    let confidences = Metric::ALL
        .into_iter()
        .map(|metric| {
            let score = bant.get(metric).or_else(|| meddic.get(metric)).unwrap_or(0.0);
            let confidence = match metric {
                Metric::Timeline => 0.4,
                Metric::DecisionProcess => 0.5,
                Metric::Authority => 0.6,
                _ => 1.0,
            };
            MetricConfidence::new(metric, score, confidence, true)
        })
        .collect();
    ScoreSet::new(bant, meddic, confidences).expect("valid score set")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
