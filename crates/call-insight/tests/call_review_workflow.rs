//! End-to-end scenarios for the call review workflow, driven through the public service facade
//! and HTTP router.

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use call_insight::config::ScoringConfig;
    use call_insight::extraction::{
        ExtractionError, ExtractionSource, KeywordExtractor, ResilientExtractor,
        SyntheticScoreGenerator, TranscriptAnalysis, TranscriptExtractor,
    };
    use call_insight::scoring::{BantScores, MeddicScores, Metric, MetricConfidence, ScoreSet};
    use call_insight::workflows::call_review::{CallReviewService, RewardPolicy};

    pub const TRANSCRIPT: &str = "\
Rep: Who else is involved in the decision?
Prospect: Our VP of operations approves purchases and the CFO owns the budget.
Rep: What problem would this fix?
Prospect: Reconciliation is a manual bottleneck and we lose hours every week.
Rep: How would you measure success?
Prospect: Cutting the close by two days would deliver real ROI. We want it live next quarter.";

    pub struct UnreachableExtractor;

    #[async_trait]
    impl TranscriptExtractor for UnreachableExtractor {
        fn source(&self) -> ExtractionSource {
            ExtractionSource::Generative
        }

        async fn extract(&self, _transcript: &str) -> Result<TranscriptAnalysis, ExtractionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(ExtractionError::UpstreamStatus(504))
        }
    }

    pub fn service(primary: Arc<dyn TranscriptExtractor>) -> Arc<CallReviewService> {
        Arc::new(CallReviewService::new(
            ResilientExtractor::new(
                primary,
                SyntheticScoreGenerator::seeded(3),
                Duration::from_millis(100),
            ),
            ScoringConfig::default(),
            RewardPolicy::default(),
        ))
    }

    pub fn keyword_service() -> Arc<CallReviewService> {
        service(Arc::new(KeywordExtractor))
    }

    pub fn discovery_scores(confidence: f64) -> ScoreSet {
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
                MetricConfidence::new(metric, score, confidence, true)
            })
            .collect();
        ScoreSet::new(bant, meddic, confidences).expect("valid score set")
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use call_insight::scoring::{HumanValidation, Metric};
use call_insight::workflows::call_review::{
    call_review_router, AnalyzeRequest, RepLevel, RepProfile, ReviewSession, RewardPolicy,
};
use common::*;

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}

#[test]
fn discovery_call_scores_sixty_three() {
    let scores = discovery_scores(0.8);
    assert_eq!(scores.lead_score().expect("lead score"), 63);
}

#[tokio::test]
async fn analyze_then_validate_round_trip_over_http() {
    let router = call_review_router(keyword_service());

    let (status, report) =
        post_json(router.clone(), "/analyze", json!({ "transcript": TRANSCRIPT })).await;
    assert_eq!(status, StatusCode::OK);

    let first = &report["reviewQueue"][0];
    let metric = first["metric"].as_str().expect("metric name").to_string();
    let ai_score = first["score"].as_f64().expect("score");

    let (status, feedback) = post_json(
        router,
        "/validate",
        json!({ "metricName": metric, "aiScore": ai_score, "humanScore": ai_score + 1.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(feedback["feedback"]["isAccurate"], true);
    assert_eq!(feedback["feedback"]["pointsAwarded"], 10);
    assert_eq!(feedback["feedback"]["metricName"], metric.as_str());
}

#[tokio::test]
async fn unreachable_model_still_produces_complete_report() {
    let router = call_review_router(service(Arc::new(UnreachableExtractor)));

    let (status, report) =
        post_json(router, "/analyze", json!({ "transcript": TRANSCRIPT })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["source"], "synthetic");
    let metrics: Vec<&str> = report["confidenceScores"]
        .as_array()
        .expect("confidence array")
        .iter()
        .filter_map(|entry| entry["metric"].as_str())
        .collect();
    assert_eq!(metrics.len(), Metric::ALL.len());
    for metric in Metric::ALL {
        assert!(metrics.contains(&metric.as_str()), "{metric} missing");
    }
}

#[tokio::test]
async fn analysis_feeds_a_review_session() {
    let service = keyword_service();
    let report = service
        .analyze(AnalyzeRequest::new(TRANSCRIPT))
        .await
        .expect("analysis succeeds");
    assert_eq!(report.review_queue.len(), 3);

    let scores = discovery_scores(0.8);
    let policy = RewardPolicy::default();
    let mut session = ReviewSession::start(scores, RepProfile::new("Riley"), 10);

    for metric in Metric::ALL {
        let ai_score = session.scores().score(metric);
        session = session
            .validate(HumanValidation::new(metric.as_str(), ai_score), 2.0, &policy)
            .expect("validation accepted")
            .0;
    }

    assert!(session.is_complete());
    assert_eq!(session.lead_score().expect("lead score"), 70);

    let profile = session.profile();
    assert_eq!(profile.total_validations, 10);
    assert_eq!(profile.accuracy, 100);
    assert_eq!(profile.points, 10 * 10 + 2 * 10);
    assert_eq!(profile.level, RepLevel::Bronze);
}
