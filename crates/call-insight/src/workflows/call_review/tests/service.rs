use super::common::*;
use crate::extraction::ExtractionSource;
use crate::scoring::Metric;
use crate::workflows::call_review::{
    AnalyzeRequest, CallReviewError, ValidateRequest, MISSING_REQUIRED_FIELDS, TRANSCRIPT_REQUIRED,
};

fn validate_request(ai_score: f64, human_score: f64) -> ValidateRequest {
    ValidateRequest {
        metric_name: Some("budget".to_string()),
        ai_score: Some(ai_score),
        human_score: Some(human_score),
        reasoning: Some("Prospect never named a number".to_string()),
    }
}

#[tokio::test]
async fn analyze_reports_every_metric() {
    let service = keyword_service();
    let report = service
        .analyze(AnalyzeRequest::new(DISCOVERY_CALL))
        .await
        .expect("analysis succeeds");

    assert_eq!(report.source, ExtractionSource::Keyword);
    assert_eq!(report.confidence_scores.len(), Metric::ALL.len());
    assert_eq!(report.review_queue.len(), 3);
    assert!(report.lead_score <= 100);
    assert!(!report.priority_focus.is_empty());
}

#[tokio::test]
async fn analyze_review_queue_is_lowest_confidence_first() {
    let report = keyword_service()
        .analyze(AnalyzeRequest::new(DISCOVERY_CALL))
        .await
        .expect("analysis succeeds");

    let queued: Vec<f64> = report.review_queue.iter().map(|e| e.confidence).collect();
    assert!(queued.windows(2).all(|pair| pair[0] <= pair[1]));

    let highest_queued = queued.last().copied().unwrap_or_default();
    let unqueued = report
        .confidence_scores
        .iter()
        .filter(|entry| !report.review_queue.iter().any(|q| q.metric == entry.metric));
    for entry in unqueued {
        assert!(entry.confidence >= highest_queued);
    }
}

#[tokio::test]
async fn analyze_rejects_blank_transcripts() {
    let service = keyword_service();
    for request in [AnalyzeRequest::default(), AnalyzeRequest::new("   \n")] {
        match service.analyze(request).await {
            Err(CallReviewError::InvalidRequest(message)) => {
                assert_eq!(message, TRANSCRIPT_REQUIRED)
            }
            other => panic!("expected invalid request, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn analyze_falls_back_to_synthetic_scores_on_timeout() {
    let report = stalled_service()
        .analyze(AnalyzeRequest::new(DISCOVERY_CALL))
        .await
        .expect("fallback analysis succeeds");

    assert_eq!(report.source, ExtractionSource::Synthetic);
    assert_eq!(report.confidence_scores.len(), Metric::ALL.len());
    assert!(report.confidence_scores.iter().all(|entry| !entry.ai_generated));
}

#[test]
fn validate_within_threshold_is_accurate() {
    let service = keyword_service();
    let response = service
        .validate(validate_request(7.0, 8.5))
        .expect("validation succeeds");

    assert!(response.success);
    assert!(response.feedback.is_accurate);
    assert_eq!(response.feedback.points_awarded, 10);
    assert_eq!(response.message, "Great job! Your assessment aligns with the AI.");
}

#[test]
fn validate_outside_threshold_is_a_correction() {
    let response = keyword_service()
        .validate(validate_request(3.0, 8.0))
        .expect("validation succeeds");

    assert!(!response.feedback.is_accurate);
    assert_eq!(response.feedback.points_awarded, 5);
    assert_eq!(
        response.message,
        "Thank you for the correction. This helps improve our model."
    );
}

#[test]
fn validate_boundary_difference_counts_as_accurate() {
    let response = keyword_service()
        .validate(validate_request(10.0, 12.0))
        .expect("validation succeeds");
    assert!(response.feedback.is_accurate);
}

#[test]
fn validate_requires_metric_and_scores() {
    let service = keyword_service();
    let mut missing_human = validate_request(5.0, 5.0);
    missing_human.human_score = None;
    let mut blank_metric = validate_request(5.0, 5.0);
    blank_metric.metric_name = Some(String::new());

    for request in [ValidateRequest::default(), missing_human, blank_metric] {
        match service.validate(request) {
            Err(CallReviewError::InvalidRequest(message)) => {
                assert_eq!(message, MISSING_REQUIRED_FIELDS)
            }
            other => panic!("expected invalid request, got {other:?}"),
        }
    }
}
