use super::common::*;
use crate::scoring::domain::Metric;
use crate::scoring::validation::{apply_validations, HumanValidation, ValidationError};
use crate::scoring::{is_accurate, DEFAULT_ACCURACY_THRESHOLD};

#[test]
fn marks_targeted_entries_and_leaves_the_rest_alone() {
    let confidences = uniform_confidences(0.45);
    let validations = vec![
        HumanValidation::new("timeline", 2.0).with_reasoning("no date discussed"),
        HumanValidation::new("champion", 9.0),
    ];

    let merged = apply_validations(&confidences, &validations).expect("merge succeeds");

    assert_eq!(merged.len(), confidences.len());
    for (before, after) in confidences.iter().zip(&merged) {
        match after.metric {
            Metric::Timeline => {
                assert!(after.human_validated);
                assert_eq!(after.human_score, Some(2.0));
                assert_eq!(after.score, before.score);
                assert_eq!(after.confidence, before.confidence);
            }
            Metric::Champion => {
                assert!(after.human_validated);
                assert_eq!(after.human_score, Some(9.0));
            }
            _ => assert_eq!(after, before),
        }
    }
}

#[test]
fn empty_batch_is_a_no_op() {
    let confidences = uniform_confidences(0.45);
    let merged = apply_validations(&confidences, &[]).expect("merge succeeds");
    assert_eq!(merged, confidences);
}

#[test]
fn unknown_metric_name_rejects_the_batch() {
    let result = apply_validations(
        &uniform_confidences(0.5),
        &[HumanValidation::new("velocity", 4.0)],
    );
    assert_eq!(
        result,
        Err(ValidationError::UnknownMetric("velocity".to_string()))
    );
}

#[test]
fn metric_missing_from_the_input_set_is_rejected() {
    let queue = vec![entry(Metric::Budget, 0.2), entry(Metric::Need, 0.3)];

    let result = apply_validations(&queue, &[HumanValidation::new("champion", 4.0)]);

    assert_eq!(
        result,
        Err(ValidationError::UnknownMetric("champion".to_string()))
    );
}

#[test]
fn duplicate_metrics_reject_the_batch() {
    let result = apply_validations(
        &uniform_confidences(0.5),
        &[
            HumanValidation::new("budget", 4.0),
            HumanValidation::new("budget", 6.0),
        ],
    );
    assert_eq!(
        result,
        Err(ValidationError::DuplicateMetric("budget".to_string()))
    );
}

#[test]
fn out_of_range_human_scores_are_rejected() {
    let result = apply_validations(
        &uniform_confidences(0.5),
        &[HumanValidation::new("need", 12.0)],
    );
    assert!(matches!(
        result,
        Err(ValidationError::ScoreOutOfRange {
            metric: Metric::Need,
            ..
        })
    ));
}

#[test]
fn accuracy_threshold_is_inclusive() {
    assert!(is_accurate(10.0, 12.0, 2.0));
    assert!(!is_accurate(10.0, 13.0, 2.0));
    assert!(is_accurate(7.0, 5.0, DEFAULT_ACCURACY_THRESHOLD));
}

#[test]
fn accuracy_threshold_can_be_overridden() {
    assert!(!is_accurate(6.0, 7.0, 0.5));
    assert!(is_accurate(6.0, 9.0, 3.0));
    assert!(is_accurate(4.0, 4.0, 0.0));
}
