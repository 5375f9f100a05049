use super::common::certain_scores;
use crate::scoring::{HumanValidation, Metric, DEFAULT_ACCURACY_THRESHOLD};
use crate::workflows::call_review::{CallReviewError, RepProfile, ReviewSession, RewardPolicy};

fn start() -> ReviewSession {
    ReviewSession::start(certain_scores(), RepProfile::new("Avery"), 3)
}

#[test]
fn start_queues_lowest_confidence_metrics() {
    let session = start();
    let queued: Vec<Metric> = session.queue().iter().map(|entry| entry.metric).collect();
    assert_eq!(
        queued,
        vec![Metric::Timeline, Metric::DecisionProcess, Metric::Authority]
    );
    assert!(!session.is_complete());
}

#[test]
fn validate_grades_and_dequeues_metric() {
    let policy = RewardPolicy::default();
    let session = start();

    let (session, outcome) = session
        .validate(
            HumanValidation::new("timeline", 6.5),
            DEFAULT_ACCURACY_THRESHOLD,
            &policy,
        )
        .expect("validation accepted");

    assert_eq!(outcome.metric, Metric::Timeline);
    assert_eq!(outcome.ai_score, 5.0);
    assert!(outcome.is_accurate);
    assert_eq!(outcome.points_awarded, 10);
    assert_eq!(session.queue().len(), 2);
    assert_eq!(session.profile().points, 10);

    let entry = session
        .scores()
        .confidence_for(Metric::Timeline)
        .expect("timeline entry");
    assert!(entry.human_validated);
    assert_eq!(entry.human_score, Some(6.5));
    assert_eq!(session.scores().score(Metric::Timeline), 5.0);
}

#[test]
fn lead_score_reflects_human_scores() {
    let policy = RewardPolicy::default();
    let mut session = start();
    for metric in ["timeline", "decisionProcess", "authority"] {
        let score = session.scores().score(metric.parse().expect("known metric"));
        session = session
            .validate(HumanValidation::new(metric, score), 2.0, &policy)
            .expect("validation accepted")
            .0;
    }
    assert!(session.is_complete());
    assert_eq!(session.lead_score().expect("lead score"), 70);

    let (session, outcome) = ReviewSession::start(certain_scores(), RepProfile::new("Avery"), 3)
        .validate(HumanValidation::new("budget", 0.0), 2.0, &policy)
        .expect("validation accepted");
    assert!(!outcome.is_accurate);
    assert_eq!(outcome.points_awarded, 5);
    assert_eq!(session.queue().len(), 3);
    assert!(session.lead_score().expect("lead score") < 63);
}

#[test]
fn rejected_validation_keeps_session_usable() {
    let policy = RewardPolicy::default();
    let (session, _) = start()
        .validate(HumanValidation::new("timeline", 5.0), 2.0, &policy)
        .expect("validation accepted");
    assert_eq!(session.profile().points, 10);

    let result = session.validate(HumanValidation::new("timelnie", 5.0), 2.0, &policy);
    assert!(matches!(result, Err(CallReviewError::Validation(_))));

    assert_eq!(session.profile().points, 10);
    assert_eq!(session.profile().streak, 1);
    assert_eq!(session.queue().len(), 2);

    let (session, outcome) = session
        .validate(HumanValidation::new("authority", 6.0), 2.0, &policy)
        .expect("session continues after a rejection");
    assert!(outcome.is_accurate);
    assert_eq!(session.profile().points, 20);
    assert_eq!(session.profile().streak, 2);
    assert_eq!(session.queue().len(), 1);
}

#[test]
fn out_of_range_human_score_leaves_scores_untouched() {
    let session = start();
    let result = session.validate(
        HumanValidation::new("timeline", 11.0),
        2.0,
        &RewardPolicy::default(),
    );

    assert!(matches!(result, Err(CallReviewError::Validation(_))));
    assert_eq!(session, start());
}

#[test]
fn skip_removes_metric_without_points() {
    let session = start().skip(Metric::DecisionProcess);
    assert_eq!(session.queue().len(), 2);
    assert_eq!(session.profile().points, 0);
    assert!(session
        .queue()
        .iter()
        .all(|entry| entry.metric != Metric::DecisionProcess));
}
