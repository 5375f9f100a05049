use crate::scoring::{Metric, ScoreSet};

/// Metrics scoring below this on the 0-10 scale get a follow-up recommendation.
const WEAK_METRIC_THRESHOLD: f64 = 5.0;

/// Metrics that produce a next-step insight when weak, in presentation order.
const INSIGHT_METRICS: [Metric; 5] = [
    Metric::Budget,
    Metric::Authority,
    Metric::Champion,
    Metric::Metrics,
    Metric::Timeline,
];

fn insight_for(metric: Metric) -> Option<&'static str> {
    match metric {
        Metric::Budget => Some("Schedule a budget discussion with the finance team"),
        Metric::Authority => Some("Identify and engage the decision-maker"),
        Metric::Champion => Some("Build a stronger relationship with an internal champion"),
        Metric::Metrics => Some("Share ROI calculator and success metrics from similar clients"),
        Metric::Timeline => Some("Clarify implementation timeline and urgency"),
        _ => None,
    }
}

fn focus_for(metric: Metric) -> &'static str {
    match metric {
        Metric::Budget => "Confirm a budget range and who controls it before the next call",
        Metric::Authority => "Map the buying committee and get the decision-maker on the next call",
        Metric::Need => "Dig into the business problem until the prospect states it in their own words",
        Metric::Timeline => "Pin down a target go-live date and the event driving it",
        Metric::Metrics => "Agree on the KPIs the prospect will use to judge success",
        Metric::EconomicBuyer => "Secure direct access to the economic buyer",
        Metric::DecisionCriteria => "Document the evaluation criteria and how each will be weighed",
        Metric::DecisionProcess => "Walk through procurement, legal, and approval steps end to end",
        Metric::IdentifyPain => "Quantify the cost of the current pain in time or money",
        Metric::Champion => "Recruit an internal champion who will sell when you are not in the room",
    }
}

pub(crate) fn derive_insights(scores: &ScoreSet) -> Vec<String> {
    INSIGHT_METRICS
        .into_iter()
        .filter(|metric| scores.score(*metric) < WEAK_METRIC_THRESHOLD)
        .filter_map(insight_for)
        .map(str::to_string)
        .collect()
}

/// Recommendation for the lowest-scoring metric; ties go to the earlier metric.
pub(crate) fn priority_focus(scores: &ScoreSet) -> String {
    let weakest = Metric::ALL
        .into_iter()
        .fold(Metric::Budget, |weakest, metric| {
            if scores.score(metric) < scores.score(weakest) {
                metric
            } else {
                weakest
            }
        });
    focus_for(weakest).to_string()
}
