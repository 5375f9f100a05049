use crate::scoring::domain::{BantScores, MeddicScores, Metric, MetricConfidence, ScoreSet};

pub(super) fn bant() -> BantScores {
    BantScores {
        budget: 8.0,
        authority: 6.0,
        need: 9.0,
        timeline: 5.0,
    }
}

pub(super) fn meddic() -> MeddicScores {
    MeddicScores {
        metrics: 7.0,
        economic_buyer: 8.0,
        decision_criteria: 6.0,
        decision_process: 5.0,
        identify_pain: 9.0,
        champion: 7.0,
    }
}

pub(super) fn uniform_confidences(confidence: f64) -> Vec<MetricConfidence> {
    confidences_with(|_| confidence)
}

pub(super) fn confidences_with(mut confidence: impl FnMut(Metric) -> f64) -> Vec<MetricConfidence> {
    let bant = bant();
    let meddic = meddic();
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let score = bant.get(metric).or_else(|| meddic.get(metric)).unwrap_or(0.0);
            MetricConfidence::new(metric, score, confidence(metric), true)
        })
        .collect()
}

pub(super) fn score_set(confidence: f64) -> ScoreSet {
    ScoreSet::new(bant(), meddic(), uniform_confidences(confidence)).expect("valid score set")
}

pub(super) fn entry(metric: Metric, confidence: f64) -> MetricConfidence {
    MetricConfidence::new(metric, 5.0, confidence, true)
}
