use super::domain::{
    confidence_in_range, score_in_range, BantScores, MeddicScores, Metric, MetricConfidence,
    MAX_METRIC_SCORE,
};

/// Share of the lead score carried by the BANT average.
pub const BANT_WEIGHT: f64 = 0.35;
/// Share of the lead score carried by the MEDDIC average.
pub const MEDDIC_WEIGHT: f64 = 0.65;
/// Upper bound of the composite lead score.
pub const MAX_LEAD_SCORE: u8 = 100;

/// Lifts 0-10 sub-score averages onto the 0-100 lead score basis.
const PERCENT_SCALE: f64 = MAX_LEAD_SCORE as f64 / MAX_METRIC_SCORE;

/// Internal invariant violations surfaced by the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    #[error("empty confidence set")]
    EmptyConfidenceSet,
    #[error("confidence {value} for {metric} is outside [0, 1]")]
    ConfidenceOutOfRange { metric: Metric, value: f64 },
    #[error("score {value} for {metric} is outside [0, 10]")]
    ScoreOutOfRange { metric: Metric, value: f64 },
    #[error("confidence entry for {metric} carries score {entry} but the framework group has {group}")]
    ScoreMismatch { metric: Metric, group: f64, entry: f64 },
    #[error("no confidence entry for {0}")]
    MissingConfidence(Metric),
    #[error("more than one confidence entry for {0}")]
    DuplicateConfidence(Metric),
}

/// Combine BANT and MEDDIC averages into a 0-100 lead score discounted by confidence.
///
/// The averages are weighted 35/65 after scaling to 0-100, then multiplied by the square
/// root of the mean confidence so moderate uncertainty shrinks the score sub-linearly.
pub fn compute_lead_score(
    bant: &BantScores,
    meddic: &MeddicScores,
    confidences: &[MetricConfidence],
) -> Result<u8, ComputationError> {
    if confidences.is_empty() {
        return Err(ComputationError::EmptyConfidenceSet);
    }

    for (metric, value) in bant.iter().chain(meddic.iter()) {
        if !score_in_range(value) {
            return Err(ComputationError::ScoreOutOfRange { metric, value });
        }
    }

    let mut confidence_total = 0.0;
    for entry in confidences {
        if !confidence_in_range(entry.confidence) {
            return Err(ComputationError::ConfidenceOutOfRange {
                metric: entry.metric,
                value: entry.confidence,
            });
        }
        confidence_total += entry.confidence;
    }

    let bant_avg = bant.average() * PERCENT_SCALE;
    let meddic_avg = meddic.average() * PERCENT_SCALE;
    let raw = BANT_WEIGHT * bant_avg + MEDDIC_WEIGHT * meddic_avg;

    let avg_confidence = confidence_total / confidences.len() as f64;
    let confidence_factor = avg_confidence.sqrt();

    let lead_score = (raw * confidence_factor)
        .round()
        .clamp(0.0, f64::from(MAX_LEAD_SCORE));

    Ok(lead_score as u8)
}
