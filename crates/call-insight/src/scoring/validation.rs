use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{score_in_range, Metric, MetricConfidence};

/// Human judgment on a single metric collected from the review queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanValidation {
    pub metric: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl HumanValidation {
    pub fn new(metric: impl Into<String>, score: f64) -> Self {
        Self {
            metric: metric.into(),
            score,
            reasoning: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// Rejections raised while merging human validations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("validation references unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("metric '{0}' was validated more than once in a single batch")]
    DuplicateMetric(String),
    #[error("human score {value} for {metric} is outside [0, 10]")]
    ScoreOutOfRange { metric: Metric, value: f64 },
}

/// Return a copy of `confidences` with each validated metric marked and its human score set.
///
/// Entries without a matching validation are cloned unchanged. The whole batch is rejected
/// when any validation names a metric missing from `confidences` or repeats a metric.
pub fn apply_validations(
    confidences: &[MetricConfidence],
    validations: &[HumanValidation],
) -> Result<Vec<MetricConfidence>, ValidationError> {
    let mut resolved: BTreeMap<Metric, f64> = BTreeMap::new();

    for validation in validations {
        let metric: Metric = validation
            .metric
            .parse()
            .map_err(|_| ValidationError::UnknownMetric(validation.metric.clone()))?;

        if !confidences.iter().any(|entry| entry.metric == metric) {
            return Err(ValidationError::UnknownMetric(validation.metric.clone()));
        }

        if !score_in_range(validation.score) {
            return Err(ValidationError::ScoreOutOfRange {
                metric,
                value: validation.score,
            });
        }

        if resolved.insert(metric, validation.score).is_some() {
            warn!(%metric, "rejecting validation batch with duplicate metric");
            return Err(ValidationError::DuplicateMetric(validation.metric.clone()));
        }
    }

    Ok(confidences
        .iter()
        .map(|entry| match resolved.get(&entry.metric) {
            Some(score) => MetricConfidence {
                human_score: Some(*score),
                human_validated: true,
                ..entry.clone()
            },
            None => entry.clone(),
        })
        .collect())
}
