use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lead_score::{compute_lead_score, ComputationError};
use super::review::select_for_review;
use super::validation::{apply_validations, HumanValidation, ValidationError};

/// Lowest score a qualification metric can carry.
pub const MIN_METRIC_SCORE: f64 = 0.0;
/// Highest score a qualification metric can carry.
pub const MAX_METRIC_SCORE: f64 = 10.0;

/// Qualification framework a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Bant,
    Meddic,
}

impl Framework {
    pub fn label(self) -> &'static str {
        match self {
            Framework::Bant => "BANT",
            Framework::Meddic => "MEDDIC",
        }
    }
}

/// Closed set of qualification criteria scored from a call transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Budget,
    Authority,
    Need,
    Timeline,
    Metrics,
    EconomicBuyer,
    DecisionCriteria,
    DecisionProcess,
    IdentifyPain,
    Champion,
}

impl Metric {
    pub const BANT: [Metric; 4] = [
        Metric::Budget,
        Metric::Authority,
        Metric::Need,
        Metric::Timeline,
    ];

    pub const MEDDIC: [Metric; 6] = [
        Metric::Metrics,
        Metric::EconomicBuyer,
        Metric::DecisionCriteria,
        Metric::DecisionProcess,
        Metric::IdentifyPain,
        Metric::Champion,
    ];

    pub const ALL: [Metric; 10] = [
        Metric::Budget,
        Metric::Authority,
        Metric::Need,
        Metric::Timeline,
        Metric::Metrics,
        Metric::EconomicBuyer,
        Metric::DecisionCriteria,
        Metric::DecisionProcess,
        Metric::IdentifyPain,
        Metric::Champion,
    ];

    pub fn framework(self) -> Framework {
        match self {
            Metric::Budget | Metric::Authority | Metric::Need | Metric::Timeline => Framework::Bant,
            _ => Framework::Meddic,
        }
    }

    /// Wire name used in request and response payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Budget => "budget",
            Metric::Authority => "authority",
            Metric::Need => "need",
            Metric::Timeline => "timeline",
            Metric::Metrics => "metrics",
            Metric::EconomicBuyer => "economicBuyer",
            Metric::DecisionCriteria => "decisionCriteria",
            Metric::DecisionProcess => "decisionProcess",
            Metric::IdentifyPain => "identifyPain",
            Metric::Champion => "champion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Budget => "Budget",
            Metric::Authority => "Authority",
            Metric::Need => "Need",
            Metric::Timeline => "Timeline",
            Metric::Metrics => "Metrics",
            Metric::EconomicBuyer => "Economic Buyer",
            Metric::DecisionCriteria => "Decision Criteria",
            Metric::DecisionProcess => "Decision Process",
            Metric::IdentifyPain => "Identify Pain",
            Metric::Champion => "Champion",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a metric name does not match any BANT or MEDDIC criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    /// Accepts the camelCase wire names as well as snake_case and spaced spellings.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownMetric(raw.to_string()))
    }
}

/// Budget, Authority, Need, Timeline sub-scores on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BantScores {
    pub budget: f64,
    pub authority: f64,
    pub need: f64,
    pub timeline: f64,
}

impl BantScores {
    pub fn from_fn(mut score: impl FnMut(Metric) -> f64) -> Self {
        Self {
            budget: score(Metric::Budget),
            authority: score(Metric::Authority),
            need: score(Metric::Need),
            timeline: score(Metric::Timeline),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Budget => Some(self.budget),
            Metric::Authority => Some(self.authority),
            Metric::Need => Some(self.need),
            Metric::Timeline => Some(self.timeline),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::BANT
            .into_iter()
            .filter_map(move |metric| self.get(metric).map(|score| (metric, score)))
    }

    pub fn average(&self) -> f64 {
        (self.budget + self.authority + self.need + self.timeline) / Metric::BANT.len() as f64
    }
}

/// Metrics, Economic buyer, Decision criteria, Decision process, Identify pain, Champion
/// sub-scores on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeddicScores {
    pub metrics: f64,
    pub economic_buyer: f64,
    pub decision_criteria: f64,
    pub decision_process: f64,
    pub identify_pain: f64,
    pub champion: f64,
}

impl MeddicScores {
    pub fn from_fn(mut score: impl FnMut(Metric) -> f64) -> Self {
        Self {
            metrics: score(Metric::Metrics),
            economic_buyer: score(Metric::EconomicBuyer),
            decision_criteria: score(Metric::DecisionCriteria),
            decision_process: score(Metric::DecisionProcess),
            identify_pain: score(Metric::IdentifyPain),
            champion: score(Metric::Champion),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Metrics => Some(self.metrics),
            Metric::EconomicBuyer => Some(self.economic_buyer),
            Metric::DecisionCriteria => Some(self.decision_criteria),
            Metric::DecisionProcess => Some(self.decision_process),
            Metric::IdentifyPain => Some(self.identify_pain),
            Metric::Champion => Some(self.champion),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::MEDDIC
            .into_iter()
            .filter_map(move |metric| self.get(metric).map(|score| (metric, score)))
    }

    pub fn average(&self) -> f64 {
        (self.metrics
            + self.economic_buyer
            + self.decision_criteria
            + self.decision_process
            + self.identify_pain
            + self.champion)
            / Metric::MEDDIC.len() as f64
    }
}

/// Certainty attached to a single metric score, plus any human override.
///
/// Confidence describes how sure the extractor is that `score` is correct, not how strong the
/// evidence was: a zero score can carry high confidence when the topic clearly never came up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfidence {
    pub metric: Metric,
    pub score: f64,
    pub confidence: f64,
    pub ai_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_score: Option<f64>,
    #[serde(default)]
    pub human_validated: bool,
}

impl MetricConfidence {
    pub fn new(metric: Metric, score: f64, confidence: f64, ai_generated: bool) -> Self {
        Self {
            metric,
            score,
            confidence,
            ai_generated,
            human_score: None,
            human_validated: false,
        }
    }

    /// Human score when one was recorded, otherwise the extracted score.
    pub fn effective_score(&self) -> f64 {
        self.human_score.unwrap_or(self.score)
    }
}

/// BANT and MEDDIC groups with one confidence entry per metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    bant: BantScores,
    meddic: MeddicScores,
    confidences: Vec<MetricConfidence>,
}

impl ScoreSet {
    /// Assemble a score set, rejecting out-of-range values and missing or duplicate entries.
    pub fn new(
        bant: BantScores,
        meddic: MeddicScores,
        confidences: Vec<MetricConfidence>,
    ) -> Result<Self, ComputationError> {
        check_parts(&bant, &meddic, &confidences)?;
        Ok(Self {
            bant,
            meddic,
            confidences,
        })
    }

    /// Assembly path for extractors that clamp every value before building the set.
    pub(crate) fn from_clamped_parts(
        bant: BantScores,
        meddic: MeddicScores,
        confidences: Vec<MetricConfidence>,
    ) -> Self {
        debug_assert!(check_parts(&bant, &meddic, &confidences).is_ok());
        Self {
            bant,
            meddic,
            confidences,
        }
    }

    pub fn bant(&self) -> &BantScores {
        &self.bant
    }

    pub fn meddic(&self) -> &MeddicScores {
        &self.meddic
    }

    pub fn confidences(&self) -> &[MetricConfidence] {
        &self.confidences
    }

    pub fn score(&self, metric: Metric) -> f64 {
        match metric.framework() {
            Framework::Bant => self.bant.get(metric),
            Framework::Meddic => self.meddic.get(metric),
        }
        .unwrap_or(MIN_METRIC_SCORE)
    }

    pub fn confidence_for(&self, metric: Metric) -> Option<&MetricConfidence> {
        self.confidences.iter().find(|entry| entry.metric == metric)
    }

    pub fn lead_score(&self) -> Result<u8, ComputationError> {
        compute_lead_score(&self.bant, &self.meddic, &self.confidences)
    }

    /// Lead score with human scores substituted and validated metrics treated as certain.
    pub fn effective_lead_score(&self) -> Result<u8, ComputationError> {
        let human_score = |metric: Metric, fallback: f64| {
            self.confidence_for(metric)
                .and_then(|entry| entry.human_score)
                .unwrap_or(fallback)
        };
        let bant = BantScores::from_fn(|metric| human_score(metric, self.score(metric)));
        let meddic = MeddicScores::from_fn(|metric| human_score(metric, self.score(metric)));
        let confidences: Vec<MetricConfidence> = self
            .confidences
            .iter()
            .map(|entry| {
                if entry.human_validated {
                    MetricConfidence {
                        confidence: 1.0,
                        ..entry.clone()
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();

        compute_lead_score(&bant, &meddic, &confidences)
    }

    pub fn review_queue(&self, count: usize) -> Vec<MetricConfidence> {
        select_for_review(&self.confidences, count)
    }

    /// Fold a batch of human judgments into a new score set; `self` is left untouched.
    pub fn with_validations(
        &self,
        validations: &[HumanValidation],
    ) -> Result<ScoreSet, ValidationError> {
        let confidences = apply_validations(&self.confidences, validations)?;
        Ok(Self {
            bant: self.bant,
            meddic: self.meddic,
            confidences,
        })
    }
}

pub(crate) fn score_in_range(value: f64) -> bool {
    (MIN_METRIC_SCORE..=MAX_METRIC_SCORE).contains(&value)
}

pub(crate) fn confidence_in_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn check_parts(
    bant: &BantScores,
    meddic: &MeddicScores,
    confidences: &[MetricConfidence],
) -> Result<(), ComputationError> {
    for (metric, value) in bant.iter().chain(meddic.iter()) {
        if !score_in_range(value) {
            return Err(ComputationError::ScoreOutOfRange { metric, value });
        }
    }

    let mut seen = Vec::with_capacity(Metric::ALL.len());
    for entry in confidences {
        if seen.contains(&entry.metric) {
            return Err(ComputationError::DuplicateConfidence(entry.metric));
        }
        if !confidence_in_range(entry.confidence) {
            return Err(ComputationError::ConfidenceOutOfRange {
                metric: entry.metric,
                value: entry.confidence,
            });
        }
        if !score_in_range(entry.score) {
            return Err(ComputationError::ScoreOutOfRange {
                metric: entry.metric,
                value: entry.score,
            });
        }
        let group = match entry.metric.framework() {
            Framework::Bant => bant.get(entry.metric),
            Framework::Meddic => meddic.get(entry.metric),
        }
        .unwrap_or(MIN_METRIC_SCORE);
        if entry.score != group {
            return Err(ComputationError::ScoreMismatch {
                metric: entry.metric,
                group,
                entry: entry.score,
            });
        }
        seen.push(entry.metric);
    }

    match Metric::ALL.into_iter().find(|metric| !seen.contains(metric)) {
        Some(missing) => Err(ComputationError::MissingConfidence(missing)),
        None => Ok(()),
    }
}
