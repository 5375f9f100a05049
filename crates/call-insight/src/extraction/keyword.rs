use async_trait::async_trait;

use super::insights::{derive_insights, priority_focus};
use super::{ExtractionError, ExtractionSource, TranscriptAnalysis, TranscriptExtractor};
use crate::scoring::{
    BantScores, Framework, MeddicScores, Metric, MetricConfidence, ScoreSet, MAX_METRIC_SCORE,
};

fn keywords(metric: Metric) -> &'static [&'static str] {
    match metric {
        Metric::Budget => &[
            "budget", "cost", "price", "investment", "spend", "allocate", "finance", "funding",
        ],
        Metric::Authority => &[
            "decision", "approve", "stakeholder", "manager", "director", "executive", "sign off",
        ],
        Metric::Need => &[
            "problem", "challenge", "issue", "pain", "requirement", "solution", "improve",
            "optimize",
        ],
        Metric::Timeline => &[
            "when", "timeline", "deadline", "quarter", "month", "asap", "urgent", "schedule",
        ],
        Metric::Metrics => &[
            "measure", "kpi", "metric", "benchmark", "target", "goal", "success", "roi",
        ],
        Metric::EconomicBuyer => &[
            "budget holder", "cfo", "vp", "executive", "final decision", "sign contract",
        ],
        Metric::DecisionCriteria => &[
            "criteria", "evaluate", "compare", "requirements", "must have", "priority",
        ],
        Metric::DecisionProcess => &[
            "process", "steps", "approval", "procurement", "legal", "review", "committee",
        ],
        Metric::IdentifyPain => &[
            "pain point", "struggle", "frustration", "bottleneck", "inefficient", "waste",
        ],
        Metric::Champion => &[
            "advocate", "support", "champion", "sponsor", "enthusiastic", "push", "promote",
        ],
    }
}

/// Score points earned per keyword mention, by framework.
fn points_per_mention(framework: Framework) -> f64 {
    match framework {
        Framework::Bant => 1.5,
        Framework::Meddic => 1.2,
    }
}

/// Confidence granted before any keyword is seen, by framework.
fn confidence_floor(framework: Framework) -> f64 {
    match framework {
        Framework::Bant => 0.3,
        Framework::Meddic => 0.25,
    }
}

/// Deterministic keyword-count heuristics; never calls out of process.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn analyze(&self, transcript: &str) -> TranscriptAnalysis {
        let lowered = transcript.to_lowercase();

        let score = |metric: Metric| {
            let mentions: usize = keywords(metric)
                .iter()
                .map(|keyword| lowered.matches(keyword).count())
                .sum();
            (mentions as f64 * points_per_mention(metric.framework())).min(MAX_METRIC_SCORE)
        };

        let bant = BantScores::from_fn(&score);
        let meddic = MeddicScores::from_fn(&score);

        let confidences = Metric::ALL
            .into_iter()
            .map(|metric| {
                let vocabulary = keywords(metric);
                let present = vocabulary
                    .iter()
                    .filter(|keyword| lowered.contains(*keyword))
                    .count();
                let coverage = present as f64 / vocabulary.len() as f64;
                let confidence = (coverage + confidence_floor(metric.framework())).min(1.0);
                let metric_score = bant.get(metric).or_else(|| meddic.get(metric)).unwrap_or(0.0);
                MetricConfidence::new(metric, metric_score, round_hundredths(confidence), true)
            })
            .collect();

        let scores = ScoreSet::from_clamped_parts(bant, meddic, confidences);
        TranscriptAnalysis {
            insights: derive_insights(&scores),
            priority_focus: priority_focus(&scores),
            sdr_stats: None,
            source: ExtractionSource::Keyword,
            scores,
        }
    }
}

#[async_trait]
impl TranscriptExtractor for KeywordExtractor {
    fn source(&self) -> ExtractionSource {
        ExtractionSource::Keyword
    }

    async fn extract(&self, transcript: &str) -> Result<TranscriptAnalysis, ExtractionError> {
        Ok(self.analyze(transcript))
    }
}

pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
