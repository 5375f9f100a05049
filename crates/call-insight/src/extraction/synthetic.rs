use std::ops::Range;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::insights::{derive_insights, priority_focus};
use super::keyword::round_hundredths;
use super::{ExtractionSource, SdrStats, TranscriptAnalysis};
use crate::scoring::{BantScores, MeddicScores, Metric, MetricConfidence, ScoreSet};

/// Mid-range band so synthetic scores never look trustworthy enough to skip review.
const SYNTHETIC_CONFIDENCE: Range<f64> = 0.3..0.6;

/// Leads every synthetic insight list so the placeholder nature is visible to reps.
pub(crate) const SYNTHETIC_NOTICE: &str =
    "Transcript analysis unavailable: scores are synthetic placeholders pending human review";

/// Randomized stand-in analysis used when real extraction is unavailable.
///
/// Entries are flagged `ai_generated = false` and carry mid-range confidence. The random
/// source is injected so tests can seed it.
pub struct SyntheticScoreGenerator {
    rng: Mutex<StdRng>,
}

impl SyntheticScoreGenerator {
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn generate(&self) -> TranscriptAnalysis {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let bant = BantScores::from_fn(|_| f64::from(rng.gen_range(0u8..=10)));
        let meddic = MeddicScores::from_fn(|_| f64::from(rng.gen_range(0u8..=10)));

        let confidences = Metric::ALL
            .into_iter()
            .map(|metric| {
                let score = bant.get(metric).or_else(|| meddic.get(metric)).unwrap_or(0.0);
                let confidence = round_hundredths(rng.gen_range(SYNTHETIC_CONFIDENCE));
                MetricConfidence::new(metric, score, confidence, false)
            })
            .collect();

        let sdr_stats = SdrStats {
            talk_ratio: f64::from(rng.gen_range(30u32..50)),
            questions_asked: rng.gen_range(5..15),
            pain_points_uncovered: rng.gen_range(2..7),
            next_steps_clarity: f64::from(rng.gen_range(0u8..=10)),
            objection_handling: f64::from(rng.gen_range(0u8..=10)),
        };

        let scores = ScoreSet::from_clamped_parts(bant, meddic, confidences);
        let mut insights = vec![SYNTHETIC_NOTICE.to_string()];
        insights.extend(derive_insights(&scores));

        TranscriptAnalysis {
            insights,
            priority_focus: priority_focus(&scores),
            sdr_stats: Some(sdr_stats),
            source: ExtractionSource::Synthetic,
            scores,
        }
    }
}
