//! Transcript-to-scores extraction behind a single trait.
//!
//! Scoring never depends on which extractor produced a [`ScoreSet`]; provenance travels with
//! the analysis through [`ExtractionSource`] and the per-metric `ai_generated` flag.

mod generative;
mod insights;
mod keyword;
mod payload;
mod prompt;
mod resilient;
mod synthetic;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreSet;

pub use generative::GenerativeExtractor;
pub use keyword::KeywordExtractor;
pub use resilient::ResilientExtractor;
pub use synthetic::SyntheticScoreGenerator;

/// Which path produced a transcript analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Generative,
    Keyword,
    Synthetic,
}

impl ExtractionSource {
    pub fn label(self) -> &'static str {
        match self {
            ExtractionSource::Generative => "generative",
            ExtractionSource::Keyword => "keyword",
            ExtractionSource::Synthetic => "synthetic",
        }
    }
}

/// Auxiliary talk-track statistics reported alongside the qualification scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdrStats {
    /// Percentage of the call spent with the rep talking.
    pub talk_ratio: f64,
    pub questions_asked: u32,
    pub pain_points_uncovered: u32,
    pub next_steps_clarity: f64,
    pub objection_handling: f64,
}

/// Everything an extractor derives from one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptAnalysis {
    pub scores: ScoreSet,
    pub insights: Vec<String>,
    pub priority_focus: String,
    pub sdr_stats: Option<SdrStats>,
    pub source: ExtractionSource,
}

/// Failures from an extractor's upstream; absorbed by [`ResilientExtractor`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction timed out after {0:?}")]
    Timeout(Duration),
    #[error("generative analysis credentials are not configured")]
    MissingCredentials,
    #[error("generative analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generative analysis returned HTTP {0}")]
    UpstreamStatus(u16),
    #[error("malformed analysis payload: {0}")]
    MalformedResponse(String),
}

/// Seam between keyword heuristics, generative analysis, and test doubles.
#[async_trait]
pub trait TranscriptExtractor: Send + Sync {
    fn source(&self) -> ExtractionSource;

    async fn extract(&self, transcript: &str) -> Result<TranscriptAnalysis, ExtractionError>;
}
