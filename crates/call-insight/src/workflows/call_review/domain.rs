use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::{ExtractionSource, SdrStats, TranscriptAnalysis};
use crate::scoring::{BantScores, MeddicScores, MetricConfidence};

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Some(transcript.into()),
        }
    }
}

/// Computed payload returned for an analyzed transcript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub bant_scores: BantScores,
    pub meddic_scores: MeddicScores,
    pub confidence_scores: Vec<MetricConfidence>,
    pub lead_score: u8,
    pub review_queue: Vec<MetricConfidence>,
    pub insights: Vec<String>,
    pub priority_focus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdr_stats: Option<SdrStats>,
    pub source: ExtractionSource,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    pub(crate) fn from_analysis(
        analysis: TranscriptAnalysis,
        lead_score: u8,
        review_queue: Vec<MetricConfidence>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let TranscriptAnalysis {
            scores,
            insights,
            priority_focus,
            sdr_stats,
            source,
        } = analysis;

        Self {
            bant_scores: *scores.bant(),
            meddic_scores: *scores.meddic(),
            confidence_scores: scores.confidences().to_vec(),
            lead_score,
            review_queue,
            insights,
            priority_focus,
            sdr_stats,
            source,
            timestamp,
        }
    }
}

/// Body of `POST /validate`; every field is optional so missing ones map to a 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub metric_name: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub human_score: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Graded human feedback on one AI score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFeedback {
    pub metric_name: String,
    pub ai_score: f64,
    pub human_score: f64,
    pub reasoning: Option<String>,
    pub is_accurate: bool,
    pub points_awarded: u32,
    pub timestamp: DateTime<Utc>,
}

impl ValidationFeedback {
    pub fn message(&self) -> &'static str {
        if self.is_accurate {
            "Great job! Your assessment aligns with the AI."
        } else {
            "Thank you for the correction. This helps improve our model."
        }
    }
}

/// Envelope returned by `POST /validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    pub success: bool,
    pub feedback: ValidationFeedback,
    pub message: String,
}
