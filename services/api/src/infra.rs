use call_insight::config::{AppConfig, ExtractionMode};
use call_insight::error::AppError;
use call_insight::extraction::{
    GenerativeExtractor, KeywordExtractor, ResilientExtractor, SyntheticScoreGenerator,
    TranscriptExtractor,
};
use call_insight::workflows::call_review::CallReviewService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the configured primary extractor behind the synthetic fallback.
pub(crate) fn build_call_review_service(
    config: &AppConfig,
    force_keyword: bool,
) -> Result<CallReviewService, AppError> {
    let mode = if force_keyword {
        ExtractionMode::Keyword
    } else {
        config.extraction.mode
    };

    let primary: Arc<dyn TranscriptExtractor> = match mode {
        ExtractionMode::Keyword => Arc::new(KeywordExtractor),
        ExtractionMode::Generative => {
            let extractor = GenerativeExtractor::new(&config.extraction)?;
            if !extractor.is_configured() {
                warn!("GEMINI_API_KEY is not set; analyses will be served from synthetic scores");
            }
            Arc::new(extractor)
        }
    };

    let extractor = ResilientExtractor::new(
        primary,
        SyntheticScoreGenerator::from_entropy(),
        config.extraction.timeout,
    );
    Ok(CallReviewService::new(
        extractor,
        config.scoring,
        config.rewards,
    ))
}

pub(crate) fn read_transcript(path: &Path) -> Result<String, AppError> {
    Ok(std::fs::read_to_string(path)?)
}
