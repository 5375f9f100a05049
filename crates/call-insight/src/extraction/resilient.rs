use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{
    ExtractionError, ExtractionSource, SyntheticScoreGenerator, TranscriptAnalysis,
    TranscriptExtractor,
};

/// Extraction boundary that always yields a structurally valid analysis.
///
/// The primary extractor gets one attempt bounded by `timeout`. Errors and timeouts are logged
/// and replaced by the synthetic generator's output, so callers never see extraction failures.
pub struct ResilientExtractor {
    primary: Arc<dyn TranscriptExtractor>,
    fallback: SyntheticScoreGenerator,
    timeout: Duration,
}

impl ResilientExtractor {
    pub fn new(
        primary: Arc<dyn TranscriptExtractor>,
        fallback: SyntheticScoreGenerator,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }

    pub fn primary_source(&self) -> ExtractionSource {
        self.primary.source()
    }

    pub async fn extract(&self, transcript: &str) -> TranscriptAnalysis {
        let attempt = tokio::time::timeout(self.timeout, self.primary.extract(transcript)).await;

        let error = match attempt {
            Ok(Ok(analysis)) => {
                info!(source = analysis.source.label(), "transcript extracted");
                return analysis;
            }
            Ok(Err(error)) => error,
            Err(_) => ExtractionError::Timeout(self.timeout),
        };

        warn!(
            source = self.primary.source().label(),
            %error,
            "transcript extraction failed, serving synthetic scores"
        );
        self.fallback.generate()
    }
}
