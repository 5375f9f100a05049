use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::scoring::DEFAULT_ACCURACY_THRESHOLD;
use crate::workflows::call_review::RewardPolicy;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub rewards: RewardPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mode = match env::var("EXTRACTION_MODE") {
            Ok(raw) => ExtractionMode::parse(&raw).ok_or(ConfigError::InvalidExtractionMode(raw))?,
            Err(_) => ExtractionMode::Generative,
        };
        let extraction = ExtractionConfig {
            mode,
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            endpoint: env::var("GEMINI_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(parse_env("EXTRACTION_TIMEOUT_SECS", 20u64)?),
        };

        let scoring = ScoringConfig {
            accuracy_threshold: parse_tolerance(
                "SCORING_ACCURACY_THRESHOLD",
                DEFAULT_ACCURACY_THRESHOLD,
            )?,
            review_queue_size: parse_env("SCORING_REVIEW_QUEUE_SIZE", 3usize)?,
        };

        let defaults = RewardPolicy::default();
        let rewards = RewardPolicy {
            points_per_validation: parse_env(
                "REWARD_POINTS_PER_VALIDATION",
                defaults.points_per_validation,
            )?,
            accuracy_bonus: parse_env("REWARD_ACCURACY_BONUS", defaults.accuracy_bonus)?,
            streak_bonus: parse_env("REWARD_STREAK_BONUS", defaults.streak_bonus)?,
            streak_interval: parse_env("REWARD_STREAK_INTERVAL", defaults.streak_interval)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            extraction,
            scoring,
            rewards,
        })
    }
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Like [`parse_env`], but only finite, non-negative values are accepted.
fn parse_tolerance(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_env(key, default)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidNumber {
            key,
            value: env::var(key).unwrap_or_else(|_| value.to_string()),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Primary extractor selection; the synthetic fallback is always wired behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Generative,
    Keyword,
}

impl ExtractionMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generative" | "gemini" | "llm" => Some(Self::Generative),
            "keyword" | "keywords" | "heuristic" => Some(Self::Keyword),
            _ => None,
        }
    }
}

/// Transcript extraction settings.
#[derive(Clone)]
pub struct ExtractionConfig {
    pub mode: ExtractionMode,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("mode", &self.mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Engine-wide defaults for grading and review queues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub accuracy_threshold: f64,
    pub review_queue_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            accuracy_threshold: DEFAULT_ACCURACY_THRESHOLD,
            review_queue_size: 3,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    InvalidExtractionMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a finite, non-negative number (got '{value}')")
            }
            ConfigError::InvalidExtractionMode(value) => write!(
                f,
                "EXTRACTION_MODE must be 'generative' or 'keyword' (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidExtractionMode(_) => None,
        }
    }
}
