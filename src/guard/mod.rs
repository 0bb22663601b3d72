use std::time::Duration;

use crate::backends::ScoringError;
use crate::input::validate::ValidationIssue;

pub mod cache;
pub mod limits;
pub mod timeout;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_PAYLOAD_TOO_LARGE: u16 = 413;
pub const STATUS_INTERNAL_ERROR: u16 = 500;
pub const STATUS_GATEWAY_TIMEOUT: u16 = 504;

pub const DEFAULT_MAX_VARIANTS: usize = 500;
pub const DEFAULT_SCORE_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_SUGGESTION_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub max_variants: usize,
    pub score_timeout: Duration,
    pub suggestion_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_variants: DEFAULT_MAX_VARIANTS,
            score_timeout: Duration::from_millis(DEFAULT_SCORE_TIMEOUT_MS),
            suggestion_timeout: Duration::from_millis(DEFAULT_SUGGESTION_TIMEOUT_MS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("invalid variants ({} issues)", .0.len())]
    Validation(Vec<ValidationIssue>),
    #[error("too many variants ({count} > {max})")]
    LimitExceeded { count: usize, max: usize },
    #[error("deadline of {0:?} exceeded")]
    Timeout(Duration),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl GuardError {
    pub fn status(&self) -> u16 {
        match self {
            GuardError::Validation(_) => STATUS_BAD_REQUEST,
            GuardError::LimitExceeded { .. } => STATUS_PAYLOAD_TOO_LARGE,
            GuardError::Timeout(_) => STATUS_GATEWAY_TIMEOUT,
            GuardError::Scoring(_) | GuardError::Unexpected(_) => STATUS_INTERNAL_ERROR,
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            GuardError::Validation(_) => "Invalid variants".to_string(),
            GuardError::LimitExceeded { max, .. } => format!("Too many variants (max {max})"),
            GuardError::Timeout(_) => "Service timeout".to_string(),
            GuardError::Scoring(_) | GuardError::Unexpected(_) => "Internal error".to_string(),
        }
    }
}
