//! Typed errors for the text service
//!
//! `TextServiceError` is the only error type that crosses the façade.
//! Provider and readiness failures are mapped into it per operation so the
//! display layer never sees a raw host error.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use super::types::Capability;

/// Errors returned by `TextService` operations.
///
/// Serialized as `{ "type": ..., "message": ... }` for the display layer.
#[derive(Error, Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "type", content = "message")]
#[ts(export, export_to = "textgenie/")]
pub enum TextServiceError {
    /// Empty or malformed input, rejected before any probing
    #[error("Validation error: {0}")]
    Validation(String),

    /// Capability absent and no fallback exists (detection only)
    #[error("{0} is not available in this environment")]
    CapabilityUnavailable(Capability),

    /// Summarization input at or below the minimum length
    #[error("Text too short to summarize: {length} characters (needs more than {minimum})")]
    TextTooShort { length: usize, minimum: usize },

    #[error("Language detection failed: {0}")]
    DetectionFailed(String),

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),
}

impl TextServiceError {
    /// Stable kind name, useful for metrics and display styling
    pub fn kind(&self) -> &'static str {
        match self {
            TextServiceError::Validation(_) => "ValidationError",
            TextServiceError::CapabilityUnavailable(_) => "CapabilityUnavailable",
            TextServiceError::TextTooShort { .. } => "TextTooShort",
            TextServiceError::DetectionFailed(_) => "DetectionFailed",
            TextServiceError::SummarizationFailed(_) => "SummarizationFailed",
            TextServiceError::TranslationFailed(_) => "TranslationFailed",
        }
    }
}

pub type ServiceResult<T> = Result<T, TextServiceError>;

/// Errors raised by a capability host or one of its sessions.
///
/// Never surfaced past the façade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Capability host error: {0}")]
    Host(String),

    #[error("Capability session error: {0}")]
    Session(String),

    #[error("Model download failed: {0}")]
    Readiness(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
