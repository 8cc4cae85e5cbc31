use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ===== Capabilities =====

/// A named optional feature the hosting environment may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "textgenie/")]
pub enum Capability {
    LanguageDetector,
    Summarizer,
    Translator,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::LanguageDetector,
        Capability::Summarizer,
        Capability::Translator,
    ];

    /// Canonical host-facing name
    pub fn name(&self) -> &'static str {
        match self {
            Capability::LanguageDetector => "languageDetector",
            Capability::Summarizer => "summarizer",
            Capability::Translator => "translator",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown capability: {}", s))
    }
}

/// Result of probing a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub enum CapabilityStatus {
    Ready,
    NeedsDownload,
    Unavailable,
}

/// Model download progress reported while a capability becomes ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct DownloadProgress {
    pub bytes_loaded: u64,
    /// 0 when the host does not know the size
    pub bytes_total: u64,
}

impl DownloadProgress {
    pub fn new(bytes_loaded: u64, bytes_total: u64) -> Self {
        Self { bytes_loaded, bytes_total }
    }

    /// Completed fraction in [0, 1], `None` when the total is unknown
    pub fn fraction(&self) -> Option<f64> {
        if self.bytes_total == 0 {
            return None;
        }
        Some((self.bytes_loaded as f64 / self.bytes_total as f64).clamp(0.0, 1.0))
    }
}

// ===== Operation results =====

/// One candidate returned by a native language detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct LanguageCandidate {
    pub language_code: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct DetectionResult {
    /// Language code as reported by the detector (e.g., "en", "fr")
    pub language_code: String,
    /// Human-readable name (e.g., "English")
    pub language_display_name: String,
    /// Always within [0, 1]
    pub confidence: f64,
}

impl DetectionResult {
    /// Text shown next to "Detected Language:"
    pub fn describe(&self) -> String {
        format!(
            "{} ({:.0}% confidence)",
            self.language_display_name,
            self.confidence * 100.0
        )
    }
}

/// Where a summary or translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub enum Origin {
    Native,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct SummaryResult {
    pub text: String,
    pub origin: Origin,
}

/// Distinguishes a translation of the user's text from a translation of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub enum TranslationKind {
    Text,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct TranslationResult {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub kind: TranslationKind,
    pub origin: Origin,
}

// ===== Conversation =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }
}

/// Entry of the target-language picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

impl LanguageOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
