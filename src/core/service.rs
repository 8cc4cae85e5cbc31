//! Text service façade
//!
//! Single entry point for detect / summarize / translate. Each operation
//! validates its input, probes the provider, and then either calls the
//! native capability (after awaiting a download if one is needed) or the
//! local fallback. Failures come back as `TextServiceError`.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::capability::{CapabilityProvider, Probe, ProviderAsync, ProviderSync};
use super::fallback;
use super::locale::{IsoLocaleNames, LocaleNames};
use crate::shared::emit::StatusSink;
use crate::shared::error::{ProviderError, ProviderResult, ServiceResult, TextServiceError};
use crate::shared::events::ServiceEvent;
use crate::shared::types::{
    Capability, DetectionResult, LanguageCandidate, Origin, SummaryResult, TranslationKind,
    TranslationResult,
};

/// Summaries need strictly more trimmed characters than this
pub const MIN_SUMMARY_CHARS: usize = 150;

/// How an operation will be served after probing
enum Route {
    Native,
    Fallback,
}

#[derive(Clone)]
pub struct TextService {
    provider: CapabilityProvider,
    locale: Arc<dyn LocaleNames>,
    status: StatusSink,
}

impl TextService {
    pub fn new(provider: impl Into<CapabilityProvider>) -> Self {
        Self {
            provider: provider.into(),
            locale: Arc::new(IsoLocaleNames),
            status: StatusSink::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl LocaleNames + 'static) -> Self {
        self.locale = Arc::new(locale);
        self
    }

    pub fn with_status_sink(mut self, status: StatusSink) -> Self {
        self.status = status;
        self
    }

    pub fn provider(&self) -> &CapabilityProvider {
        &self.provider
    }

    pub fn status_sink(&self) -> &StatusSink {
        &self.status
    }

    /// Detect the language of `text`.
    ///
    /// There is no local detector, so an unavailable capability is an error.
    pub async fn detect(&self, text: &str) -> ServiceResult<DetectionResult> {
        let text = require_text(text)?;

        match self.route(Capability::LanguageDetector).await {
            Ok(Route::Native) => {}
            Ok(Route::Fallback) => {
                return Err(TextServiceError::CapabilityUnavailable(Capability::LanguageDetector))
            }
            Err(e) => return Err(TextServiceError::DetectionFailed(e.to_string())),
        }

        let candidates = self.run_detector(text).await.map_err(|e| {
            tracing::warn!("[TextService] Detection failed: {}", e);
            TextServiceError::DetectionFailed(e.to_string())
        })?;

        let top = candidates
            .into_iter()
            .next()
            .ok_or_else(|| TextServiceError::DetectionFailed("detector returned no candidates".to_string()))?;

        let confidence = if top.confidence.is_finite() {
            top.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(DetectionResult {
            language_display_name: self.locale.display_name(&top.language_code),
            language_code: top.language_code,
            confidence,
        })
    }

    /// Summarize `text`, falling back to the first-two-sentences heuristic.
    pub async fn summarize(&self, text: &str) -> ServiceResult<SummaryResult> {
        let text = text.trim();
        let length = text.chars().count();
        if length <= MIN_SUMMARY_CHARS {
            return Err(TextServiceError::TextTooShort {
                length,
                minimum: MIN_SUMMARY_CHARS,
            });
        }

        let route = self
            .route(Capability::Summarizer)
            .await
            .map_err(|e| TextServiceError::SummarizationFailed(e.to_string()))?;

        if let Route::Fallback = route {
            return Ok(SummaryResult {
                text: fallback::summarize(text),
                origin: Origin::Fallback,
            });
        }

        let summary = self.run_summarizer(text).await.map_err(|e| {
            tracing::warn!("[TextService] Summarization failed: {}", e);
            TextServiceError::SummarizationFailed(e.to_string())
        })?;

        Ok(SummaryResult {
            text: summary,
            origin: Origin::Native,
        })
    }

    /// Translate `text` from `source` to `target`.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> ServiceResult<TranslationResult> {
        self.translate_as(text, source, target, TranslationKind::Text).await
    }

    /// Translate a previously produced summary; the result is tagged as such.
    pub async fn translate_summary(
        &self,
        summary: &SummaryResult,
        source: &str,
        target: &str,
    ) -> ServiceResult<TranslationResult> {
        self.translate_as(&summary.text, source, target, TranslationKind::Summary)
            .await
    }

    async fn translate_as(
        &self,
        text: &str,
        source: &str,
        target: &str,
        kind: TranslationKind,
    ) -> ServiceResult<TranslationResult> {
        let text = require_text(text)?;
        let source = normalize_language(source)?;
        let target = normalize_language(target)?;

        let route = self
            .route(Capability::Translator)
            .await
            .map_err(|e| TextServiceError::TranslationFailed(e.to_string()))?;

        let (translated, origin) = match route {
            Route::Fallback => (fallback::translate(text, &target), Origin::Fallback),
            Route::Native => {
                let translated = self.run_translator(text, &source, &target).await.map_err(|e| {
                    tracing::warn!("[TextService] Translation {} -> {} failed: {}", source, target, e);
                    TextServiceError::TranslationFailed(e.to_string())
                })?;
                (translated, Origin::Native)
            }
        };

        Ok(TranslationResult {
            text: translated,
            source_language: source,
            target_language: target,
            kind,
            origin,
        })
    }

    async fn run_detector(&self, text: &str) -> ProviderResult<Vec<LanguageCandidate>> {
        let detector = self.provider.create_detector().await?;
        detector.detect(text).await
    }

    async fn run_summarizer(&self, text: &str) -> ProviderResult<String> {
        let summarizer = self.provider.create_summarizer().await?;
        summarizer.summarize(text).await
    }

    async fn run_translator(&self, text: &str, source: &str, target: &str) -> ProviderResult<String> {
        let translator = self.provider.create_translator(source, target).await?;
        translator.translate(text).await
    }

    /// Probe `capability` and wait out any download.
    async fn route(&self, capability: Capability) -> Result<Route, ProviderError> {
        match self.provider.probe(capability).await {
            Probe::Ready => Ok(Route::Native),
            Probe::NeedsDownload(handle) => {
                tracing::info!("[TextService] Waiting for {} download via {}", capability, self.provider.id());
                self.status.emit(ServiceEvent::DownloadStarted(capability));
                let waited = handle
                    .wait_ready(|progress| {
                        self.status
                            .emit(ServiceEvent::DownloadProgress { capability, progress })
                    })
                    .await;
                self.status.emit(ServiceEvent::DownloadFinished(capability));
                waited.map(|_| Route::Native)
            }
            Probe::Unavailable => {
                tracing::info!("[TextService] {} unavailable, using local fallback", capability);
                self.status.emit(ServiceEvent::FallbackUsed(capability));
                Ok(Route::Fallback)
            }
        }
    }
}

fn require_text(text: &str) -> ServiceResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TextServiceError::Validation("Please enter some text".to_string()));
    }
    Ok(trimmed)
}

/// Lowercase the primary subtag and join subtags with '-' ("ZH_CN" -> "zh-CN").
///
/// Only blank codes are rejected; "auto" and unknown codes pass through.
fn normalize_language(code: &str) -> ServiceResult<String> {
    static SUBTAG_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let re = SUBTAG_SEPARATOR.get_or_init(|| Regex::new(r"[-_]").expect("valid subtag separator regex"));

    let code = code.trim();
    if code.is_empty() {
        return Err(TextServiceError::Validation("Language code is empty".to_string()));
    }

    let mut subtags = re.split(code);
    let primary = subtags.next().unwrap_or_default().to_ascii_lowercase();
    Ok(std::iter::once(primary.as_str())
        .chain(subtags)
        .collect::<Vec<_>>()
        .join("-"))
}
