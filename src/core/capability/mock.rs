//! In-process provider with scriptable capabilities
//!
//! With no configuration every capability is unavailable, which makes the
//! façade run on its local fallbacks. Tests script statuses, download
//! progress, outputs and failures, and read the probe/invocation counters.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    readiness_channel, LanguageDetector, Probe, ProviderAsync, ProviderSync, Summarizer, Translator,
};
use crate::core::fallback;
use crate::shared::error::{ProviderError, ProviderResult};
use crate::shared::types::{Capability, DownloadProgress, LanguageCandidate};

/// Scripted availability of one capability
#[derive(Debug, Clone, PartialEq)]
pub enum MockStatus {
    Ready,
    /// Emits the given progress steps, then becomes ready
    NeedsDownload(Vec<DownloadProgress>),
    /// Emits the given progress steps, then fails with the reason
    DownloadFails(Vec<DownloadProgress>, String),
    Unavailable,
}

#[derive(Debug, Default)]
struct MockCounters {
    probes: [AtomicUsize; 3],
    invocations: [AtomicUsize; 3],
}

fn slot(capability: Capability) -> usize {
    match capability {
        Capability::LanguageDetector => 0,
        Capability::Summarizer => 1,
        Capability::Translator => 2,
    }
}

impl MockCounters {
    fn record_probe(&self, capability: Capability) {
        self.probes[slot(capability)].fetch_add(1, Ordering::SeqCst);
    }

    fn record_invocation(&self, capability: Capability) {
        self.invocations[slot(capability)].fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct MockProvider {
    statuses: HashMap<Capability, MockStatus>,
    detections: Option<Vec<LanguageCandidate>>,
    summary: Option<String>,
    failing: HashSet<Capability>,
    counters: Arc<MockCounters>,
}

impl MockProvider {
    /// Every capability unavailable
    pub fn new() -> Self {
        Self::default()
    }

    /// Every capability ready, backed by the local heuristics
    pub fn all_ready() -> Self {
        Capability::ALL
            .into_iter()
            .fold(Self::new(), |mock, capability| mock.with_status(capability, MockStatus::Ready))
    }

    pub fn with_status(mut self, capability: Capability, status: MockStatus) -> Self {
        self.statuses.insert(capability, status);
        self
    }

    /// Fixed detector output instead of the script heuristic
    pub fn with_detections(mut self, candidates: Vec<LanguageCandidate>) -> Self {
        self.detections = Some(candidates);
        self
    }

    /// Fixed summarizer output instead of the sentence heuristic
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sessions for `capability` fail when invoked
    pub fn failing(mut self, capability: Capability) -> Self {
        self.failing.insert(capability);
        self
    }

    pub fn status(&self, capability: Capability) -> MockStatus {
        self.statuses
            .get(&capability)
            .cloned()
            .unwrap_or(MockStatus::Unavailable)
    }

    pub fn probe_count(&self, capability: Capability) -> usize {
        self.counters.probes[slot(capability)].load(Ordering::SeqCst)
    }

    /// Number of detect/summarize/translate calls made on created sessions
    pub fn invocation_count(&self, capability: Capability) -> usize {
        self.counters.invocations[slot(capability)].load(Ordering::SeqCst)
    }

    fn session_error(&self, capability: Capability) -> Option<ProviderError> {
        self.failing
            .contains(&capability)
            .then(|| ProviderError::Session(format!("mock {} failure", capability)))
    }
}

impl ProviderSync for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl ProviderAsync for MockProvider {
    async fn probe(&self, capability: Capability) -> Probe {
        self.counters.record_probe(capability);

        match self.status(capability) {
            MockStatus::Ready => Probe::Ready,
            MockStatus::Unavailable => Probe::Unavailable,
            MockStatus::NeedsDownload(steps) => {
                let (reporter, handle) = readiness_channel();
                for step in steps {
                    reporter.progress(step.bytes_loaded, step.bytes_total);
                }
                reporter.ready();
                Probe::NeedsDownload(handle)
            }
            MockStatus::DownloadFails(steps, reason) => {
                let (reporter, handle) = readiness_channel();
                for step in steps {
                    reporter.progress(step.bytes_loaded, step.bytes_total);
                }
                reporter.fail(reason);
                Probe::NeedsDownload(handle)
            }
        }
    }

    async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>> {
        Ok(Box::new(MockDetector {
            candidates: self.detections.clone(),
            error: self.session_error(Capability::LanguageDetector),
            counters: Arc::clone(&self.counters),
        }))
    }

    async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>> {
        Ok(Box::new(MockSummarizer {
            summary: self.summary.clone(),
            error: self.session_error(Capability::Summarizer),
            counters: Arc::clone(&self.counters),
        }))
    }

    async fn create_translator(&self, source: &str, target: &str) -> ProviderResult<Box<dyn Translator>> {
        Ok(Box::new(MockTranslator {
            source: source.to_string(),
            target: target.to_string(),
            error: self.session_error(Capability::Translator),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct MockDetector {
    candidates: Option<Vec<LanguageCandidate>>,
    error: Option<ProviderError>,
    counters: Arc<MockCounters>,
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, text: &str) -> ProviderResult<Vec<LanguageCandidate>> {
        self.counters.record_invocation(Capability::LanguageDetector);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self
            .candidates
            .clone()
            .unwrap_or_else(|| vec![detect_script(text)]))
    }
}

struct MockSummarizer {
    summary: Option<String>,
    error: Option<ProviderError>,
    counters: Arc<MockCounters>,
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str) -> ProviderResult<String> {
        self.counters.record_invocation(Capability::Summarizer);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self.summary.clone().unwrap_or_else(|| fallback::summarize(text)))
    }
}

struct MockTranslator {
    source: String,
    target: String,
    error: Option<ProviderError>,
    counters: Arc<MockCounters>,
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> ProviderResult<String> {
        self.counters.record_invocation(Capability::Translator);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.source.eq_ignore_ascii_case(&self.target) {
            return Ok(text.to_string());
        }
        Ok(format!("[{} -> {}] {}", self.source, self.target, text))
    }
}

/// Guess a language from the script the text is written in.
///
/// Latin script defaults to English with low confidence.
pub fn detect_script(text: &str) -> LanguageCandidate {
    let has = |ranges: &[(char, char)]| {
        text.chars()
            .any(|c| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c)))
    };

    let has_japanese = has(&[('\u{3040}', '\u{309F}'), ('\u{30A0}', '\u{30FF}')]); // Hiragana, Katakana
    let has_chinese = has(&[('\u{4E00}', '\u{9FFF}'), ('\u{3400}', '\u{4DBF}')]); // CJK Unified, Ext A
    let has_korean = has(&[('\u{AC00}', '\u{D7AF}')]);
    let has_arabic = has(&[('\u{0600}', '\u{06FF}'), ('\u{0750}', '\u{077F}')]);
    let has_cyrillic = has(&[('\u{0400}', '\u{04FF}')]);

    let (code, confidence) = if has_japanese {
        ("ja", 0.9)
    } else if has_chinese {
        ("zh", 0.9)
    } else if has_korean {
        ("ko", 0.9)
    } else if has_arabic {
        ("ar", 0.8)
    } else if has_cyrillic {
        ("ru", 0.7)
    } else {
        ("en", 0.5)
    };

    LanguageCandidate {
        language_code: code.to_string(),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::CapabilityStatus;

    #[test]
    fn test_detect_script() {
        assert_eq!(detect_script("你好世界").language_code, "zh");
        assert_eq!(detect_script("こんにちは").language_code, "ja");
        assert_eq!(detect_script("안녕하세요").language_code, "ko");
        assert_eq!(detect_script("Привет мир").language_code, "ru");
        assert_eq!(detect_script("Hello world").language_code, "en");
    }

    #[tokio::test]
    async fn test_default_is_unavailable_and_counts_probes() {
        let mock = MockProvider::new();
        for capability in Capability::ALL {
            assert_eq!(mock.probe(capability).await.status(), CapabilityStatus::Unavailable);
        }
        assert_eq!(mock.probe_count(Capability::Translator), 1);
        assert_eq!(mock.invocation_count(Capability::Translator), 0);
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let mock = MockProvider::all_ready();
        let clone = mock.clone();
        clone.probe(Capability::Summarizer).await;
        let summarizer = clone.create_summarizer().await.unwrap();
        summarizer.summarize("One. Two. Three.").await.unwrap();

        assert_eq!(mock.probe_count(Capability::Summarizer), 1);
        assert_eq!(mock.invocation_count(Capability::Summarizer), 1);
    }

    #[tokio::test]
    async fn test_scripted_download() {
        let steps = vec![DownloadProgress::new(1, 4), DownloadProgress::new(4, 4)];
        let mock = MockProvider::new().with_status(Capability::Summarizer, MockStatus::NeedsDownload(steps));

        let Probe::NeedsDownload(handle) = mock.probe(Capability::Summarizer).await else {
            panic!("expected a download");
        };
        let mut seen = Vec::new();
        handle.wait_ready(|p| seen.push(p.bytes_loaded)).await.unwrap();
        assert_eq!(seen, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_failing_session() {
        let mock = MockProvider::all_ready().failing(Capability::Translator);
        let translator = mock.create_translator("en", "fr").await.unwrap();
        assert!(translator.translate("hi").await.is_err());
        assert_eq!(mock.invocation_count(Capability::Translator), 1);
    }
}
