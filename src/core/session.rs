//! One user's conversation with TextGenie
//!
//! Keeps the transcript, the last input/detection/summary, and the three
//! signals a display renders: error message, download-in-progress flag and
//! detected-language text. A failed operation sets the error and leaves
//! everything shown before it untouched.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::history::MessageLog;
use super::service::TextService;
use crate::shared::error::{ServiceResult, TextServiceError};
use crate::shared::events::ServiceEvent;
use crate::shared::settings::UserPreferences;
use crate::shared::types::{
    DetectionResult, LanguageOption, Message, SummaryResult, TranslationKind, TranslationResult,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct SessionStatus {
    pub error: Option<String>,
    pub downloading: bool,
    pub detected_language: Option<String>,
}

pub struct Session {
    service: TextService,
    preferences: UserPreferences,
    history: MessageLog,
    status: Arc<Mutex<SessionStatus>>,
    last_input: Option<String>,
    last_detection: Option<DetectionResult>,
    last_summary: Option<SummaryResult>,
}

fn lock(status: &Mutex<SessionStatus>) -> MutexGuard<'_, SessionStatus> {
    match status.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("[Session] Status mutex poisoned, recovering...");
            poisoned.into_inner()
        }
    }
}

impl Session {
    pub fn new(service: TextService, preferences: UserPreferences) -> Self {
        let status = Arc::new(Mutex::new(SessionStatus::default()));

        let watched = Arc::clone(&status);
        let sink = service.status_sink().clone().with_listener(move |event| match event {
            ServiceEvent::DownloadStarted(_) => lock(&watched).downloading = true,
            ServiceEvent::DownloadFinished(_) => lock(&watched).downloading = false,
            _ => {}
        });

        Self {
            service: service.with_status_sink(sink),
            preferences,
            history: MessageLog::new(),
            status,
            last_input: None,
            last_detection: None,
            last_summary: None,
        }
    }

    /// Record the user's text and detect its language
    pub async fn submit(&mut self, text: &str) -> ServiceResult<DetectionResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.fail(TextServiceError::Validation("Please enter some text".to_string()));
        }

        self.history.append(Message::user(trimmed));
        self.last_input = Some(trimmed.to_string());
        self.last_detection = None;
        self.last_summary = None;

        let result = self.service.detect(trimmed).await;
        match result {
            Ok(detection) => {
                let described = detection.describe();
                self.history.append(Message::bot(format!("Detected language: {}", described)));
                {
                    let mut status = lock(&self.status);
                    status.detected_language = Some(described);
                    status.error = None;
                }
                self.last_detection = Some(detection.clone());
                Ok(detection)
            }
            Err(e) => {
                lock(&self.status).detected_language = None;
                self.fail(e)
            }
        }
    }

    /// Summarize the last submitted text
    pub async fn summarize(&mut self) -> ServiceResult<SummaryResult> {
        let input = self.require_input()?;

        let result = self.service.summarize(&input).await;
        match result {
            Ok(summary) => {
                self.history.append(Message::bot(format!("Summary: {}", summary.text)));
                self.last_summary = Some(summary.clone());
                self.succeed();
                Ok(summary)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Translate the last submitted text to `target` (or the default target)
    pub async fn translate(&mut self, target: Option<&str>) -> ServiceResult<TranslationResult> {
        let input = self.require_input()?;
        let source = self.source_language();
        let target = self.target_language(target);

        let result = self.service.translate(&input, &source, &target).await;
        self.finish_translation(result)
    }

    /// Translate the last summary; requires a prior `summarize`
    pub async fn translate_summary(&mut self, target: Option<&str>) -> ServiceResult<TranslationResult> {
        let summary = match &self.last_summary {
            Some(summary) => summary.clone(),
            None => {
                return self.fail(TextServiceError::Validation(
                    "Summarize the text before translating the summary".to_string(),
                ))
            }
        };
        let source = self.source_language();
        let target = self.target_language(target);

        let result = self.service.translate_summary(&summary, &source, &target).await;
        self.finish_translation(result)
    }

    pub fn messages(&self) -> &[Message] {
        self.history.messages()
    }

    pub fn status(&self) -> SessionStatus {
        lock(&self.status).clone()
    }

    pub fn last_summary(&self) -> Option<&SummaryResult> {
        self.last_summary.as_ref()
    }

    pub fn last_detection(&self) -> Option<&DetectionResult> {
        self.last_detection.as_ref()
    }

    pub fn target_languages(&self) -> &[LanguageOption] {
        &self.preferences.target_languages
    }

    fn finish_translation(&mut self, result: ServiceResult<TranslationResult>) -> ServiceResult<TranslationResult> {
        match result {
            Ok(translation) => {
                let label = match translation.kind {
                    TranslationKind::Text => "Translation",
                    TranslationKind::Summary => "Summary translation",
                };
                self.history.append(Message::bot(format!(
                    "{} ({}): {}",
                    label, translation.target_language, translation.text
                )));
                self.succeed();
                Ok(translation)
            }
            Err(e) => self.fail(e),
        }
    }

    fn require_input(&self) -> ServiceResult<String> {
        match &self.last_input {
            Some(input) => Ok(input.clone()),
            None => self.fail(TextServiceError::Validation("Please enter some text".to_string())),
        }
    }

    fn source_language(&self) -> String {
        self.last_detection
            .as_ref()
            .map(|d| d.language_code.clone())
            .unwrap_or_else(|| self.preferences.default_source_lang.clone())
    }

    fn target_language(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .unwrap_or_else(|| self.preferences.default_target_lang.clone())
    }

    fn succeed(&self) {
        let mut status = lock(&self.status);
        status.error = None;
        status.downloading = false;
    }

    fn fail<T>(&self, error: TextServiceError) -> ServiceResult<T> {
        tracing::warn!("[Session] {} ({})", error, error.kind());
        {
            let mut status = lock(&self.status);
            status.error = Some(error.to_string());
            status.downloading = false;
        }
        Err(error)
    }
}
