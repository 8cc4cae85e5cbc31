use std::sync::Arc;

use async_trait::async_trait;

use super::{LanguageDetector, Probe, ProviderAsync, ProviderSync, ReadinessHandle, Summarizer, Translator};
use crate::shared::error::ProviderResult;
use crate::shared::types::{Capability, CapabilityStatus};

/// Contract of the host-supplied AI object.
///
/// Mirrors the host shape: a readiness query per capability, a way to start
/// the model download, and one factory per capability.
#[async_trait]
pub trait CapabilityHost: Send + Sync {
    async fn availability(&self, capability: Capability) -> ProviderResult<CapabilityStatus>;

    /// Begin downloading the model behind `capability`
    async fn start_download(&self, capability: Capability) -> ProviderResult<ReadinessHandle>;

    async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>>;

    async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>>;

    async fn create_translator(&self, source: &str, target: &str) -> ProviderResult<Box<dyn Translator>>;
}

/// Provider backed by a real host
#[derive(Clone)]
pub struct NativeProvider {
    host: Arc<dyn CapabilityHost>,
}

impl NativeProvider {
    pub fn new(host: Arc<dyn CapabilityHost>) -> Self {
        Self { host }
    }
}

impl ProviderSync for NativeProvider {
    fn id(&self) -> &str {
        "native"
    }
}

#[async_trait]
impl ProviderAsync for NativeProvider {
    async fn probe(&self, capability: Capability) -> Probe {
        match self.host.availability(capability).await {
            Ok(CapabilityStatus::Ready) => Probe::Ready,
            Ok(CapabilityStatus::NeedsDownload) => match self.host.start_download(capability).await {
                Ok(handle) => Probe::NeedsDownload(handle),
                Err(e) => {
                    tracing::warn!("[NativeProvider] Could not start {} download: {}", capability, e);
                    Probe::Unavailable
                }
            },
            Ok(CapabilityStatus::Unavailable) => Probe::Unavailable,
            Err(e) => {
                tracing::warn!("[NativeProvider] Availability check for {} failed: {}", capability, e);
                Probe::Unavailable
            }
        }
    }

    async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>> {
        self.host.create_detector().await
    }

    async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>> {
        self.host.create_summarizer().await
    }

    async fn create_translator(&self, source: &str, target: &str) -> ProviderResult<Box<dyn Translator>> {
        self.host.create_translator(source, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::readiness_channel;
    use crate::shared::error::ProviderError;

    /// Host whose availability answers are fixed per test
    struct FixedHost {
        availability: ProviderResult<CapabilityStatus>,
        download_fails: bool,
    }

    struct EchoTranslator {
        target: String,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str) -> ProviderResult<String> {
            Ok(format!("{}:{}", self.target, text))
        }
    }

    #[async_trait]
    impl CapabilityHost for FixedHost {
        async fn availability(&self, _capability: Capability) -> ProviderResult<CapabilityStatus> {
            self.availability.clone()
        }

        async fn start_download(&self, _capability: Capability) -> ProviderResult<ReadinessHandle> {
            if self.download_fails {
                return Err(ProviderError::Host("no network".to_string()));
            }
            let (reporter, handle) = readiness_channel();
            reporter.ready();
            Ok(handle)
        }

        async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>> {
            Err(ProviderError::Host("detector missing".to_string()))
        }

        async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>> {
            Err(ProviderError::Host("summarizer missing".to_string()))
        }

        async fn create_translator(&self, _source: &str, target: &str) -> ProviderResult<Box<dyn Translator>> {
            Ok(Box::new(EchoTranslator { target: target.to_string() }))
        }
    }

    fn provider(availability: ProviderResult<CapabilityStatus>, download_fails: bool) -> NativeProvider {
        NativeProvider::new(Arc::new(FixedHost { availability, download_fails }))
    }

    #[tokio::test]
    async fn test_ready_host() {
        let p = provider(Ok(CapabilityStatus::Ready), false);
        assert_eq!(p.probe(Capability::Translator).await.status(), CapabilityStatus::Ready);
    }

    #[tokio::test]
    async fn test_needs_download_returns_handle() {
        let p = provider(Ok(CapabilityStatus::NeedsDownload), false);
        match p.probe(Capability::Summarizer).await {
            Probe::NeedsDownload(handle) => assert!(handle.wait_ready(|_| {}).await.is_ok()),
            other => panic!("unexpected probe: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_host_errors_degrade_to_unavailable() {
        let p = provider(Err(ProviderError::Host("boom".to_string())), false);
        assert_eq!(p.probe(Capability::LanguageDetector).await.status(), CapabilityStatus::Unavailable);

        let p = provider(Ok(CapabilityStatus::NeedsDownload), true);
        assert_eq!(p.probe(Capability::LanguageDetector).await.status(), CapabilityStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_factories_delegate_to_host() {
        let p = provider(Ok(CapabilityStatus::Ready), false);
        let translator = p.create_translator("fr", "es").await.unwrap();
        assert_eq!(translator.translate("Bonjour").await.unwrap(), "es:Bonjour");
        assert!(p.create_detector().await.is_err());
    }
}
