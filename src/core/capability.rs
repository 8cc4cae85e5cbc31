//! Capability probing and provider dispatch
//!
//! A provider answers "is this capability usable?" and creates sessions for
//! the ones that are. `CapabilityProvider` is the closed set of providers
//! the façade accepts; sync metadata goes through enum_dispatch, async
//! methods are dispatched by hand.

pub mod readiness;
pub mod native;
pub mod mock;

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;

use crate::shared::error::ProviderResult;
use crate::shared::types::{Capability, CapabilityStatus, LanguageCandidate};

pub use mock::{MockProvider, MockStatus};
pub use native::{CapabilityHost, NativeProvider};
pub use readiness::{readiness_channel, DownloadEvent, ReadinessHandle, ReadinessReporter};

/// Outcome of probing one capability
#[derive(Debug)]
pub enum Probe {
    Ready,
    /// Download already started; await the handle before use
    NeedsDownload(ReadinessHandle),
    Unavailable,
}

impl Probe {
    pub fn status(&self) -> CapabilityStatus {
        match self {
            Probe::Ready => CapabilityStatus::Ready,
            Probe::NeedsDownload(_) => CapabilityStatus::NeedsDownload,
            Probe::Unavailable => CapabilityStatus::Unavailable,
        }
    }
}

// ===== Capability sessions =====

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Candidates ordered by decreasing confidence
    async fn detect(&self, text: &str) -> ProviderResult<Vec<LanguageCandidate>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> ProviderResult<String>;
}

/// A translator bound to one source/target pair at creation
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> ProviderResult<String>;
}

// ===== Providers =====

#[enum_dispatch]
pub trait ProviderSync: Send + Sync {
    /// Short identifier for logs
    fn id(&self) -> &str;
}

/// Async side of a provider (enum_dispatch does not cover async methods)
#[async_trait]
pub trait ProviderAsync: Send + Sync {
    /// Never fails; host errors degrade to `Probe::Unavailable`.
    async fn probe(&self, capability: Capability) -> Probe;

    async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>>;

    async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>>;

    async fn create_translator(&self, source: &str, target: &str) -> ProviderResult<Box<dyn Translator>>;
}

#[enum_dispatch(ProviderSync)]
#[derive(Clone)]
pub enum CapabilityProvider {
    Native(NativeProvider),
    Mock(MockProvider),
}

#[async_trait]
impl ProviderAsync for CapabilityProvider {
    async fn probe(&self, capability: Capability) -> Probe {
        let probe = match self {
            CapabilityProvider::Native(p) => p.probe(capability).await,
            CapabilityProvider::Mock(p) => p.probe(capability).await,
        };
        tracing::debug!("[Probe] {} via {} -> {:?}", capability, self.id(), probe.status());
        probe
    }

    async fn create_detector(&self) -> ProviderResult<Box<dyn LanguageDetector>> {
        match self {
            CapabilityProvider::Native(p) => p.create_detector().await,
            CapabilityProvider::Mock(p) => p.create_detector().await,
        }
    }

    async fn create_summarizer(&self) -> ProviderResult<Box<dyn Summarizer>> {
        match self {
            CapabilityProvider::Native(p) => p.create_summarizer().await,
            CapabilityProvider::Mock(p) => p.create_summarizer().await,
        }
    }

    async fn create_translator(&self, source: &str, target: &str) -> ProviderResult<Box<dyn Translator>> {
        match self {
            CapabilityProvider::Native(p) => p.create_translator(source, target).await,
            CapabilityProvider::Mock(p) => p.create_translator(source, target).await,
        }
    }
}
