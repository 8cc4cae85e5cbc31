//! TextGenie: language detection, summarization and translation over
//! optional host AI capabilities, with local fallbacks when a capability
//! is missing.

pub mod core;
pub mod logging;
pub mod shared;

pub use crate::core::capability::{CapabilityHost, CapabilityProvider, MockProvider, NativeProvider};
pub use crate::core::service::{TextService, MIN_SUMMARY_CHARS};
pub use crate::core::session::{Session, SessionStatus};
pub use crate::shared::error::{ServiceResult, TextServiceError};
