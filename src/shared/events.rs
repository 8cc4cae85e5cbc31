use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::types::{Capability, DownloadProgress};

/// Status signals raised while a façade operation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export, export_to = "textgenie/")]
pub enum ServiceEvent {
    #[serde(rename = "download://started")]
    DownloadStarted(Capability),

    #[serde(rename = "download://progress")]
    DownloadProgress {
        capability: Capability,
        progress: DownloadProgress,
    },

    #[serde(rename = "download://finished")]
    DownloadFinished(Capability),

    #[serde(rename = "capability://fallback")]
    FallbackUsed(Capability),
}
