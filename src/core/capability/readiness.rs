//! Readiness handles for capabilities that must download a model first
//!
//! The host keeps the `ReadinessReporter` and pushes progress into it; the
//! façade awaits the matching `ReadinessHandle`. Events are delivered in
//! order and none are coalesced.

use tokio::sync::mpsc;

use crate::shared::error::{ProviderError, ProviderResult};
use crate::shared::types::DownloadProgress;

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    Progress(DownloadProgress),
    Ready,
    Failed(String),
}

/// Create a connected reporter/handle pair
pub fn readiness_channel() -> (ReadinessReporter, ReadinessHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ReadinessReporter { tx },
        ReadinessHandle {
            rx,
            high_water: 0,
            known_total: 0,
        },
    )
}

/// Host side of a download
#[derive(Debug, Clone)]
pub struct ReadinessReporter {
    tx: mpsc::UnboundedSender<DownloadEvent>,
}

impl ReadinessReporter {
    // A closed channel means the waiter abandoned the download, which is not an error for the host.
    pub fn progress(&self, bytes_loaded: u64, bytes_total: u64) {
        let _ = self
            .tx
            .send(DownloadEvent::Progress(DownloadProgress::new(bytes_loaded, bytes_total)));
    }

    pub fn ready(self) {
        let _ = self.tx.send(DownloadEvent::Ready);
    }

    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(DownloadEvent::Failed(reason.into()));
    }
}

/// Waiter side of a download.
///
/// Dropping the handle abandons the wait; the host is not notified.
#[derive(Debug)]
pub struct ReadinessHandle {
    rx: mpsc::UnboundedReceiver<DownloadEvent>,
    high_water: u64,
    /// Largest total reported so far, 0 while unknown
    known_total: u64,
}

impl ReadinessHandle {
    /// Wait until the host reports ready, forwarding progress to `on_progress`.
    ///
    /// Reported `bytes_loaded` never decreases and never exceeds a known total.
    pub async fn wait_ready<F>(mut self, mut on_progress: F) -> ProviderResult<()>
    where
        F: FnMut(DownloadProgress),
    {
        loop {
            match self.rx.recv().await {
                Some(DownloadEvent::Progress(raw)) => {
                    let progress = self.normalize(raw);
                    on_progress(progress);
                }
                Some(DownloadEvent::Ready) => return Ok(()),
                Some(DownloadEvent::Failed(reason)) => return Err(ProviderError::Readiness(reason)),
                None => {
                    return Err(ProviderError::Readiness(
                        "download abandoned before the capability became ready".to_string(),
                    ))
                }
            }
        }
    }

    fn normalize(&mut self, raw: DownloadProgress) -> DownloadProgress {
        self.known_total = self.known_total.max(raw.bytes_total);

        let mut loaded = raw.bytes_loaded.max(self.high_water);
        if self.known_total > 0 {
            loaded = loaded.min(self.known_total);
        }
        self.high_water = loaded;
        DownloadProgress::new(loaded, self.known_total)
    }
}
