use std::fmt;
use std::sync::Arc;

use super::events::ServiceEvent;

type Listener = Arc<dyn Fn(&ServiceEvent) + Send + Sync>;

/// Fan-out point for `ServiceEvent`s
///
/// Cloning shares the listener list. A sink with no listeners drops events.
#[derive(Clone, Default)]
pub struct StatusSink {
    listeners: Vec<Listener>,
}

impl StatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&ServiceEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Emit an event to every listener, in registration order
    pub fn emit(&self, event: ServiceEvent) {
        tracing::trace!("[StatusSink] {:?}", event);
        for listener in &self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for StatusSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusSink")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Capability;
    use std::sync::Mutex;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&seen);
        let b = Arc::clone(&seen);
        let sink = StatusSink::new()
            .with_listener(move |_| a.lock().unwrap().push("a"))
            .with_listener(move |_| b.lock().unwrap().push("b"));

        sink.emit(ServiceEvent::FallbackUsed(Capability::Summarizer));

        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_sink_is_silent() {
        StatusSink::new().emit(ServiceEvent::DownloadFinished(Capability::Translator));
    }
}
