//! Test to trigger ts-rs bindings export
//! Run with: cargo test export_bindings

#[cfg(test)]
mod tests {
    use crate::core::session::SessionStatus;
    use crate::shared::error::TextServiceError;
    use crate::shared::events::ServiceEvent;
    use crate::shared::settings::TextGenieSettings;
    use crate::shared::types::*;
    use ts_rs::TS;

    #[test]
    fn export_bindings() {
        // Results consumed by the display layer
        DetectionResult::export().expect("Failed to export DetectionResult");
        SummaryResult::export().expect("Failed to export SummaryResult");
        TranslationResult::export().expect("Failed to export TranslationResult");
        Message::export().expect("Failed to export Message");

        // Status and error signals
        ServiceEvent::export().expect("Failed to export ServiceEvent");
        TextServiceError::export().expect("Failed to export TextServiceError");
        SessionStatus::export().expect("Failed to export SessionStatus");
        TextGenieSettings::export().expect("Failed to export TextGenieSettings");
    }

    #[test]
    fn capability_names_round_trip_through_serde() {
        for capability in Capability::ALL {
            let json = serde_json::to_string(&capability).unwrap();
            assert_eq!(json, format!("\"{}\"", capability.name()));
            assert_eq!(capability.name().parse::<Capability>(), Ok(capability));
        }
        assert!("rewriter".parse::<Capability>().is_err());
    }
}
