//! Payment provider events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status reported for a capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureStatus {
    /// Funds captured.
    Completed,
    /// Capture accepted but not yet settled.
    Pending,
    /// Capture refused.
    Declined,
    /// Anything else the provider reports.
    #[serde(untagged)]
    Other(String),
}

impl CaptureStatus {
    /// Whether the buyer has been charged.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Raw webhook notification envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event id.
    pub id: String,
    /// Event type, e.g. `PAYMENT.CAPTURE.COMPLETED`.
    pub event_type: String,
    /// Event payload.
    #[serde(default)]
    pub resource: Value,
}

/// Webhook events the store reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// Buyer approved the order; capture is still pending.
    Approved {
        /// Provider order id.
        paypal_order_id: String,
    },
    /// Funds were captured.
    CaptureCompleted {
        /// Provider order id.
        paypal_order_id: String,
        /// Provider capture id.
        capture_id: String,
    },
    /// Capture was denied or declined.
    CaptureDenied {
        /// Provider order id.
        paypal_order_id: String,
    },
    /// Anything else, or an event missing the fields we need.
    Ignored {
        /// Event type as received.
        event_type: String,
    },
}

impl WebhookEvent {
    /// Classify the event.
    pub fn classify(&self) -> PaymentEvent {
        let related_order_id = || {
            self.resource
                .pointer("/supplementary_data/related_ids/order_id")
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let resource_id = || {
            self.resource
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let event = match self.event_type.as_str() {
            "CHECKOUT.ORDER.APPROVED" => {
                resource_id().map(|paypal_order_id| PaymentEvent::Approved { paypal_order_id })
            }
            "PAYMENT.CAPTURE.COMPLETED" => related_order_id().zip(resource_id()).map(
                |(paypal_order_id, capture_id)| PaymentEvent::CaptureCompleted {
                    paypal_order_id,
                    capture_id,
                },
            ),
            "PAYMENT.CAPTURE.DENIED" | "PAYMENT.CAPTURE.DECLINED" => related_order_id()
                .map(|paypal_order_id| PaymentEvent::CaptureDenied { paypal_order_id }),
            _ => None,
        };

        event.unwrap_or_else(|| PaymentEvent::Ignored {
            event_type: self.event_type.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn event(value: Value) -> Result<WebhookEvent, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn classifies_capture_completed() -> TestResult {
        let event = event(json!({
            "id": "WH-1",
            "event_type": "PAYMENT.CAPTURE.COMPLETED",
            "resource": {
                "id": "CAPTURE-1",
                "status": "COMPLETED",
                "supplementary_data": { "related_ids": { "order_id": "ORDER-1" } }
            }
        }))?;

        assert_eq!(
            event.classify(),
            PaymentEvent::CaptureCompleted {
                paypal_order_id: "ORDER-1".to_string(),
                capture_id: "CAPTURE-1".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn classifies_order_approved() -> TestResult {
        let event = event(json!({
            "id": "WH-2",
            "event_type": "CHECKOUT.ORDER.APPROVED",
            "resource": { "id": "ORDER-2", "status": "APPROVED" }
        }))?;

        assert_eq!(
            event.classify(),
            PaymentEvent::Approved {
                paypal_order_id: "ORDER-2".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn classifies_denied_and_declined() -> TestResult {
        for event_type in ["PAYMENT.CAPTURE.DENIED", "PAYMENT.CAPTURE.DECLINED"] {
            let event = event(json!({
                "id": "WH-3",
                "event_type": event_type,
                "resource": {
                    "id": "CAPTURE-3",
                    "supplementary_data": { "related_ids": { "order_id": "ORDER-3" } }
                }
            }))?;

            assert_eq!(
                event.classify(),
                PaymentEvent::CaptureDenied {
                    paypal_order_id: "ORDER-3".to_string(),
                }
            );
        }

        Ok(())
    }

    #[test]
    fn capture_without_order_reference_is_ignored() -> TestResult {
        let event = event(json!({
            "id": "WH-4",
            "event_type": "PAYMENT.CAPTURE.COMPLETED",
            "resource": { "id": "CAPTURE-4" }
        }))?;

        assert!(matches!(event.classify(), PaymentEvent::Ignored { .. }));

        Ok(())
    }

    #[test]
    fn unknown_events_are_ignored() -> TestResult {
        let event = event(json!({ "id": "WH-5", "event_type": "BILLING.PLAN.CREATED" }))?;

        assert_eq!(
            event.classify(),
            PaymentEvent::Ignored {
                event_type: "BILLING.PLAN.CREATED".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn capture_status_parses_unknown_values() -> TestResult {
        let status: CaptureStatus = serde_json::from_str("\"PARTIALLY_REFUNDED\"")?;

        assert_eq!(status, CaptureStatus::Other("PARTIALLY_REFUNDED".to_string()));
        assert!(!status.is_completed());
        assert!(serde_json::from_str::<CaptureStatus>("\"COMPLETED\"")?.is_completed());

        Ok(())
    }
}
