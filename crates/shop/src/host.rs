//! Host messaging capability.
//!
//! The embedding host may or may not be present. Rather than scattering
//! existence checks through the business logic, the channel is selected
//! once at startup: a live [`WebhookChannel`] delivering the order payload
//! to the host endpoint, or the null variant surfacing the order through a
//! user-visible notification. Delivery failures degrade to the
//! notification fallback; they never bubble up as errors.

use thiserror::Error;
use url::Url;

use crate::order::OrderRecord;

/// Errors that can occur delivering to the host endpoint.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Host endpoint returned a non-success status.
    #[error("host endpoint returned status {0}")]
    Status(u16),
}

/// Outcome of handing an order to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The payload reached the host and the session close was requested.
    Sent,
    /// No host (or delivery failed); the text is the notification to show
    /// the user.
    Notified(String),
}

/// The host messaging capability, selected at startup.
#[derive(Debug, Clone)]
pub enum HostChannel {
    /// No host present; orders surface as notifications.
    Null,
    /// Live host bridge delivering payloads over HTTP.
    Webhook(WebhookChannel),
}

impl HostChannel {
    /// Request the maximal viewport from the host.
    ///
    /// The request is a fire-and-forget UI signal; headless variants have
    /// nothing to expand.
    pub fn expand(&self) {
        match self {
            Self::Null => tracing::debug!("no host channel, viewport expand skipped"),
            Self::Webhook(_) => tracing::debug!("viewport expand requested"),
        }
    }

    /// Hand the composed order to the host.
    ///
    /// On the live channel this sends the payload and requests session
    /// close; on failure (or on the null channel) it falls back to a
    /// user-visible notification carrying the items string.
    pub async fn deliver(&self, order: &OrderRecord) -> Delivery {
        match self {
            Self::Null => Delivery::Notified(notification(order)),
            Self::Webhook(channel) => match channel.send(order).await {
                Ok(()) => {
                    tracing::info!("order delivered, host session close requested");
                    Delivery::Sent
                }
                Err(e) => {
                    tracing::warn!("order delivery failed, falling back to notification: {e}");
                    Delivery::Notified(notification(order))
                }
            },
        }
    }
}

/// The blocking-notification body shown when no host receives the order.
fn notification(order: &OrderRecord) -> String {
    format!("Order placed! Items: {}", order.items)
}

/// Live host bridge posting order payloads to a configured endpoint.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    endpoint: Url,
}

impl WebhookChannel {
    /// Create a channel delivering to the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// POST the serialized order, checking the response status.
    async fn send(&self, order: &OrderRecord) -> Result<(), ChannelError> {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(order)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderRecord {
        OrderRecord {
            delivery_date: "Today".to_string(),
            amount: "20.50".to_string(),
            items: "000001 2,000002 0.2".to_string(),
            comment: String::new(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_null_channel_notifies() {
        let outcome = HostChannel::Null.deliver(&order()).await;
        assert_eq!(
            outcome,
            Delivery::Notified("Order placed! Items: 000001 2,000002 0.2".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_webhook_degrades_to_notification() {
        let endpoint = Url::parse("http://127.0.0.1:1/orders").expect("valid url");
        let channel = HostChannel::Webhook(WebhookChannel::new(endpoint));

        let outcome = channel.deliver(&order()).await;
        assert!(matches!(outcome, Delivery::Notified(_)));
    }

    #[test]
    fn test_channel_error_display() {
        let err = ChannelError::Status(503);
        assert_eq!(err.to_string(), "host endpoint returned status 503");
    }
}
