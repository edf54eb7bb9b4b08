//! Notification Dispatcher
//!
//! Stateless fan-out of formatted text messages to messaging channels.
//! Every send is best-effort: failures are logged and never surfaced to
//! the caller, so a broken messaging API can never fail a checkout.
//! Order summaries and back-in-stock alerts share this dispatcher.

use serde::Serialize;
use shared::models::Order;

use crate::core::NotifyConfig;

/// Messaging API send payload: one text message to one channel.
#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Notification dispatcher.
///
/// Constructed once from an explicit [`NotifyConfig`]; it performs no
/// ambient environment lookups of its own.
pub struct Notifier {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("enabled", &self.config.is_enabled())
            .finish()
    }
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fan an order summary out to the accounting channel and the
    /// pickup location's channel.
    ///
    /// Both sends run concurrently and are awaited together; neither
    /// outcome affects the other, and no caller ever sees a failure.
    pub async fn send_order_summary(&self, order: &Order, location_name: Option<&str>) {
        if !self.config.is_enabled() {
            tracing::debug!(order_id = order.id, "Notifier disabled, skipping order summary");
            return;
        }

        let text = format_order_summary(order, location_name);

        let accounting = async {
            if let Some(channel) = &self.config.accounting_channel {
                self.send_text(channel, &text).await;
            }
        };
        let location = async {
            if let Some(channel) =
                location_name.and_then(|name| self.config.channel_for_location(name))
            {
                self.send_text(channel, &text).await;
            }
        };

        tokio::join!(accounting, location);
    }

    /// Back-in-stock alert for one subscription.
    pub async fn send_stock_alert(&self, channel: &str, product_name: &str, location_name: &str) {
        if !self.config.is_enabled() {
            tracing::debug!(product = %product_name, "Notifier disabled, skipping stock alert");
            return;
        }
        let text = format!("{product_name} is back in stock at {location_name}.");
        self.send_text(channel, &text).await;
    }

    /// Send one text message to one channel, best-effort.
    ///
    /// Network and HTTP errors are logged at `warn` and swallowed.
    pub async fn send_text(&self, channel: &str, text: &str) {
        let Some(api_url) = &self.config.api_url else {
            return;
        };

        let url = format!("{}/sendMessage", api_url.trim_end_matches('/'));
        let body = SendMessageBody {
            chat_id: channel,
            text,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let resp = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(channel = %channel, error = %e, "Failed to send notification");
                return;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(
                channel = %channel,
                status = %resp.status(),
                "Notification send returned non-success status"
            );
            return;
        }

        tracing::debug!(channel = %channel, "Notification sent");
    }
}

/// Render one order into the text sent to both channels.
pub fn format_order_summary(order: &Order, location_name: Option<&str>) -> String {
    use std::fmt::Write;

    let mut text = format!(
        "Order #{} ({:?})\nClient: {}\nPickup: {}\nPayment: {:?}\n",
        order.id,
        order.status,
        order.client_id,
        location_name.unwrap_or("not selected"),
        order.payment_method,
    );

    for line in &order.lines {
        let _ = writeln!(
            text,
            "  {} x {} @ {} = {}",
            line.quantity, line.name, line.unit_price, line.line_total
        );
    }

    let _ = write!(text, "Subtotal: {}", order.subtotal);
    if order.volume_discount > 0 {
        let _ = write!(text, "\nVolume discount: -{}", order.volume_discount);
    }
    if order.loyalty_discount > 0 {
        let _ = write!(text, "\nLoyalty discount: -{}", order.loyalty_discount);
    }
    if order.coins_redeemed > 0 {
        let _ = write!(text, "\nCoins redeemed: -{}", order.coins_redeemed);
    }
    if order.coins_earned > 0 {
        let _ = write!(text, "\nCoins earned: {}", order.coins_earned);
    }
    let _ = write!(text, "\nTotal: {}", order.total);
    if let Some(comment) = &order.comment {
        let _ = write!(text, "\nComment: {}", comment);
    }

    text
}
