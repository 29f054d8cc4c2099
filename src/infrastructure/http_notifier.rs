//! A [`Notifier`] that POSTs the payment confirmation to the WhatsApp bot.
//!
//! The endpoint is `./api/payment-confirmation` relative to the configured base
//! URL. The body is the JSON-encoded [`PaymentNotification`]; only the response
//! status is looked at.

use crate::config::CheckoutConfig;
use crate::domain::ports::Notifier;
use crate::domain::transaction::PaymentNotification;
use crate::error::NotifyError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

pub const CONFIRMATION_PATH: &str = "./api/payment-confirmation";

#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpNotifier {
    /// Builds a notifier targeting `<base_url>/api/payment-confirmation`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::UrlParse`] if the endpoint cannot be derived from `base_url`.
    pub fn try_new(base_url: &Url) -> Result<Self, NotifyError> {
        let endpoint = base_url
            .join(CONFIRMATION_PATH)
            .map_err(|e| NotifyError::UrlParse {
                context: "Failed to construct ./api/payment-confirmation URL",
                source: e,
            })?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            timeout: None,
        })
    }

    pub fn from_config(config: &CheckoutConfig) -> Result<Self, NotifyError> {
        let notifier = Self::try_new(&config.notify_base_url)?;
        Ok(match config.notify_timeout {
            Some(timeout) => notifier.with_timeout(timeout),
            None => notifier,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, notification: &PaymentNotification) -> Result<(), NotifyError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(notification);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| NotifyError::Http {
            context: "POST payment confirmation",
            source: e,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::HttpStatus {
            context: "POST payment confirmation",
            status,
            body,
        })
    }
}
