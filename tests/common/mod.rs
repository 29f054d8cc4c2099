#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pse_checkout::application::controller::{CheckoutController, CheckoutPorts};
use pse_checkout::config::CheckoutConfig;
use pse_checkout::domain::form::FormField;
use pse_checkout::domain::ports::{Clock, Notifier};
use pse_checkout::domain::transaction::PaymentNotification;
use pse_checkout::error::NotifyError;
use pse_checkout::infrastructure::in_memory::InMemoryPage;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Keeps every notification it is handed; can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<PaymentNotification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<PaymentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &PaymentNotification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotifyError::UrlParse {
                context: "simulated network failure",
                source: url::ParseError::EmptyHost,
            });
        }
        Ok(())
    }
}

/// Records each notification, then never answers.
#[derive(Clone, Default)]
pub struct StalledNotifier {
    sent: Arc<Mutex<Vec<PaymentNotification>>>,
}

impl StalledNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<PaymentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for StalledNotifier {
    async fn notify(&self, notification: &PaymentNotification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_millis_opt(millis).unwrap()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn fast_config() -> CheckoutConfig {
    CheckoutConfig::new()
        .unwrap()
        .with_step_delay(Duration::ZERO)
        .with_toast_ttl(Duration::from_secs(5))
}

/// A page filled in with values that pass every rule.
pub fn filled_page() -> InMemoryPage {
    InMemoryPage::new()
        .with_field(FormField::FullName, "Ana Gómez")
        .with_field(FormField::Email, "ana@example.co")
        .with_field(FormField::Phone, "+57 300 123 4567")
        .with_field(FormField::Document, "1020304050")
}

/// Initializes a controller on `page`, then re-applies the page's typed values
/// over whatever the query string prefilled, and ticks the terms if asked to.
pub fn controller_with(
    page: Arc<InMemoryPage>,
    notifier: RecordingNotifier,
    config: CheckoutConfig,
    query: &str,
    accept_terms: bool,
) -> CheckoutController {
    let typed = page.snapshot().fields;
    let controller = CheckoutController::initialize(
        CheckoutPorts::new(page.clone(), Box::new(notifier)),
        config,
        query,
    )
    .expect("page has every critical element");

    for (field, value) in typed {
        if !value.is_empty() {
            page.type_into(field, &value);
        }
    }
    page.set_consent(accept_terms);
    controller.on_consent_changed();
    controller
}

pub fn ready_controller(notifier: RecordingNotifier) -> (Arc<InMemoryPage>, CheckoutController) {
    let page = Arc::new(filled_page());
    let controller = controller_with(page.clone(), notifier, fast_config(), "", true);
    (page, controller)
}
