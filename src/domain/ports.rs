use super::form::{FormData, FormField};
use super::page::{ButtonState, ElementId, FieldStatus, Overlay, Toast, ToastId};
use super::transaction::{PaymentNotification, TransactionId};
use crate::error::{NotifyError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The rendered landing page, as seen by the checkout flow.
///
/// Methods take `&self` so a page can be shared with the toast-dismissal task;
/// implementations use interior mutability. Writes to an element that is not on
/// the page return [`crate::error::CheckoutError::ElementNotFound`].
pub trait PaymentPage: Send + Sync {
    fn has_element(&self, id: ElementId) -> bool;

    /// Current value of a form input, `None` if the input is not on the page.
    fn field_value(&self, field: FormField) -> Option<String>;
    fn set_field_value(&self, field: FormField, value: &str) -> Result<()>;
    fn form_entries(&self) -> FormData;
    fn consent_checked(&self) -> bool;

    fn render_submit_button(&self, state: &ButtonState) -> Result<()>;
    fn render_field_status(&self, field: FormField, status: &FieldStatus) -> Result<()>;
    fn render_consent_error(&self, message: Option<&str>) -> Result<()>;

    fn set_overlay_visible(&self, overlay: Overlay, visible: bool) -> Result<()>;
    fn set_loading_message(&self, message: &str) -> Result<()>;
    fn set_transaction_id(&self, id: &TransactionId) -> Result<()>;
    /// Marks the first `count` progress steps active and the rest inactive.
    fn set_active_steps(&self, count: usize) -> Result<()>;
    fn select_payment_method(&self, method: &str) -> Result<()>;

    fn push_toast(&self, toast: &Toast) -> Result<()>;
    fn remove_toast(&self, id: ToastId);

    fn request_window_close(&self);
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &PaymentNotification) -> Result<(), NotifyError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type PageHandle = Arc<dyn PaymentPage>;
pub type NotifierBox = Box<dyn Notifier>;
pub type ClockHandle = Arc<dyn Clock>;
