use super::simulator::INITIAL_MESSAGE;
use crate::domain::form::FormField;
use crate::domain::page::{ButtonState, Cursor, FieldStatus, Overlay, Toast, ToastId, ToastKind};
use crate::domain::ports::PageHandle;
use crate::domain::transaction::{Amount, TransactionId};
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Progress steps lit once the payment succeeded.
pub const SUCCESS_STEP: usize = 3;

pub const DISABLED_BUTTON_LABEL: &str = "Acepta los términos para continuar";

/// Everything the flow shows the user, on top of the page port.
///
/// Inline errors are cosmetic: if their container is missing the failure is
/// logged and dropped. Overlay and modal changes propagate errors to the caller.
pub struct UiFeedback {
    page: PageHandle,
    toast_ttl: Duration,
    next_toast: AtomicU64,
}

impl UiFeedback {
    pub fn new(page: PageHandle, toast_ttl: Duration) -> Self {
        Self {
            page,
            toast_ttl,
            next_toast: AtomicU64::new(1),
        }
    }

    pub fn button_state(consent_checked: bool, amount: &Amount) -> ButtonState {
        if consent_checked {
            ButtonState {
                enabled: true,
                opacity: 1.0,
                cursor: Cursor::Pointer,
                label: format!("Pagar {} →", amount.display_cop()),
            }
        } else {
            ButtonState {
                enabled: false,
                opacity: 0.5,
                cursor: Cursor::NotAllowed,
                label: DISABLED_BUTTON_LABEL.to_string(),
            }
        }
    }

    pub fn render_button(&self, consent_checked: bool, amount: &Amount) -> Result<()> {
        self.page
            .render_submit_button(&Self::button_state(consent_checked, amount))
    }

    pub fn field_status(&self, field: FormField, status: FieldStatus) {
        if let Err(e) = self.page.render_field_status(field, &status) {
            tracing::warn!(%field, error = %e, "form group not found for field");
        }
    }

    pub fn consent_error(&self, message: Option<&str>) {
        if let Err(e) = self.page.render_consent_error(message) {
            // nothing to clear without a terms section
            if message.is_some() {
                tracing::warn!(error = %e, "terms section not found");
            }
        }
    }

    pub fn show_loading(&self) -> Result<()> {
        self.page.set_overlay_visible(Overlay::Loading, true)?;
        self.loading_message(INITIAL_MESSAGE);
        Ok(())
    }

    pub fn loading_message(&self, message: &str) {
        if let Err(e) = self.page.set_loading_message(message) {
            tracing::debug!(error = %e, text = message, "loading message not shown");
        }
    }

    pub fn hide_loading(&self) -> Result<()> {
        self.page.set_overlay_visible(Overlay::Loading, false)
    }

    /// Swaps the loading overlay for the success modal showing `id`.
    pub fn show_success(&self, id: &TransactionId) -> Result<()> {
        self.page.set_transaction_id(id)?;
        self.hide_loading()?;
        self.page.set_overlay_visible(Overlay::SuccessModal, true)?;
        if let Err(e) = self.page.set_active_steps(SUCCESS_STEP) {
            tracing::warn!(error = %e, "progress steps not updated");
        }
        Ok(())
    }

    pub fn close_success_modal(&self) -> Result<()> {
        self.page.set_overlay_visible(Overlay::SuccessModal, false)?;
        self.page.request_window_close();
        Ok(())
    }

    /// Shows a toast and schedules its removal after the configured lifetime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let toast = Toast {
            id: ToastId(self.next_toast.fetch_add(1, Ordering::Relaxed)),
            kind,
            message: message.into(),
        };
        tracing::info!(kind = ?toast.kind, text = %toast.message, "showing notification");

        if let Err(e) = self.page.push_toast(&toast) {
            tracing::warn!(error = %e, "notification could not be shown");
            return toast.id;
        }

        let page = self.page.clone();
        let ttl = self.toast_ttl;
        let id = toast.id;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            page.remove_toast(id);
        });
        id
    }
}
