use crate::domain::form::{FormData, FormField};
use crate::domain::page::{ButtonState, ElementId, FieldStatus, Overlay, Toast, ToastId};
use crate::domain::ports::PaymentPage;
use crate::domain::transaction::TransactionId;
use crate::error::{CheckoutError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Everything currently rendered on an [`InMemoryPage`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub fields: BTreeMap<FormField, String>,
    pub field_status: BTreeMap<FormField, FieldStatus>,
    pub consent_checked: bool,
    pub consent_error: Option<String>,
    pub button: Option<ButtonState>,
    pub loading_visible: bool,
    pub loading_message: Option<String>,
    /// Every loading message shown, oldest first.
    pub loading_history: Vec<String>,
    pub success_modal_visible: bool,
    pub transaction_id: Option<String>,
    pub active_steps: usize,
    pub toasts: Vec<Toast>,
    pub toast_history: Vec<Toast>,
    pub selected_payment_method: Option<String>,
    pub close_requested: bool,
}

impl PageSnapshot {
    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_status.get(&field)?.error_message()
    }

    pub fn field_errors(&self) -> Vec<(FormField, &str)> {
        self.field_status
            .iter()
            .filter_map(|(field, status)| status.error_message().map(|m| (*field, m)))
            .collect()
    }
}

/// A headless landing page.
///
/// Holds the same elements the HTML page has and records what the flow renders
/// into them. Elements can be left out to reproduce a broken page.
#[derive(Debug)]
pub struct InMemoryPage {
    elements: Mutex<BTreeSet<ElementId>>,
    payment_methods: Vec<String>,
    state: Mutex<PageSnapshot>,
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPage {
    /// A complete page with empty inputs, the terms unchecked and a single `pse` method.
    pub fn new() -> Self {
        let state = PageSnapshot {
            fields: FormField::REQUIRED
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
            ..Default::default()
        };
        Self {
            elements: Mutex::new(ElementId::ALL.into_iter().collect()),
            payment_methods: vec!["pse".to_string()],
            state: Mutex::new(state),
        }
    }

    /// Creates a copy of this page with `id` left out of the markup.
    pub fn without_element(self, id: ElementId) -> Self {
        self.remove_element(id);
        self
    }

    /// Creates a copy of this page with `value` already typed into `field`.
    ///
    /// # Arguments
    ///
    /// * `field` - The input to fill; ignored if it was removed from the page.
    /// * `value` - The raw text, untrimmed.
    pub fn with_field(self, field: FormField, value: &str) -> Self {
        self.type_into(field, value);
        self
    }

    /// Creates a copy of this page with the terms checkbox set to `checked`.
    pub fn with_consent(self, checked: bool) -> Self {
        self.set_consent(checked);
        self
    }

    /// Replaces the `.payment-method` options the page offers.
    pub fn with_payment_methods(mut self, methods: &[&str]) -> Self {
        self.payment_methods = methods.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Replaces the value of an input, as a user typing would.
    pub fn type_into(&self, field: FormField, value: &str) {
        if self.has_element(field.element()) {
            self.state().fields.insert(field, value.to_string());
        }
    }

    /// Ticks or unticks the terms checkbox, as a user click would.
    pub fn set_consent(&self, checked: bool) {
        self.state().consent_checked = checked;
    }

    /// Detaches an element from the page.
    pub fn remove_element(&self, id: ElementId) {
        self.elements().remove(&id);
        let field = FormField::REQUIRED.into_iter().find(|f| f.element() == id);
        if let Some(field) = field {
            let mut state = self.state();
            state.fields.remove(&field);
            state.field_status.remove(&field);
        }
    }

    /// Copies out everything currently rendered.
    pub fn snapshot(&self) -> PageSnapshot {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, PageSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn elements(&self) -> MutexGuard<'_, BTreeSet<ElementId>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require(&self, id: ElementId) -> Result<()> {
        if self.has_element(id) {
            Ok(())
        } else {
            Err(CheckoutError::ElementNotFound(id))
        }
    }
}

impl PaymentPage for InMemoryPage {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements().contains(&id)
    }

    fn field_value(&self, field: FormField) -> Option<String> {
        self.state().fields.get(&field).cloned()
    }

    fn set_field_value(&self, field: FormField, value: &str) -> Result<()> {
        self.require(field.element())?;
        self.state().fields.insert(field, value.to_string());
        Ok(())
    }

    fn form_entries(&self) -> FormData {
        let accept_terms = self.has_element(ElementId::AcceptTerms);
        let state = self.state();
        let mut data: FormData = state
            .fields
            .iter()
            .map(|(field, value)| (field.name().to_string(), value.clone()))
            .collect();
        if accept_terms && state.consent_checked {
            data.insert("acceptTerms", "on");
        }
        data
    }

    fn consent_checked(&self) -> bool {
        self.state().consent_checked
    }

    fn render_submit_button(&self, button: &ButtonState) -> Result<()> {
        self.require(ElementId::PaymentButton)?;
        tracing::trace!(enabled = button.enabled, label = %button.label, "pay button");
        self.state().button = Some(button.clone());
        Ok(())
    }

    fn render_field_status(&self, field: FormField, status: &FieldStatus) -> Result<()> {
        self.require(field.element())?;
        let mut state = self.state();
        match status {
            FieldStatus::Neutral => state.field_status.remove(&field),
            other => state.field_status.insert(field, other.clone()),
        };
        Ok(())
    }

    fn render_consent_error(&self, message: Option<&str>) -> Result<()> {
        self.require(ElementId::TermsSection)?;
        self.state().consent_error = message.map(str::to_string);
        Ok(())
    }

    fn set_overlay_visible(&self, overlay: Overlay, visible: bool) -> Result<()> {
        self.require(overlay.element())?;
        tracing::trace!(?overlay, visible, "overlay");
        let mut state = self.state();
        match overlay {
            Overlay::Loading => state.loading_visible = visible,
            Overlay::SuccessModal => state.success_modal_visible = visible,
        }
        Ok(())
    }

    fn set_loading_message(&self, message: &str) -> Result<()> {
        self.require(ElementId::LoadingMessage)?;
        let mut state = self.state();
        state.loading_message = Some(message.to_string());
        state.loading_history.push(message.to_string());
        Ok(())
    }

    fn set_transaction_id(&self, id: &TransactionId) -> Result<()> {
        self.require(ElementId::TransactionId)?;
        self.state().transaction_id = Some(id.to_string());
        Ok(())
    }

    fn set_active_steps(&self, count: usize) -> Result<()> {
        self.require(ElementId::ProgressSteps)?;
        self.state().active_steps = count;
        Ok(())
    }

    fn select_payment_method(&self, method: &str) -> Result<()> {
        self.require(ElementId::PaymentMethods)?;
        if !self.payment_methods.iter().any(|m| m == method) {
            return Err(CheckoutError::ValidationError(format!(
                "unknown payment method: {method}"
            )));
        }
        self.state().selected_payment_method = Some(method.to_string());
        Ok(())
    }

    fn push_toast(&self, toast: &Toast) -> Result<()> {
        let mut state = self.state();
        state.toasts.push(toast.clone());
        state.toast_history.push(toast.clone());
        Ok(())
    }

    fn remove_toast(&self, id: ToastId) {
        self.state().toasts.retain(|toast| toast.id != id);
    }

    fn request_window_close(&self) {
        self.state().close_requested = true;
    }
}
