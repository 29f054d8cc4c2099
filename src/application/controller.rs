use super::feedback::UiFeedback;
use super::flow::{CloseGuard, FlowState, FlowTracker};
use super::simulator::PaymentSimulator;
use crate::config::CheckoutConfig;
use crate::domain::context::PaymentContext;
use crate::domain::form::FormField;
use crate::domain::page::{ElementId, FieldStatus, ToastKind};
use crate::domain::ports::{ClockHandle, NotifierBox, PageHandle};
use crate::domain::transaction::{
    PaymentNotification, PaymentStatus, TransactionIdGenerator, TransactionRecord,
};
use crate::domain::validation::{
    CONSENT_REQUIRED_MESSAGE, ValidationReport, validate_field, validate_form,
};
use crate::error::{CheckoutError, Result};
use crate::infrastructure::clock::SystemClock;
use crate::interfaces::query_params::QueryParams;
use std::sync::{Arc, Mutex, PoisonError};

pub const INVALID_FORM_MESSAGE: &str = "Por favor corrige los errores en el formulario";
pub const PAYMENT_FAILED_MESSAGE: &str = "Error procesando el pago. Intenta nuevamente.";

/// The collaborators a controller is wired to.
pub struct CheckoutPorts {
    pub page: PageHandle,
    pub notifier: NotifierBox,
    pub clock: ClockHandle,
}

impl CheckoutPorts {
    pub fn new(page: PageHandle, notifier: NotifierBox) -> Self {
        Self {
            page,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submission is still running; this one was ignored.
    Busy,
    /// Validation failed; nothing was simulated.
    Rejected(ValidationReport),
    /// The success modal is showing. `notified` tells whether the bot accepted the confirmation.
    Completed {
        record: TransactionRecord,
        notified: bool,
    },
    /// The simulation broke off; the page is back to its idle state.
    Failed(CheckoutError),
}

/// Drives the landing-page checkout: field feedback, the submit gate, the
/// simulated PSE payment and the confirmation sent to the bot.
pub struct CheckoutController {
    page: PageHandle,
    feedback: UiFeedback,
    notifier: NotifierBox,
    clock: ClockHandle,
    config: CheckoutConfig,
    context: PaymentContext,
    simulator: PaymentSimulator,
    ids: TransactionIdGenerator,
    flow: FlowTracker,
    payment_method: Mutex<Option<String>>,
}

impl CheckoutController {
    /// Binds to the page once it is loaded.
    ///
    /// # Arguments
    ///
    /// * `ports` - The page, notifier and clock to use.
    /// * `config` - Amount, delays and notification endpoint.
    /// * `query` - The query string the page was opened with.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingElements`] naming every critical element
    /// the page lacks.
    pub fn initialize(ports: CheckoutPorts, config: CheckoutConfig, query: &str) -> Result<Self> {
        let CheckoutPorts {
            page,
            notifier,
            clock,
        } = ports;

        let missing: Vec<ElementId> = ElementId::CRITICAL
            .into_iter()
            .filter(|id| !page.has_element(*id))
            .collect();
        if !missing.is_empty() {
            for id in &missing {
                tracing::error!(element = %id, "critical element not found");
            }
            return Err(CheckoutError::MissingElements(missing));
        }
        for id in ElementId::ALL.into_iter().filter(|id| !id.is_critical()) {
            if !page.has_element(id) {
                tracing::warn!(element = %id, "optional element not found");
            }
        }

        let params = QueryParams::parse(query);
        tracing::debug!(params = ?params.pairs(), "landing page query parameters");
        let context = params.into_context(clock.now());
        tracing::info!(phone = %context.phone_number, "payment context loaded");

        let controller = Self {
            feedback: UiFeedback::new(page.clone(), config.toast_ttl),
            simulator: PaymentSimulator::new(config.step_delay),
            page,
            notifier,
            clock,
            config,
            context,
            ids: TransactionIdGenerator::new(),
            flow: FlowTracker::new(),
            payment_method: Mutex::new(None),
        };
        controller.prefill();
        controller.on_consent_changed();

        tracing::info!("checkout controller initialized");
        Ok(controller)
    }

    fn prefill(&self) {
        if self.page.has_element(ElementId::Phone)
            && let Err(e) = self
                .page
                .set_field_value(FormField::Phone, &self.context.phone_number)
        {
            tracing::warn!(error = %e, "phone could not be prefilled");
        }

        if self.context.has_custom_name()
            && self.page.has_element(ElementId::FullName)
            && let Err(e) = self
                .page
                .set_field_value(FormField::FullName, &self.context.user_name)
        {
            tracing::warn!(error = %e, "name could not be prefilled");
        }
    }

    /// Re-renders the pay button after the terms checkbox changed.
    pub fn on_consent_changed(&self) {
        if !self.page.has_element(ElementId::AcceptTerms) {
            return;
        }
        let checked = self.page.consent_checked();
        if let Err(e) = self.feedback.render_button(checked, &self.config.amount) {
            tracing::warn!(error = %e, "pay button not updated");
        }
    }

    /// Validates a single field when it loses focus. Returns whether it is valid.
    pub fn on_field_blur(&self, field: FormField) -> bool {
        match self.page.field_value(field) {
            Some(value) => self.check_field(field, &value),
            None => {
                tracing::warn!(%field, "blur on a field that is not on the page");
                true
            }
        }
    }

    /// Drops any verdict on a field as soon as the user edits it.
    pub fn on_field_input(&self, field: FormField) {
        self.feedback.field_status(field, FieldStatus::Neutral);
    }

    fn check_field(&self, field: FormField, value: &str) -> bool {
        match validate_field(field, value) {
            Ok(()) => {
                self.feedback.field_status(field, FieldStatus::Valid);
                true
            }
            Err(error) => {
                self.feedback
                    .field_status(field, FieldStatus::Invalid(error.message()));
                false
            }
        }
    }

    /// Validates every required field and the consent checkbox, annotating each failure.
    pub fn validate_form(&self) -> ValidationReport {
        let consent_given =
            !self.page.has_element(ElementId::AcceptTerms) || self.page.consent_checked();
        let report = validate_form(|field| self.page.field_value(field), consent_given);

        for field in &report.checked {
            let status = match report.error_for(*field) {
                Some(error) => FieldStatus::Invalid(error.message()),
                None => FieldStatus::Valid,
            };
            self.feedback.field_status(*field, status);
        }

        if report.consent_missing {
            self.feedback.consent_error(Some(CONSENT_REQUIRED_MESSAGE));
        } else {
            self.feedback.consent_error(None);
        }

        tracing::debug!(
            valid = report.is_valid(),
            failing = report.field_errors.len(),
            consent_missing = report.consent_missing,
            "form validated"
        );
        report
    }

    /// Handles a submit of the payment form.
    ///
    /// The notification outcome never changes what the user sees: once the
    /// simulated steps finish the success modal stays up, and a new submission
    /// is accepted even while the confirmation request is still pending.
    pub async fn submit(&self) -> SubmitOutcome {
        if !self.flow.try_begin() {
            tracing::warn!("submit ignored, a payment is already in progress");
            return SubmitOutcome::Busy;
        }

        let report = self.validate_form();
        if !report.is_valid() {
            self.feedback.toast(ToastKind::Error, INVALID_FORM_MESSAGE);
            self.flow.set(FlowState::Idle);
            return SubmitOutcome::Rejected(report);
        }

        self.flow.set(FlowState::Simulating);
        match self.process_payment().await {
            Ok(record) => {
                self.flow.set(FlowState::Notifying);
                let notified = self.notify(&record).await;
                self.flow.advance(FlowState::Notifying, FlowState::Success);
                SubmitOutcome::Completed { record, notified }
            }
            Err(e) => {
                tracing::error!(error = %e, "payment processing failed");
                self.feedback.toast(ToastKind::Error, PAYMENT_FAILED_MESSAGE);
                if let Err(e) = self.feedback.hide_loading() {
                    tracing::warn!(error = %e, "loading overlay not hidden");
                }
                self.flow.set(FlowState::Idle);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn process_payment(&self) -> Result<TransactionRecord> {
        self.feedback.show_loading()?;
        self.simulator
            .run(|step| self.feedback.loading_message(step))
            .await;

        let now = self.clock.now();
        let record = TransactionRecord {
            transaction_id: self.ids.next(now),
            status: PaymentStatus::Success,
            amount: self.config.amount,
            timestamp: now,
        };
        self.feedback.show_success(&record.transaction_id)?;
        Ok(record)
    }

    async fn notify(&self, record: &TransactionRecord) -> bool {
        let notification = PaymentNotification::new(
            &self.context,
            record,
            self.page.form_entries(),
            self.clock.now(),
        );
        tracing::info!(
            transaction_id = %record.transaction_id,
            phone = %notification.phone_number,
            "sending payment confirmation"
        );

        match self.notifier.notify(&notification).await {
            Ok(()) => {
                tracing::info!(transaction_id = %record.transaction_id, "payment confirmation delivered");
                true
            }
            Err(e) => {
                tracing::error!(
                    transaction_id = %record.transaction_id,
                    error = %e,
                    "payment confirmation not delivered"
                );
                false
            }
        }
    }

    pub fn select_payment_method(&self, method: &str) -> Result<()> {
        self.page.select_payment_method(method)?;
        *self
            .payment_method
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(method.to_string());
        Ok(())
    }

    pub fn selected_payment_method(&self) -> Option<String> {
        self.payment_method
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Hides the success modal and asks the host to close the window.
    pub fn close_success_modal(&self) -> Result<()> {
        self.feedback.close_success_modal()
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow.current()
    }

    pub fn close_guard(&self) -> CloseGuard {
        self.flow.close_guard()
    }

    pub fn context(&self) -> &PaymentContext {
        &self.context
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }
}
