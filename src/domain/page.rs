use std::fmt;

/// Elements and structural regions of the landing page the checkout flow touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    PaymentForm,
    PaymentButton,
    LoadingOverlay,
    SuccessModal,
    TransactionId,
    AcceptTerms,
    Phone,
    FullName,
    Email,
    Document,
    TermsSection,
    LoadingMessage,
    ProgressSteps,
    PaymentMethods,
}

impl ElementId {
    /// Elements without which the flow cannot start.
    pub const CRITICAL: [ElementId; 4] = [
        ElementId::PaymentForm,
        ElementId::PaymentButton,
        ElementId::LoadingOverlay,
        ElementId::SuccessModal,
    ];

    pub const ALL: [ElementId; 14] = [
        ElementId::PaymentForm,
        ElementId::PaymentButton,
        ElementId::LoadingOverlay,
        ElementId::SuccessModal,
        ElementId::TransactionId,
        ElementId::AcceptTerms,
        ElementId::Phone,
        ElementId::FullName,
        ElementId::Email,
        ElementId::Document,
        ElementId::TermsSection,
        ElementId::LoadingMessage,
        ElementId::ProgressSteps,
        ElementId::PaymentMethods,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            ElementId::PaymentForm => "#paymentForm",
            ElementId::PaymentButton => "#paymentButton",
            ElementId::LoadingOverlay => "#loadingOverlay",
            ElementId::SuccessModal => "#successModal",
            ElementId::TransactionId => "#transactionId",
            ElementId::AcceptTerms => "#acceptTerms",
            ElementId::Phone => "#phone",
            ElementId::FullName => "#fullName",
            ElementId::Email => "#email",
            ElementId::Document => "#document",
            ElementId::TermsSection => ".terms-section",
            ElementId::LoadingMessage => ".loading-content p",
            ElementId::ProgressSteps => ".step",
            ElementId::PaymentMethods => ".payment-method",
        }
    }

    pub fn is_critical(&self) -> bool {
        Self::CRITICAL.contains(self)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    NotAllowed,
}

/// Visual state of the submit button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub enabled: bool,
    pub opacity: f32,
    pub cursor: Cursor,
    pub label: String,
}

/// Border and inline message shown next to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Neutral,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FieldStatus::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Loading,
    SuccessModal,
}

impl Overlay {
    pub fn element(&self) -> ElementId {
        match self {
            Overlay::Loading => ElementId::LoadingOverlay,
            Overlay::SuccessModal => ElementId::SuccessModal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

/// A transient notification pinned to the corner of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}
