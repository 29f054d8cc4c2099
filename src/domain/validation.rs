//! Field rules for the payment form.
//!
//! Every rule trims the raw input first. A blur validates a single field; a submit
//! validates every required field plus the consent checkbox and keeps all failures.

use super::form::FormField;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 7;
pub const MIN_DOCUMENT_LEN: usize = 6;

pub const CONSENT_REQUIRED_MESSAGE: &str =
    "Debes aceptar los términos y condiciones para continuar";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    TooShort { min: usize },
    InvalidEmail,
    InvalidPhone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// The inline text rendered under the field.
    pub fn message(&self) -> String {
        match (self.field, self.kind) {
            (_, FieldErrorKind::InvalidEmail) => "Ingresa un correo electrónico válido".to_string(),
            (_, FieldErrorKind::InvalidPhone) => "Ingresa un número de teléfono válido".to_string(),
            (FormField::Document, FieldErrorKind::TooShort { min }) => {
                format!("El documento debe tener al menos {min} caracteres")
            }
            (_, FieldErrorKind::TooShort { min }) => {
                format!("El nombre debe tener al menos {min} caracteres")
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

pub fn validate_field(field: FormField, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    // Browser string length: UTF-16 code units
    let len = value.encode_utf16().count();

    let kind = match field {
        FormField::FullName if len < MIN_NAME_LEN => FieldErrorKind::TooShort { min: MIN_NAME_LEN },
        FormField::Email if !EMAIL_SHAPE.is_match(value) => FieldErrorKind::InvalidEmail,
        FormField::Phone if !PHONE_CHARS.is_match(value) || len < MIN_PHONE_LEN => {
            FieldErrorKind::InvalidPhone
        }
        FormField::Document if len < MIN_DOCUMENT_LEN => FieldErrorKind::TooShort {
            min: MIN_DOCUMENT_LEN,
        },
        _ => return Ok(()),
    };

    Err(FieldError { field, kind })
}

/// Outcome of a full-form validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub checked: Vec<FormField>,
    pub field_errors: Vec<FieldError>,
    pub consent_missing: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && !self.consent_missing
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field == field)
    }
}

/// Validates every required field the page exposes, then the consent flag.
///
/// Fields for which `value_of` returns `None` are not on the page and are skipped.
pub fn validate_form<F>(value_of: F, consent_given: bool) -> ValidationReport
where
    F: Fn(FormField) -> Option<String>,
{
    let mut report = ValidationReport {
        consent_missing: !consent_given,
        ..Default::default()
    };

    for field in FormField::REQUIRED {
        let Some(value) = value_of(field) else {
            continue;
        };
        report.checked.push(field);
        if let Err(error) = validate_field(field, &value) {
            report.field_errors.push(error);
        }
    }

    report
}
