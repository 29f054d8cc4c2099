use crate::domain::page::ElementId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("critical page elements not found: {}", format_elements(.0))]
    MissingElements(Vec<ElementId>),
    #[error("page element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while delivering the payment confirmation over HTTP.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        context: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

fn format_elements(ids: &[ElementId]) -> String {
    ids.iter()
        .map(ElementId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = CheckoutError> = std::result::Result<T, E>;
