use crate::domain::context::{DEFAULT_PHONE_NUMBER, DEFAULT_USER_NAME, PaymentContext};
use chrono::{DateTime, Utc};
use url::form_urlencoded;

/// Reads the `phone` and `name` parameters the page link was opened with.
///
/// Accepts the raw query with or without its leading `?`. Missing or empty
/// parameters fall back to the demo defaults; the first occurrence of a
/// repeated parameter wins.
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Value of the first `key` occurrence, `None` when missing or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn into_context(self, captured_at: DateTime<Utc>) -> PaymentContext {
        PaymentContext::new(
            self.get("phone").unwrap_or(DEFAULT_PHONE_NUMBER),
            self.get("name").unwrap_or(DEFAULT_USER_NAME),
            captured_at,
        )
    }
}
