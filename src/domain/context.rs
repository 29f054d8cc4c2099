use chrono::{DateTime, Utc};

pub const DEFAULT_PHONE_NUMBER: &str = "34692853761";
pub const DEFAULT_USER_NAME: &str = "Cliente Demo";

/// Who the landing page was opened for, captured once when the page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentContext {
    pub phone_number: String,
    pub user_name: String,
    pub captured_at: DateTime<Utc>,
}

impl PaymentContext {
    pub fn new(
        phone_number: impl Into<String>,
        user_name: impl Into<String>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            user_name: user_name.into(),
            captured_at,
        }
    }

    /// True when the page was opened with an actual `name` parameter.
    pub fn has_custom_name(&self) -> bool {
        self.user_name != DEFAULT_USER_NAME
    }
}
