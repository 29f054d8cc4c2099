use crate::domain::transaction::{Amount, DEFAULT_AMOUNT};
use crate::error::{CheckoutError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_NOTIFY_BASE_URL: &str = "https://f729c47d77f5.ngrok-free.app/";
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(5000);
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the bot that receives payment confirmations.
    pub notify_base_url: Url,
    /// Pause before each simulated processing step.
    pub step_delay: Duration,
    pub toast_ttl: Duration,
    /// Upper bound on the confirmation request; `None` waits as long as the client does.
    pub notify_timeout: Option<Duration>,
    pub amount: Amount,
}

impl CheckoutConfig {
    /// Creates a configuration holding the landing page's built-in values.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::ConfigError`] if the built-in notify URL does not parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            notify_base_url: parse_url(DEFAULT_NOTIFY_BASE_URL)?,
            step_delay: DEFAULT_STEP_DELAY,
            toast_ttl: DEFAULT_TOAST_TTL,
            notify_timeout: Some(DEFAULT_NOTIFY_TIMEOUT),
            amount: DEFAULT_AMOUNT,
        })
    }

    /// Defaults overridden by `PSE_NOTIFY_BASE_URL`, `PSE_STEP_DELAY_MS`,
    /// `PSE_TOAST_TTL_MS` and `PSE_NOTIFY_TIMEOUT_MS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new()?;

        if let Some(raw) = lookup("PSE_NOTIFY_BASE_URL") {
            config = config.with_notify_base_url(&raw)?;
        }
        if let Some(raw) = lookup("PSE_STEP_DELAY_MS") {
            config.step_delay = parse_millis("PSE_STEP_DELAY_MS", &raw)?;
        }
        if let Some(raw) = lookup("PSE_TOAST_TTL_MS") {
            config.toast_ttl = parse_millis("PSE_TOAST_TTL_MS", &raw)?;
        }
        if let Some(raw) = lookup("PSE_NOTIFY_TIMEOUT_MS") {
            config.notify_timeout = Some(parse_millis("PSE_NOTIFY_TIMEOUT_MS", &raw)?);
        }

        Ok(config)
    }

    /// Points confirmations at another bot.
    ///
    /// # Arguments
    ///
    /// * `raw` - Absolute base URL; `./api/payment-confirmation` is resolved against it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::ConfigError`] if `raw` is not a valid URL.
    pub fn with_notify_base_url(mut self, raw: &str) -> Result<Self> {
        self.notify_base_url = parse_url(raw)?;
        Ok(self)
    }

    /// Sets the pause before each simulated processing step.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Sets how long a toast stays on screen.
    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toast_ttl = ttl;
        self
    }

    /// Sets the upper bound on the confirmation request.
    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = Some(timeout);
        self
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| CheckoutError::ConfigError(format!("notify base URL {raw:?}: {e}")))
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| CheckoutError::ConfigError(format!("{key}={raw:?}: {e}")))
}
