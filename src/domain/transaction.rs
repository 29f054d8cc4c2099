use super::context::PaymentContext;
use super::form::FormData;
use crate::error::CheckoutError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

pub const TRANSACTION_ID_PREFIX: &str = "DEMO-";

/// The landing page's fixed charge.
pub const DEFAULT_AMOUNT: Amount = Amount(dec!(15000));

/// A positive charge in Colombian pesos.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, CheckoutError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CheckoutError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount the way the pay button shows it, e.g. `$15.000 COP`.
    pub fn display_cop(&self) -> String {
        let whole = self.0.trunc().to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }
        format!("${grouped} COP")
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Amount {
    // Whole amounts go out as JSON integers; the receiving bot compares against `15000`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{TRANSACTION_ID_PREFIX}{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part after the `DEMO-` prefix.
    pub fn millis(&self) -> Option<i64> {
        self.0.strip_prefix(TRANSACTION_ID_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues timestamp-derived ids that strictly increase.
///
/// Two submissions within the same millisecond (or a clock that steps back) still
/// get distinct ids: the next id is never below the previous one plus one.
#[derive(Debug, Default)]
pub struct TransactionIdGenerator {
    last: AtomicI64,
}

impl TransactionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> TransactionId {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        TransactionId::from_millis(candidate.max(previous.saturating_add(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
}

/// The fabricated result of one simulated payment.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub status: PaymentStatus,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

/// Body POSTed to the confirmation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    pub phone_number: String,
    pub payment_status: PaymentStatus,
    pub transaction_id: TransactionId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub user_data: FormData,
}

impl PaymentNotification {
    pub fn new(
        context: &PaymentContext,
        record: &TransactionRecord,
        user_data: FormData,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            phone_number: context.phone_number.clone(),
            payment_status: record.status,
            transaction_id: record.transaction_id.clone(),
            amount: record.amount,
            timestamp: sent_at,
            user_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_must_be_positive() {
        assert!(Amount::new(dec!(15000)).is_ok());
        assert!(Amount::new(dec!(0)).is_err());
        assert!(Amount::try_from(dec!(-1)).is_err());
    }

    #[test]
    fn test_amount_display_groups_thousands() {
        assert_eq!(Amount::new(dec!(15000)).unwrap().display_cop(), "$15.000 COP");
        assert_eq!(Amount::new(dec!(950)).unwrap().display_cop(), "$950 COP");
        assert_eq!(
            Amount::new(dec!(1250000.75)).unwrap().display_cop(),
            "$1.250.000 COP"
        );
    }

    #[test]
    fn test_whole_amount_serializes_as_integer() {
        let json = serde_json::to_value(Amount::new(dec!(15000)).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(15000));
    }

    #[test]
    fn test_id_generator_is_strictly_increasing() {
        let generator = TransactionIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let first = generator.next(now);
        let second = generator.next(now);
        let earlier = generator.next(now - chrono::Duration::seconds(5));

        assert_eq!(first.as_str(), "DEMO-1700000000000");
        assert_eq!(second.millis(), Some(1_700_000_000_001));
        assert_eq!(earlier.millis(), Some(1_700_000_000_002));
    }

    #[test]
    fn test_id_generator_follows_clock() {
        let generator = TransactionIdGenerator::new();
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        generator.next(t0);
        let later = generator.next(t0 + chrono::Duration::seconds(1));
        assert_eq!(later.millis(), Some(1_700_000_001_000));
    }

    #[test]
    fn test_notification_payload_shape() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let context = PaymentContext::new("573001234567", "Ana", at);
        let record = TransactionRecord {
            transaction_id: TransactionId::from_millis(1_700_000_000_000),
            status: PaymentStatus::Success,
            amount: Amount::new(dec!(15000)).unwrap(),
            timestamp: at,
        };
        let mut form = FormData::new();
        form.insert("document", "1020304050");

        let json = serde_json::to_value(PaymentNotification::new(&context, &record, form, at)).unwrap();

        assert_eq!(json["phoneNumber"], "573001234567");
        assert_eq!(json["paymentStatus"], "success");
        assert_eq!(json["transactionId"], "DEMO-1700000000000");
        assert_eq!(json["amount"], 15000);
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
        assert_eq!(json["userData"]["document"], "1020304050");
    }
}
