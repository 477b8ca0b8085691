//! Types that represent the data fetched for an expert's wallet, such as `TransactionRecord` and
//! `WithdrawalRequest`.
mod amount;
mod expert;
mod fetched;
mod status;
mod transaction;
mod wallet;
mod withdrawal;

pub use amount::{Amount, AmountError, AmountFormat};
pub use expert::ExpertId;
pub use fetched::Fetched;
pub use status::{classify, RequestAction, StatusLabel};
pub use transaction::{PlanType, TransactionRecord, NO_SUBSCRIPTION};
pub use wallet::WalletBalance;
pub use withdrawal::{PaymentMode, WithdrawalRequest, PENDING_STATUS};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string field that the backend may send as `null`, a number or a boolean. Scalars are
/// kept as their JSON text, so a mobile number sent as `9998887770` reads as `"9998887770"`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
    }

    fn text(value: Value) -> Result<String, serde_json::Error> {
        serde_json::from_value::<Row>(json!({ "text": value })).map(|r| r.text)
    }

    #[test]
    fn test_null_as_empty_reads_scalars() {
        assert_eq!(text(json!("abc")).unwrap(), "abc");
        assert_eq!(text(json!(null)).unwrap(), "");
        assert_eq!(text(json!(9998887771u64)).unwrap(), "9998887771");
        assert_eq!(text(json!(12.5)).unwrap(), "12.5");
        assert_eq!(text(json!(true)).unwrap(), "true");
    }

    #[test]
    fn test_null_as_empty_rejects_containers() {
        assert!(text(json!([1, 2])).is_err());
        assert!(text(json!({"a": 1})).is_err());
    }
}
