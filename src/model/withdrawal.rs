use crate::model::amount::{self, Amount};
use crate::model::null_as_empty;
use crate::model::status::{RequestAction, StatusLabel};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// The secondary `status` text that, when present, makes a request row show its raw action code
/// instead of a classified, clickable label.
pub const PENDING_STATUS: &str = "Pending";

/// Represents a single payout request made by an expert.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Spelled the way the backend spells it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) transcation_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) withdrawal_request_date: String,
    #[serde(default)]
    pub(crate) payment_mode: PaymentMode,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) account_number: String,
    #[serde(default, rename = "upI_ID", deserialize_with = "null_as_empty")]
    pub(crate) upi_id: String,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub(crate) amount: Amount,
    #[serde(default)]
    pub(crate) request_action: RequestAction,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) status: String,
}

impl WithdrawalRequest {
    pub fn transaction_id(&self) -> &str {
        &self.transcation_id
    }

    pub fn request_date(&self) -> &str {
        &self.withdrawal_request_date
    }

    pub fn payment_mode(&self) -> &PaymentMode {
        &self.payment_mode
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn request_action(&self) -> &RequestAction {
        &self.request_action
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Where the money goes: the account number for bank transfers, otherwise the UPI id.
    pub fn destination(&self) -> &str {
        match self.payment_mode {
            PaymentMode::Bank => &self.account_number,
            _ => &self.upi_id,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.request_action == RequestAction::Approved
    }

    pub fn label(&self) -> StatusLabel {
        self.request_action.label()
    }

    /// The text for the status column of the request table. While the backend still reports
    /// `status == "Pending"` the raw action code is shown, otherwise the classified label.
    pub fn status_text(&self) -> String {
        if self.status == PENDING_STATUS {
            self.request_action.code().to_string()
        } else {
            self.label().to_string()
        }
    }

    /// Whether the status column is actionable, i.e. can be selected to open its detail view.
    pub fn is_selectable(&self) -> bool {
        self.status != PENDING_STATUS
    }
}

/// How a withdrawal is paid out.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMode {
    #[default]
    Bank,
    Upi,
    Other(String),
}

const BANK: &str = "Bank";
const UPI: &str = "UPI";

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMode::Bank => BANK,
            PaymentMode::Upi => UPI,
            PaymentMode::Other(s) => s,
        }
    }
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match s.as_str() {
            BANK => PaymentMode::Bank,
            UPI => PaymentMode::Upi,
            _ => PaymentMode::Other(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> WithdrawalRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_bank_request() {
        let request = parse(
            r#"{
                "transcationId": "WD-1",
                "withdrawalRequestDate": "2024-05-02T09:00:00",
                "paymentMode": "Bank",
                "accountNumber": "001234567890",
                "upI_ID": null,
                "amount": 2500,
                "requestAction": "A",
                "status": "Approved"
            }"#,
        );
        assert_eq!(request.transaction_id(), "WD-1");
        assert_eq!(request.payment_mode(), &PaymentMode::Bank);
        assert_eq!(request.destination(), "001234567890");
        assert!(request.is_settled());
        assert_eq!(request.label(), StatusLabel::Success);
    }

    #[test]
    fn test_upi_destination() {
        let request = parse(
            r#"{"paymentMode": "UPI", "accountNumber": "ignored", "upI_ID": "expert@okbank", "requestAction": "R"}"#,
        );
        assert_eq!(request.destination(), "expert@okbank");
        assert!(!request.is_settled());
    }

    #[test]
    fn test_unknown_payment_mode_is_kept() {
        let request = parse(r#"{"paymentMode": "Wallet", "upI_ID": "w-1"}"#);
        assert_eq!(request.payment_mode(), &PaymentMode::Other("Wallet".into()));
        assert_eq!(request.destination(), "w-1");
        assert_eq!(serde_json::to_value(&request).unwrap()["paymentMode"], "Wallet");
    }

    #[test]
    fn test_status_text_pending_shows_raw_code() {
        let pending = parse(r#"{"requestAction": "P", "status": "Pending"}"#);
        assert_eq!(pending.status_text(), "P");
        assert!(!pending.is_selectable());

        let rejected = parse(r#"{"requestAction": "R", "status": "Rejected"}"#);
        assert_eq!(rejected.status_text(), "Rejected");
        assert!(rejected.is_selectable());

        let odd = parse(r#"{"requestAction": "H", "status": "On hold"}"#);
        assert_eq!(odd.status_text(), "H");
    }
}
