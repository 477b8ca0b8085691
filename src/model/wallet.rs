use crate::model::amount::{self, Amount};
use serde::{Deserialize, Serialize};

/// The expert's wallet as reported by the backend. Only the withdrawable balance is used.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    #[serde(default, deserialize_with = "amount::lenient")]
    pub(crate) withdrawal_balance: Amount,
}

impl WalletBalance {
    pub fn new(withdrawal_balance: Amount) -> Self {
        Self { withdrawal_balance }
    }

    pub fn withdrawal_balance(&self) -> Amount {
        self.withdrawal_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_ignores_other_fields() {
        let json = r#"{"walletBalance": 9000, "withdrawalBalance": 4520.75, "userType": "RA"}"#;
        let wallet: WalletBalance = serde_json::from_str(json).unwrap();
        assert_eq!(
            wallet.withdrawal_balance().value(),
            Decimal::from_str("4520.75").unwrap()
        );
    }

    #[test]
    fn test_missing_balance_is_zero() {
        let wallet: WalletBalance = serde_json::from_str("{}").unwrap();
        assert!(wallet.withdrawal_balance().is_zero());
    }
}
