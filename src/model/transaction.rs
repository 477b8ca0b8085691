use crate::model::amount::{self, Amount};
use crate::model::null_as_empty;
use serde::{Deserialize, Serialize};

/// The `subscription` label the backend uses for ledger rows that are not paid subscription
/// events. The misspelling is what the backend sends and must be matched exactly.
pub const NO_SUBSCRIPTION: &str = "No Subscrption";

/// Represents a single row of revenue history for an expert.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) transaction_id: String,
    /// The event time. The subscription listing calls this `createdOn`.
    #[serde(default, alias = "createdOn", deserialize_with = "null_as_empty")]
    pub(crate) date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) subscription: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) plan_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) user_mobile_no: String,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub(crate) amount: Amount,
}

impl TransactionRecord {
    pub fn new(
        transaction_id: impl Into<String>,
        date: impl Into<String>,
        subscription: impl Into<String>,
        plan_type: impl Into<String>,
        user_mobile_no: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            date: date.into(),
            subscription: subscription.into(),
            plan_type: plan_type.into(),
            user_mobile_no: user_mobile_no.into(),
            amount,
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    /// The raw plan label, possibly empty.
    pub fn plan_type(&self) -> &str {
        &self.plan_type
    }

    /// The plan label as a known `PlanType`, if it is one.
    pub fn plan(&self) -> Option<PlanType> {
        self.plan_type.trim().parse().ok()
    }

    pub fn user_mobile_no(&self) -> &str {
        &self.user_mobile_no
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// False for the non-revenue rows marked with `NO_SUBSCRIPTION`.
    pub fn is_subscription(&self) -> bool {
        self.subscription.trim() != NO_SUBSCRIPTION
    }
}

/// The billing period of a subscription plan.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum PlanType {
    Monthly,
    Quarterly,
    #[serde(rename = "Half-Yearly")]
    HalfYearly,
    Yearly,
}

serde_plain::derive_display_from_serialize!(PlanType);
serde_plain::derive_fromstr_from_deserialize!(PlanType);
