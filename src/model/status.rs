//! Backend action codes for withdrawal requests and their user-facing labels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

const APPROVED_CODE: &str = "A";
const PENDING_CODE: &str = "P";
const REJECTED_CODE: &str = "R";

/// The one-letter `requestAction` code the backend attaches to a withdrawal request.
///
/// Codes other than `A`, `P` and `R` are kept verbatim in `Other` so that new backend states
/// survive a round trip instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestAction {
    Approved,
    Pending,
    Rejected,
    Other(String),
}

impl RequestAction {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            APPROVED_CODE => RequestAction::Approved,
            PENDING_CODE => RequestAction::Pending,
            REJECTED_CODE => RequestAction::Rejected,
            _ => RequestAction::Other(code.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            RequestAction::Approved => APPROVED_CODE,
            RequestAction::Pending => PENDING_CODE,
            RequestAction::Rejected => REJECTED_CODE,
            RequestAction::Other(code) => code,
        }
    }

    pub fn label(&self) -> StatusLabel {
        classify(self.code())
    }
}

impl Default for RequestAction {
    fn default() -> Self {
        RequestAction::Other(String::new())
    }
}

impl Display for RequestAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for RequestAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for RequestAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(RequestAction::from_code(&code))
    }
}

/// The user-facing state shown for a withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Success,
    Pending,
    Rejected,
    /// An unrecognized code, shown as-is.
    Other(String),
}

impl Display for StatusLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLabel::Success => f.write_str("Success"),
            StatusLabel::Pending => f.write_str("Pending"),
            StatusLabel::Rejected => f.write_str("Rejected"),
            StatusLabel::Other(code) => f.write_str(code),
        }
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Maps a backend action code to its label. Never fails: unknown codes come back unchanged.
pub fn classify(code: &str) -> StatusLabel {
    match code {
        APPROVED_CODE => StatusLabel::Success,
        PENDING_CODE => StatusLabel::Pending,
        REJECTED_CODE => StatusLabel::Rejected,
        other => StatusLabel::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(classify("A"), StatusLabel::Success);
        assert_eq!(classify("P"), StatusLabel::Pending);
        assert_eq!(classify("R"), StatusLabel::Rejected);
    }

    #[test]
    fn test_classify_passes_unknown_through() {
        assert_eq!(classify("X"), StatusLabel::Other("X".to_string()));
        assert_eq!(classify(""), StatusLabel::Other(String::new()));
        assert_eq!(classify("a").to_string(), "a");
        assert_eq!(classify("Hold").to_string(), "Hold");
    }

    #[test]
    fn test_label_display() {
        assert_eq!(classify("A").to_string(), "Success");
        assert_eq!(classify("P").to_string(), "Pending");
        assert_eq!(classify("R").to_string(), "Rejected");
    }

    #[test]
    fn test_request_action_round_trip() {
        for code in ["A", "P", "R", "Z"] {
            let action: RequestAction = serde_json::from_str(&format!("\"{code}\"")).unwrap();
            assert_eq!(action.code(), code);
            assert_eq!(serde_json::to_string(&action).unwrap(), format!("\"{code}\""));
        }
    }

    #[test]
    fn test_request_action_tolerates_padding_and_null() {
        assert_eq!(RequestAction::from_code(" A "), RequestAction::Approved);
        let action: RequestAction = serde_json::from_str("null").unwrap();
        assert_eq!(action, RequestAction::Other(String::new()));
    }

    #[test]
    fn test_request_action_label() {
        assert_eq!(RequestAction::Rejected.label(), StatusLabel::Rejected);
        assert_eq!(
            RequestAction::Other("Q".into()).label(),
            StatusLabel::Other("Q".into())
        );
    }
}
