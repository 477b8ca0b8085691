use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifies the expert (stakeholder) whose wallet is being viewed. Every fetch is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpertId(String);

impl ExpertId {
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into().trim().to_string();
        ensure!(!id.is_empty(), "An expert id cannot be empty");
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpertId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExpertId {
    type Error = anyhow::Error;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        ExpertId::new(id)
    }
}

impl From<ExpertId> for String {
    fn from(id: ExpertId) -> Self {
        id.0
    }
}

impl FromStr for ExpertId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpertId::new(s)
    }
}
