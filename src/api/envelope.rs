use crate::Result;
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// The wrapper every backend endpoint puts around its payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse<T> {
    #[serde(default = "default_success")]
    is_success: bool,
    data: Option<T>,
    #[serde(default)]
    display_message: Option<String>,
    #[serde(default)]
    error_messages: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Returns the payload, or an error built from `displayMessage` when the backend reports
    /// failure or sends no data.
    pub(crate) fn into_data(self, what: &str) -> Result<T> {
        self.check(what)?;
        self.data
            .with_context(|| format!("The {what} response contained no data"))
    }

    fn check(&self, what: &str) -> Result<()> {
        if !self.is_success {
            let message = self
                .display_message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or("no message given");
            match &self.error_messages {
                Some(details) if !details.is_null() => {
                    bail!("The backend failed to return {what}: {message} ({details})")
                }
                _ => bail!("The backend failed to return {what}: {message}"),
            }
        }
        Ok(())
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Like `into_data`, except that a missing or `null` list is an empty list.
    pub(crate) fn into_rows(self, what: &str) -> Result<Vec<T>> {
        self.check(what)?;
        Ok(self.data.unwrap_or_default())
    }
}

impl ApiResponse<Vec<Value>> {
    /// Converts each row of the list on its own. A row that does not fit `T` is logged and left
    /// out, the rest of the batch is kept.
    pub(crate) fn into_records<T>(self, what: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let rows = self.into_rows(what)?;
        let total = rows.len();
        let records: Vec<T> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(ix, row)| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Skipping row {ix} of the {what}: {e}");
                    None
                }
            })
            .collect();
        if records.len() < total {
            debug!("Kept {} of {total} row(s) of the {what}", records.len());
        }
        Ok(records)
    }
}
