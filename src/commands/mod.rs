//! Command handlers for the wallet CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod balance;
mod dashboard;
mod earnings;
mod init;
mod statement;
mod withdrawals;

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use tracing::{debug, info};

pub use balance::balance;
pub use dashboard::{dashboard, DashboardOut};
pub use earnings::earnings;
pub use init::init;
pub use statement::statement;
pub use withdrawals::{withdrawals, WithdrawalsOut};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// How tabular command output is rendered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A markdown table.
    #[default]
    Table,
    /// CSV with a header row.
    Csv,
    /// A JSON array of objects.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Table rows in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of objects where each row is a self-describing object with column names as keys.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Rows {
    /// Renders `rows` under `headers`. `cells` must produce one value per header.
    pub(crate) fn render<R, F>(
        format: OutputFormat,
        headers: &[&str],
        rows: &[R],
        cells: F,
    ) -> Result<Self>
    where
        R: Serialize,
        F: Fn(&R) -> Vec<String>,
    {
        Ok(match format {
            OutputFormat::Json => Rows::Json(
                serde_json::to_value(rows).context("Unable to serialize the rows to JSON")?,
            ),
            OutputFormat::Table => Rows::Table(markdown_table(headers, rows.iter().map(cells))),
            OutputFormat::Csv => Rows::Csv(csv_table(headers, rows.iter().map(cells))?),
        })
    }
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

fn markdown_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let escape = |s: &str| s.replace('|', "\\|");
    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!(
        "|{}\n",
        headers.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape(c.as_str())).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn csv_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("Unable to write the CSV header")?;
    for row in rows {
        writer
            .write_record(&row)
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .context("Unable to finish writing CSV")?;
    String::from_utf8(bytes).context("The CSV output was not UTF-8")
}
