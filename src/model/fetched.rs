use serde::Serialize;
use std::fmt::Display;
use tracing::error;

/// The outcome of fetching one collection. A failed fetch is kept as a sentinel rather than
/// leaving the previous data in place, and every view reads it as "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fetched<T> {
    Loaded(T),
    Failed(String),
}

impl<T> Fetched<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fetched::Loaded(value) => Some(value),
            Fetched::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetched::Loaded(_) => None,
            Fetched::Failed(message) => Some(message),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }

    /// Converts `result`, reporting a failure to fetch `what` with `error!`.
    pub fn logged<E>(what: &str, result: Result<T, E>) -> Self
    where
        E: Display,
    {
        if let Err(e) = &result {
            error!("Error fetching {what}: {e:#}");
        }
        result.into()
    }
}

impl<T> Fetched<Vec<T>> {
    /// The loaded rows, or an empty slice for a failed fetch.
    pub fn rows(&self) -> &[T] {
        match self {
            Fetched::Loaded(rows) => rows,
            Fetched::Failed(_) => &[],
        }
    }
}

impl<T, E> From<Result<T, E>> for Fetched<T>
where
    E: Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Fetched::Loaded(value),
            Err(e) => Fetched::Failed(format!("{e:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_reads_as_empty() {
        let fetched: Fetched<Vec<u32>> = Fetched::Failed("timeout".into());
        assert!(fetched.rows().is_empty());
        assert!(fetched.loaded().is_none());
        assert_eq!(fetched.error(), Some("timeout"));
    }

    #[test]
    fn test_from_result() {
        let ok: Fetched<Vec<u32>> = Ok::<_, anyhow::Error>(vec![1, 2]).into();
        assert_eq!(ok.rows(), &[1, 2]);
        let err: Fetched<Vec<u32>> = Err::<Vec<u32>, _>(anyhow::anyhow!("boom")).into();
        assert!(err.is_failed());
        assert_eq!(err.error(), Some("boom"));
    }
}
