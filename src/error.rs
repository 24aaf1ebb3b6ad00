use std::io;

use thiserror::Error;

/// Failure kinds recognised by the top-level handler in `main`.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The dataset could not be obtained at all.
    #[error("dataset unavailable at {location}")]
    DataUnavailable {
        location: String,
        #[source]
        source: io::Error,
    },

    /// Anything else that went wrong while analysing or rendering.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ReportError {
    /// The fixed line printed to stdout for this failure.
    pub fn console_message(&self) -> String {
        match self {
            ReportError::DataUnavailable { .. } => {
                "Error: Dataset could not be loaded. Please check the data source.".to_string()
            }
            ReportError::Unexpected(e) => format!("An unexpected error occurred: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_unavailable_message_is_fixed() {
        let err = ReportError::DataUnavailable {
            location: "/nowhere/iris.csv".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.console_message(),
            "Error: Dataset could not be loaded. Please check the data source."
        );
    }

    #[test]
    fn unexpected_message_carries_the_context_chain() {
        let inner = anyhow::anyhow!("disk full").context("writing iris_bar_chart.png");
        let err = ReportError::from(inner);
        assert_eq!(
            err.console_message(),
            "An unexpected error occurred: writing iris_bar_chart.png: disk full"
        );
    }
}
