use std::path::PathBuf;
use thiserror::Error;

/// Why a completion could not be turned into a content record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    /// No `{` ... `}` span in the completion text
    NoJsonObject,
    /// The span was found but is not valid JSON
    Malformed,
}

impl std::fmt::Display for ParseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseReason::NoJsonObject => write!(f, "no JSON object found"),
            ParseReason::Malformed => write!(f, "malformed JSON"),
        }
    }
}

/// Every way a run can fail. None of them are retried.
///
/// `Fetch` and `Generation` flatten their cause into the message and expose no
/// source, so a report walking the chain prints each cause once.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to fetch news: {0:#}")]
    Fetch(anyhow::Error),

    #[error("Content generation failed: {0:#}")]
    Generation(anyhow::Error),

    #[error("Failed to parse model response ({reason}){}", detail_suffix(.detail))]
    Parse {
        reason: ParseReason,
        detail: Option<String>,
        raw: String,
    },

    #[error("Failed to write {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Raw completion text for parse failures
    pub fn raw_completion(&self) -> Option<&str> {
        match self {
            PipelineError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, PipelineError>;
