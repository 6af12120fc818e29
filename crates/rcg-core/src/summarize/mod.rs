//! Summarizers: condense raw versions and parameters into a configuration.
//!
//! A summarizer decides which parts of a job's environment matter. Its output
//! is grouped by structural equality, so it must be deterministic (no
//! timestamps, no hash-ordered lists).
//!
//! # Implementations
//!
//! - [`CommandSummarizer`]: an external executable speaking JSON on
//!   stdin/stdout. No dynamic loading; the command is the plugin boundary.
//! - [`RawSummarizer`]: built-in, keeps everything. Selected with
//!   [`RAW_SUMMARIZER_NAME`].
//! - [`FnSummarizer`]: wraps a closure, for library users and tests.

pub mod command;
pub mod raw;

use std::path::Path;
use thiserror::Error;

use crate::collect::{RawParameters, Versions};
use rcg_common::ConfigMap;
use rcg_config::SummarizerSettings;

pub use command::{CommandSummarizer, SummarizerInput};
pub use raw::{FnSummarizer, RawSummarizer, RAW_SUMMARIZER_NAME};

/// Errors from a summarizer invocation.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarizer {summarizer} returned invalid JSON: {source}")]
    InvalidOutput {
        summarizer: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("summarizer {summarizer} returned a JSON value that is not an object")]
    NotAnObject { summarizer: String },

    #[error("summarizer {summarizer} failed: {message}")]
    ExecutionFailed { summarizer: String, message: String },

    #[error("summarizer {summarizer} timed out after {timeout_ms}ms")]
    Timeout { summarizer: String, timeout_ms: u64 },

    #[error("summarizer {summarizer} wrote more than {limit} bytes")]
    OutputTooLarge { summarizer: String, limit: usize },
}

impl SummarizeError {
    fn summarizer(&self) -> &str {
        match self {
            SummarizeError::InvalidOutput { summarizer, .. }
            | SummarizeError::NotAnObject { summarizer }
            | SummarizeError::ExecutionFailed { summarizer, .. }
            | SummarizeError::Timeout { summarizer, .. }
            | SummarizeError::OutputTooLarge { summarizer, .. } => summarizer,
        }
    }
}

impl From<SummarizeError> for rcg_common::Error {
    fn from(err: SummarizeError) -> Self {
        rcg_common::Error::Summarizer {
            name: err.summarizer().to_string(),
            message: err.to_string(),
        }
    }
}

/// Maps a run's versions and one job's raw parameters to a configuration.
pub trait Summarizer {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn summarize(
        &self,
        versions: &Versions,
        parameters: &RawParameters,
    ) -> Result<ConfigMap, SummarizeError>;
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn summarize(
        &self,
        versions: &Versions,
        parameters: &RawParameters,
    ) -> Result<ConfigMap, SummarizeError> {
        (**self).summarize(versions, parameters)
    }
}

/// Select a summarizer from its command-line name.
///
/// [`RAW_SUMMARIZER_NAME`] selects the built-in raw summarizer; anything else
/// is taken as the path of an executable.
pub fn load_summarizer(
    selector: &str,
    settings: &SummarizerSettings,
) -> rcg_common::Result<Box<dyn Summarizer>> {
    if selector == RAW_SUMMARIZER_NAME {
        return Ok(Box::new(RawSummarizer));
    }
    Ok(Box::new(CommandSummarizer::new(Path::new(selector), settings)?))
}
