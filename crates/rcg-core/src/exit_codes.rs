//! Exit codes for the group-configs CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.

use rcg_common::Error;

/// Exit codes for group-configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All stores share one configuration
    Consistent = 0,

    /// Missing or invalid command-line arguments
    UsageError = 1,

    /// Several configurations remain after grouping
    Inconsistent = 2,

    /// Settings file missing or invalid
    ConfigError = 10,

    /// Version info unreadable or malformed
    VersionInfoError = 11,

    /// Summarizer missing or failed
    SummarizerError = 12,

    /// I/O error on stores or parameter files
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Exit code for a grouping outcome.
    pub fn for_outcome(consistent: bool) -> Self {
        if consistent {
            ExitCode::Consistent
        } else {
            ExitCode::Inconsistent
        }
    }

    /// Exit code for a fatal error.
    pub fn for_error(error: &Error) -> Self {
        match error.code() {
            10..=19 => ExitCode::ConfigError,
            20..=29 => ExitCode::VersionInfoError,
            30..=39 | 60..=69 => ExitCode::IoError,
            40..=49 => ExitCode::SummarizerError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
