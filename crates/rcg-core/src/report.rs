//! Report emission.
//!
//! The report is the only payload on stdout: a JSON array of
//! `{"contexts": [...], "parameters": {...} | null}`.

use std::io::Write;

use crate::analyze::Combined;
use crate::exit_codes::ExitCode;
use rcg_common::{ParameterSet, Result};

/// Output options for the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub pretty: bool,
}

/// Write `groups` as JSON, followed by a newline.
pub fn write_report(
    writer: &mut impl Write,
    groups: &[ParameterSet],
    options: ReportOptions,
) -> Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut *writer, groups)?;
    } else {
        serde_json::to_writer(&mut *writer, groups)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the combined result and return the matching exit code.
pub fn emit(writer: &mut impl Write, combined: &Combined, options: ReportOptions) -> Result<ExitCode> {
    write_report(writer, &combined.groups, options)?;
    Ok(ExitCode::for_outcome(combined.is_consistent()))
}
