//! Parser for `versionsInfo.txt`.
//!
//! ```text
//! Roddy version: 3.5.9
//! Library info:
//! Loaded plugin AlignmentAndQCWorkflows:1.2.51-1 from ((/path/to/plugin))
//! ```
//!
//! The first line is mandatory. The second line is a label and is dropped.
//! Plugin lines that don't parse are logged and skipped.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::error;

/// Component name ("Roddy" or a plugin name) to version string.
pub type Versions = BTreeMap<String, String>;

/// Key under which the Roddy version itself is stored.
pub const RODDY_COMPONENT: &str = "Roddy";

/// Errors from reading version info.
#[derive(Debug, Error)]
pub enum VersionInfoError {
    #[error("couldn't parse Roddy version from '{0}'")]
    Header(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^Roddy version: (\d+\.\d+\.\d+|develop)").unwrap())
}

fn plugin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^Loaded plugin (\S+):(\S+)\sfrom.+").unwrap())
}

/// Read a version record.
pub fn read_version_info(reader: impl BufRead) -> Result<Versions, VersionInfoError> {
    let mut lines = reader.lines();
    let mut result = Versions::new();

    let first_line = lines.next().transpose()?.unwrap_or_default();
    let first_line = first_line.trim_end();
    let captures = header_pattern()
        .captures(first_line)
        .ok_or_else(|| VersionInfoError::Header(first_line.to_string()))?;
    result.insert(RODDY_COMPONENT.to_string(), captures[1].to_string());

    // "Library info:"
    lines.next().transpose()?;

    for line in lines {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        match plugin_pattern().captures(line) {
            Some(captures) => {
                result.insert(captures[1].to_string(), captures[2].to_string());
            }
            None => error!(plugin_line = line, "could not match plugin"),
        }
    }
    Ok(result)
}

/// Read the version record of a run directory.
pub fn read_version_info_file(path: &Path) -> rcg_common::Result<Versions> {
    let unreadable = |source| rcg_common::Error::VersionInfoUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    read_version_info(BufReader::new(file)).map_err(|err| match err {
        VersionInfoError::Header(line) => rcg_common::Error::VersionHeader {
            path: path.to_path_buf(),
            line,
        },
        VersionInfoError::Io(source) => unreadable(source),
    })
}
