//! Parser for Roddy's `.parameters` files.
//!
//! Roddy dumps the job environment as bash declarations:
//!
//! ```text
//! declare -x -i TARGETSIZE=74569526
//! declare -x    SAMBAMBA_MARKDUP_OPTS="-t 6 -l 9"
//! ```
//!
//! Everything else (shebangs, conditionals, blank lines) is skipped.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use rcg_common::{Error, Result};

/// Variable name to raw (unquoted, uninterpreted) value.
pub type RawParameters = BTreeMap<String, String>;

fn declare_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^declare(?:\s-\S)*\s+([^=]+)=(.+)").unwrap())
}

/// Parse one line into `(NAME, VALUE)`.
///
/// The value is kept verbatim, including surrounding quotes.
pub fn parse_parameter_line(line: &str) -> Option<(String, String)> {
    let captures = declare_pattern().captures(line.trim_end())?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// Parse all declarations from a reader. Later declarations of the same name
/// overwrite earlier ones.
pub fn parse_parameters(reader: impl BufRead) -> std::io::Result<RawParameters> {
    let mut result = RawParameters::new();
    for line in reader.lines() {
        if let Some((name, value)) = parse_parameter_line(&line?) {
            result.insert(name, value);
        }
    }
    Ok(result)
}

/// Parse a parameter file. Returns an empty map if nothing could be parsed.
pub fn parse_parameter_file(path: &Path) -> Result<RawParameters> {
    let to_error = |source| Error::ParameterFile {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_error)?;
    parse_parameters(BufReader::new(file)).map_err(to_error)
}
