//! Readers for the records Roddy leaves in a run directory.
//!
//! - `parameters`: `declare`-style job parameter dumps (`*.parameters`)
//! - `versions`: the `versionsInfo.txt` component/version record

pub mod parameters;
pub mod versions;

pub use parameters::{parse_parameter_file, parse_parameter_line, parse_parameters, RawParameters};
pub use versions::{read_version_info, read_version_info_file, VersionInfoError, Versions};
