//! Roddy config grouping core.
//!
//! Reads the parameter dumps and version records Roddy leaves in
//! roddyExecutionStore directories, summarizes them and groups identical
//! configurations at three levels: parameter files within a run, runs within
//! a store, stores within an invocation.
//!
//! - [`collect`]: parsers for `.parameters` files and `versionsInfo.txt`
//! - [`store`]: discovery of stores and run directories
//! - [`summarize`]: the summarizer seam
//! - [`group`]: the grouping engine
//! - [`analyze`]: bottom-up orchestration
//! - [`report`]: JSON report and exit codes

pub mod analyze;
pub mod cli;
pub mod collect;
pub mod exit_codes;
pub mod group;
pub mod logging;
pub mod report;
pub mod store;
pub mod summarize;

pub use analyze::{analyze_stores, combine_stores, Analyzer, Combined};
pub use exit_codes::ExitCode;
pub use group::group_parameter_sets;
pub use store::{ExecutionStore, RoddyStore};
pub use summarize::{CommandSummarizer, FnSummarizer, RawSummarizer, Summarizer};
