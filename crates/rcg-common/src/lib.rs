//! Roddy config grouping common types and errors.
//!
//! This crate provides the types shared by the config and core crates:
//! - The canonical nested configuration value used for structural equality
//! - Context-addressed parameter sets
//! - Schema versioning for settings files
//! - The unified error type

pub mod error;
pub mod parameter_set;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use parameter_set::ParameterSet;
pub use schema::SCHEMA_VERSION;
pub use value::{ConfigMap, ConfigValue};
