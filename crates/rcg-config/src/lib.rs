//! Roddy config grouping settings.
//!
//! This crate provides:
//! - Typed structs for the settings file (store layout, summarizer limits)
//! - Settings resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_settings, ResolvedSettings, SettingsPaths, SETTINGS_ENV_VAR};
pub use settings::{Settings, SettingsError, StoreLayout, SummarizerSettings};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for settings files.
pub const CONFIG_SCHEMA_VERSION: &str = rcg_common::SCHEMA_VERSION;
