//! Semantic validation of settings.

use crate::settings::Settings;
use rcg_common::schema::is_compatible;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a settings value.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors joined into one line.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }
}

pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_compatible(&settings.schema_version) {
        result.push(
            "schema_version",
            format!(
                "{} is not compatible with {}",
                settings.schema_version,
                crate::CONFIG_SCHEMA_VERSION
            ),
        );
    }

    let layout = &settings.layout;
    if layout.execution_dir_prefix.is_empty() {
        result.push("layout.execution_dir_prefix", "must not be empty");
    }
    if layout.parameter_file_suffix.is_empty() {
        result.push("layout.parameter_file_suffix", "must not be empty");
    }
    if layout.versions_info_file.is_empty() {
        result.push("layout.versions_info_file", "must not be empty");
    } else if layout.versions_info_file.contains(['/', '\\']) {
        result.push("layout.versions_info_file", "must be a bare file name");
    }

    if settings.summarizer.timeout_ms == 0 {
        result.push("summarizer.timeout_ms", "must be positive");
    }
    if settings.summarizer.max_output_bytes == 0 {
        result.push("summarizer.max_output_bytes", "must be positive");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_error() {
        let mut settings = Settings::default();
        settings.layout.execution_dir_prefix.clear();
        settings.layout.versions_info_file = "sub/versionsInfo.txt".into();
        settings.summarizer.max_output_bytes = 0;

        let result = validate_settings(&settings);
        assert_eq!(result.errors.len(), 3);
        assert!(result.summary().contains("bare file name"));
    }

    #[test]
    fn test_schema_major_mismatch() {
        let settings = Settings {
            schema_version: "0.3.0".into(),
            ..Settings::default()
        };
        let result = validate_settings(&settings);
        assert_eq!(result.errors[0].field, "schema_version");
    }
}
