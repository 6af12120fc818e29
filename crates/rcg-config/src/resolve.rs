//! Settings resolution.
//!
//! Order: explicit `--config` path, then `$RODDY_GROUP_CONFIG`, then
//! `<config_dir>/roddy-group-configs/settings.json`, then built-in defaults.
//! An explicitly named file must exist; the per-user file is optional.

use crate::settings::{Settings, SettingsError};
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file.
pub const SETTINGS_ENV_VAR: &str = "RODDY_GROUP_CONFIG";

const APP_DIR: &str = "roddy-group-configs";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Where settings may come from.
#[derive(Debug, Clone, Default)]
pub struct SettingsPaths {
    /// Path given on the command line.
    pub explicit: Option<PathBuf>,
    /// Path taken from the environment.
    pub env: Option<PathBuf>,
    /// Per-user configuration directory.
    pub user_config_dir: Option<PathBuf>,
}

impl SettingsPaths {
    /// Collect candidate locations from the process environment.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env: std::env::var_os(SETTINGS_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            user_config_dir: dirs::config_dir().map(|d| d.join(APP_DIR)),
        }
    }

    fn user_file(&self) -> Option<PathBuf> {
        self.user_config_dir
            .as_deref()
            .map(|d| d.join(SETTINGS_FILE_NAME))
    }
}

/// Resolved settings and where they came from.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: Settings,
    /// `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
}

pub fn resolve_settings(paths: &SettingsPaths) -> Result<ResolvedSettings, SettingsError> {
    if let Some(path) = paths.explicit.as_deref().or(paths.env.as_deref()) {
        return load(path);
    }
    if let Some(path) = paths.user_file().filter(|p| p.is_file()) {
        return load(&path);
    }
    Ok(ResolvedSettings {
        settings: Settings::default(),
        source: None,
    })
}

fn load(path: &Path) -> Result<ResolvedSettings, SettingsError> {
    Ok(ResolvedSettings {
        settings: Settings::load_from_file(path)?,
        source: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SettingsPaths {
            explicit: None,
            env: None,
            user_config_dir: Some(dir.path().to_path_buf()),
        };
        let resolved = resolve_settings(&paths).unwrap();
        assert!(resolved.source.is_none());
        assert_eq!(resolved.settings, Settings::default());
    }

    #[test]
    fn test_explicit_wins_over_env_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.json");
        let env = dir.path().join("env.json");
        fs::write(&explicit, r#"{"layout": {"execution_dir_prefix": "run_"}}"#).unwrap();
        fs::write(&env, r#"{"layout": {"execution_dir_prefix": "env_"}}"#).unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            r#"{"layout": {"execution_dir_prefix": "user_"}}"#,
        )
        .unwrap();

        let paths = SettingsPaths {
            explicit: Some(explicit.clone()),
            env: Some(env.clone()),
            user_config_dir: Some(dir.path().to_path_buf()),
        };
        let resolved = resolve_settings(&paths).unwrap();
        assert_eq!(resolved.settings.layout.execution_dir_prefix, "run_");
        assert_eq!(resolved.source, Some(explicit));

        let paths = SettingsPaths {
            explicit: None,
            ..paths
        };
        let resolved = resolve_settings(&paths).unwrap();
        assert_eq!(resolved.settings.layout.execution_dir_prefix, "env_");
        assert_eq!(resolved.source, Some(env));
    }

    #[test]
    fn test_user_file_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            r#"{"summarizer": {"timeout_ms": 500}}"#,
        )
        .unwrap();
        let paths = SettingsPaths {
            explicit: None,
            env: None,
            user_config_dir: Some(dir.path().to_path_buf()),
        };
        let resolved = resolve_settings(&paths).unwrap();
        assert_eq!(resolved.settings.summarizer.timeout_ms, 500);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SettingsPaths {
            explicit: Some(dir.path().join("nope.json")),
            env: None,
            user_config_dir: None,
        };
        assert!(resolve_settings(&paths).is_err());
    }
}
