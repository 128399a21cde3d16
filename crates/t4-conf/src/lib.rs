//! User and project settings.
//!
//! Sources, lowest priority first:
//! 1. `t4.toml` in the user config directory
//! 2. `.t4.toml` in the project root
//! 3. `t4.toml` in the project root

mod diagnostics;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;

pub use crate::diagnostics::DiagnosticSeverity;
pub use crate::diagnostics::DiagnosticsConfig;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub diagnostics: DiagnosticsConfig,
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        Self::load_from_paths(project_root, user_config_file().as_deref())
    }

    pub fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let project_files = [project_root.join(".t4.toml"), project_root.join("t4.toml")];
        let paths = user_config_path
            .into_iter()
            .chain(project_files.iter().map(Utf8PathBuf::as_path));
        for path in paths {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        tracing::trace!(%project_root, ?settings, "loaded settings");
        Ok(settings)
    }
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "t4")?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join("t4.toml")).ok()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn utf8(path: &std::path::Path) -> &Utf8Path {
        Utf8Path::from_path(path).unwrap()
    }

    const HINT_S101: &str = "[diagnostics.severity]\nS101 = \"hint\"\n";
    const OFF_S101: &str = "[diagnostics.severity]\nS101 = \"off\"\n";

    fn s101(settings: &Settings) -> DiagnosticSeverity {
        settings.diagnostics.get_severity("S101")
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_load_no_files() {
            let dir = tempdir().unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(settings, Settings::default());
            assert_eq!(
                settings.diagnostics.get_severity("T100"),
                DiagnosticSeverity::Error
            );
        }

        #[test]
        fn test_missing_user_config_is_ignored() {
            let dir = tempdir().unwrap();
            let missing = dir.path().join("nope/t4.toml");
            let settings =
                Settings::load_from_paths(utf8(dir.path()), Some(utf8(&missing))).unwrap();
            assert_eq!(settings, Settings::default());
        }
    }

    mod project_files {
        use super::*;

        #[test]
        fn test_load_t4_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("t4.toml"), HINT_S101).unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(s101(&settings), DiagnosticSeverity::Hint);
        }

        #[test]
        fn test_load_dot_t4_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".t4.toml"), HINT_S101).unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(s101(&settings), DiagnosticSeverity::Hint);
        }

        #[test]
        fn test_load_diagnostic_severities() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("t4.toml"),
                "[diagnostics.severity]\nS = \"warning\"\nS101 = \"off\"\n",
            )
            .unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(
                settings.diagnostics.get_severity("S100"),
                DiagnosticSeverity::Warning
            );
            assert!(!settings.diagnostics.is_enabled("S101"));
        }

        #[test]
        fn test_severity_keys_are_upper_cased() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("t4.toml"),
                "[diagnostics.severity]\ns101 = \"warning\"\n",
            )
            .unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(
                settings.diagnostics.severity.get("S101"),
                Some(&DiagnosticSeverity::Warning)
            );
        }

        #[test]
        fn test_invalid_severity_is_an_error() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("t4.toml"),
                "[diagnostics.severity]\nT100 = \"loud\"\n",
            )
            .unwrap();
            let result = Settings::load_from_paths(utf8(dir.path()), None);
            assert!(matches!(result, Err(ConfigError::Config(_))));
        }
    }

    mod priority {
        use super::*;

        #[test]
        fn test_t4_toml_overrides_dot_t4_toml() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".t4.toml"), OFF_S101).unwrap();
            fs::write(dir.path().join("t4.toml"), HINT_S101).unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(s101(&settings), DiagnosticSeverity::Hint);
        }

        #[test]
        fn test_project_overrides_user() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_config = user_dir.path().join("t4.toml");
            fs::write(&user_config, HINT_S101).unwrap();
            fs::write(project_dir.path().join(".t4.toml"), OFF_S101).unwrap();

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_config)))
                    .unwrap();
            assert_eq!(s101(&settings), DiagnosticSeverity::Off);
        }

        #[test]
        fn test_severity_tables_merge_across_files() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_config = user_dir.path().join("t4.toml");
            fs::write(&user_config, "[diagnostics.severity]\nS101 = \"hint\"\n").unwrap();
            fs::write(
                project_dir.path().join("t4.toml"),
                "[diagnostics.severity]\nT102 = \"off\"\n",
            )
            .unwrap();

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_config)))
                    .unwrap();
            assert_eq!(
                settings.diagnostics.get_severity("S101"),
                DiagnosticSeverity::Hint
            );
            assert_eq!(
                settings.diagnostics.get_severity("T102"),
                DiagnosticSeverity::Off
            );
        }
    }

    mod user_config {
        use super::*;

        #[test]
        fn test_load_user_config_only() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_config = user_dir.path().join("t4.toml");
            fs::write(&user_config, HINT_S101).unwrap();

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_config)))
                    .unwrap();
            assert_eq!(s101(&settings), DiagnosticSeverity::Hint);
        }
    }
}
