// Runner configuration for rucop
//
// The settings surface mirrors what a RuboCop editor integration exposes:
// interpreter manager toggles, a custom command override, the RuboCop config
// file, and annotation rendering hints for consumers.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::shell_split;
use crate::error::{ConfigError, Result, RucopError};
use crate::filesystem::{expand_tilde, is_executable};

const DEFAULT_RVM_AUTO_RUBY: &str = "~/.rvm/bin/rvm-auto-ruby";
const DEFAULT_RBENV: &str = "~/.rbenv/bin/rbenv";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Immutable runner configuration, resolved once per invocation.
///
/// At most one interpreter-manager prefix is active; `rubocop_command`, if
/// set and non-empty, overrides interpreter-manager resolution entirely.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Prefix the invocation with rvm-auto-ruby -S when available
    #[serde(default)]
    pub check_for_rvm: bool,

    /// Prefix the invocation with rbenv exec when available
    #[serde(default)]
    pub check_for_rbenv: bool,

    /// Custom RuboCop command; replaces the whole command including the
    /// `rubocop` token
    #[serde(default)]
    pub rubocop_command: Option<String>,

    /// Path to the rvm-auto-ruby wrapper
    #[serde(default = "default_rvm_path")]
    pub rvm_auto_ruby_path: PathBuf,

    /// Path to the rbenv executable
    #[serde(default = "default_rbenv_path")]
    pub rbenv_path: PathBuf,

    /// RuboCop configuration file, passed with `-c`
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Rewrite backslashes to forward slashes in target paths
    #[serde(default = "default_on_windows")]
    pub on_windows: bool,

    /// Working directory for the child process; defaults to the parent
    /// directory of the first target
    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    /// Whether consumers should render inline markers at all
    #[serde(default = "default_true")]
    pub mark_issues: bool,

    /// Gutter icon hint for editor consumers
    #[serde(default = "default_mark_icon")]
    pub mark_icon: String,

    /// Bounded wait for the child process before it is killed
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rvm_path() -> PathBuf {
    PathBuf::from(DEFAULT_RVM_AUTO_RUBY)
}

fn default_rbenv_path() -> PathBuf {
    PathBuf::from(DEFAULT_RBENV)
}

fn default_on_windows() -> bool {
    cfg!(windows)
}

fn default_true() -> bool {
    true
}

fn default_mark_icon() -> String {
    "arrow_right".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            check_for_rvm: false,
            check_for_rbenv: false,
            rubocop_command: None,
            rvm_auto_ruby_path: default_rvm_path(),
            rbenv_path: default_rbenv_path(),
            config_file: None,
            on_windows: default_on_windows(),
            working_directory: None,
            mark_issues: true,
            mark_icon: default_mark_icon(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RunnerConfig {
    /// Load and validate a settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|_| {
            RucopError::from(ConfigError::NotFound {
                path: path.to_path_buf(),
                suggestion: Some(
                    "create a .rucop.yaml settings file or pass --settings".to_string(),
                ),
            })
        })?;
        Self::from_yaml(&contents, Some(path))
    }

    /// Parse settings from a YAML string and validate them.
    pub fn from_yaml(contents: &str, source: Option<&Path>) -> Result<Self> {
        let config: RunnerConfig = serde_yaml::from_str(contents).map_err(|e| {
            RucopError::from(ConfigError::InvalidYaml {
                message: e.to_string(),
                file_path: source.map(Path::to_path_buf),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, resolving what can be checked up front.
    ///
    /// A custom command whose first token cannot be resolved to an executable
    /// and a RuboCop config file that does not exist are both reported here
    /// rather than as a confusing spawn failure later.
    pub fn validate(&self) -> Result<()> {
        if let Some(command) = self.custom_command() {
            let tokens = shell_split(command);
            match tokens.first() {
                Some(first) => {
                    let candidate = Path::new(first);
                    let resolvable = if candidate.components().count() > 1 {
                        is_executable(&expand_tilde(candidate))
                    } else {
                        which::which(first).is_ok()
                    };
                    if !resolvable {
                        return Err(ConfigError::CommandNotExecutable {
                            command: command.to_string(),
                            resolved_path: None,
                        }
                        .into());
                    }
                }
                None => {
                    return Err(ConfigError::InvalidValue {
                        message: "custom command contains no tokens".to_string(),
                        field: "rubocop_command".to_string(),
                        value: command.to_string(),
                    }
                    .into());
                }
            }
        }

        if let Some(ref config_file) = self.config_file {
            if !config_file.is_file() {
                return Err(ConfigError::LintConfigNotFound {
                    path: config_file.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// The custom command, treating an empty string the same as unset.
    pub fn custom_command(&self) -> Option<&str> {
        match self.rubocop_command.as_deref() {
            Some("") | None => None,
            Some(cmd) => Some(cmd),
        }
    }

    /// The rvm wrapper path with `~` expanded.
    pub fn rvm_path(&self) -> PathBuf {
        expand_tilde(&self.rvm_auto_ruby_path)
    }

    /// The rbenv path with `~` expanded.
    pub fn rbenv_path(&self) -> PathBuf {
        expand_tilde(&self.rbenv_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert!(!config.check_for_rvm);
        assert!(!config.check_for_rbenv);
        assert!(config.rubocop_command.is_none());
        assert_eq!(config.on_windows, cfg!(windows));
        assert!(config.mark_issues);
        assert_eq!(config.mark_icon, "arrow_right");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_empty_custom_command_is_unset() {
        let mut config = RunnerConfig::default();
        config.rubocop_command = Some(String::new());
        assert!(config.custom_command().is_none());

        config.rubocop_command = Some("bundle exec rubocop".to_string());
        assert_eq!(config.custom_command(), Some("bundle exec rubocop"));
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = RunnerConfig::from_yaml("check_for_rvm: true\n", None).unwrap();
        assert!(config.check_for_rvm);
        assert!(!config.check_for_rbenv);
        assert_eq!(
            config.rvm_auto_ruby_path,
            PathBuf::from("~/.rvm/bin/rvm-auto-ruby")
        );
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = RunnerConfig::from_yaml("check_for_rvm: [not a bool\n", None).unwrap_err();
        assert!(err.to_string().contains("Invalid YAML"));
    }

    #[test]
    fn test_from_yaml_unknown_field_rejected() {
        let err = RunnerConfig::from_yaml("use_rvm: true\n", None).unwrap_err();
        assert!(err.to_string().contains("Invalid YAML"));
    }

    #[test]
    fn test_validate_missing_lint_config() {
        let mut config = RunnerConfig::default();
        config.config_file = Some(PathBuf::from("/nonexistent/.rubocop.yml"));
        let err = config.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("RuboCop configuration file not found"));
    }

    #[test]
    fn test_validate_unresolvable_custom_command() {
        let mut config = RunnerConfig::default();
        config.rubocop_command = Some("this_command_does_not_exist_12345".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_custom_command_resolved_via_path() {
        let mut config = RunnerConfig::default();
        config.rubocop_command = Some("echo --format emacs".to_string());
        assert!(config.validate().is_ok());
    }
}
