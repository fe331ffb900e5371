// Command construction for RuboCop invocations
//
// Commands are always represented as an argument vector, never a joined
// shell string, so no shell-quoting rules apply at spawn time.
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::filesystem::is_executable;

pub const RUBOCOP: &str = "rubocop";

/// Split a command string into tokens: whitespace separated, with
/// double-quoted substrings preserved as single tokens.
pub fn shell_split(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

/// A fully resolved RuboCop invocation: ordered argv tokens plus the
/// working directory. Built fresh per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    argv: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandInvocation {
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// The program token handed to the operating system.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Single-line form for log and error messages.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Builds a `CommandInvocation` from a `RunnerConfig`, free-form option
/// tokens, and target paths.
pub struct CommandBuilder<'a> {
    config: &'a RunnerConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a RunnerConfig) -> Self {
        Self { config }
    }

    /// Assemble the full argument vector.
    ///
    /// A custom command replaces the entire command tokens, including the
    /// `rubocop` token; otherwise an interpreter-manager prefix is applied
    /// when enabled and its executable exists. An unresolvable prefix yields
    /// bare `rubocop`, deferring the failure to spawn time.
    pub fn build(&self, options: &[String], targets: &[PathBuf]) -> CommandInvocation {
        let mut argv = self.command_tokens();

        argv.extend(options.iter().cloned());

        if let Some(ref config_file) = self.config.config_file {
            argv.push("-c".to_string());
            argv.push(config_file.to_string_lossy().into_owned());
        }

        for target in targets {
            argv.push(self.target_token(target));
        }

        CommandInvocation {
            argv,
            working_dir: self.resolve_working_dir(targets),
        }
    }

    fn command_tokens(&self) -> Vec<String> {
        if let Some(custom) = self.config.custom_command() {
            return shell_split(custom);
        }

        let mut tokens = self.manager_prefix();
        tokens.push(RUBOCOP.to_string());
        tokens
    }

    fn manager_prefix(&self) -> Vec<String> {
        if self.config.check_for_rvm {
            let rvm = self.config.rvm_path();
            if is_executable(&rvm) {
                return vec![rvm.to_string_lossy().into_owned(), "-S".to_string()];
            }
        }
        if self.config.check_for_rbenv {
            let rbenv = self.config.rbenv_path();
            if is_executable(&rbenv) {
                return vec![rbenv.to_string_lossy().into_owned(), "exec".to_string()];
            }
        }
        Vec::new()
    }

    fn target_token(&self, target: &Path) -> String {
        let token = target.to_string_lossy().into_owned();
        if self.config.on_windows {
            token.replace('\\', "/")
        } else {
            token
        }
    }

    fn resolve_working_dir(&self, targets: &[PathBuf]) -> Option<PathBuf> {
        if let Some(ref dir) = self.config.working_directory {
            return Some(dir.clone());
        }
        targets
            .first()
            .and_then(|t| t.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}
