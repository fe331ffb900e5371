// Check orchestration: command construction, process execution, exit-code
// gating, and output parsing for each rucop operation.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::command::{CommandBuilder, CommandInvocation};
use crate::config::RunnerConfig;
use crate::diagnostics::{parse_file_list, parse_output, Diagnostic, FileAnnotations};
use crate::error::{CliError, ProcessError, Result};
use crate::filesystem::is_ruby_file;
use crate::process::{ProcessManager, ProcessResult};

/// RuboCop's own exit contract: 0 = clean, 1 = offenses found. Anything
/// else is abnormal termination, never "no results".
const ANALYSIS_EXIT_CODES: [i32; 2] = [0, 1];

/// Runs RuboCop checks and converts their output into annotations.
///
/// Checks against the same file are serialized so a stale result can never
/// overwrite a fresher one; checks against distinct files are independent.
pub struct RubocopRunner {
    config: RunnerConfig,
    processes: ProcessManager,
    in_flight: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl RubocopRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let processes = ProcessManager::new(config.timeout());
        Self {
            config,
            processes,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Check a single file and return its fresh annotations.
    ///
    /// The result wholly replaces any prior annotations the caller holds for
    /// this file; nothing is merged.
    pub async fn check_file(&self, path: &Path) -> Result<FileAnnotations> {
        if path.as_os_str().is_empty() {
            return Err(CliError::MissingTarget {
                context: "no file to check".to_string(),
            }
            .into());
        }

        // One in-flight check per file path
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let lock = self.file_lock(&key).await;
        let serialized = lock.lock().await;
        let result = self
            .run_analysis(&emacs_options(), &[path.to_path_buf()])
            .await;
        drop(serialized);
        self.release_file_lock(&key, &lock).await;
        let result = result?;

        let annotations = parse_output(&result.stdout());
        info!(
            path = %path.display(),
            offenses = annotations.len(),
            duration_ms = result.duration.as_millis() as u64,
            "check completed"
        );
        Ok(annotations)
    }

    /// Check several files or folders at once (folder, project and
    /// open-files style checks) and return every parsed diagnostic.
    pub async fn check_paths(&self, paths: &[PathBuf]) -> Result<Vec<Diagnostic>> {
        let targets = lintable_targets(paths);
        if targets.is_empty() {
            return Err(CliError::MissingTarget {
                context: "there are no Ruby files to check".to_string(),
            }
            .into());
        }

        let result = self.run_analysis(&emacs_options(), &targets).await?;

        let diagnostics: Vec<Diagnostic> = result
            .stdout()
            .lines()
            .filter_map(crate::diagnostics::parse_line)
            .collect();
        info!(
            targets = targets.len(),
            offenses = diagnostics.len(),
            "path check completed"
        );
        Ok(diagnostics)
    }

    /// Run RuboCop's auto-correct against a staged copy of `content` and
    /// return the corrected source.
    ///
    /// The buffer content is written to a temporary `.rb` file which the
    /// tool fixes in place; the corrected text is read back and the file is
    /// removed when the handle drops, on success and on every error path.
    /// Writing the result into the originating buffer is the caller's job.
    pub async fn autocorrect(&self, content: &str) -> Result<String> {
        let staged = tempfile::Builder::new()
            .prefix("rucop-fix-")
            .suffix(".rb")
            .tempfile()?;
        std::fs::write(staged.path(), content)?;

        let mut options = vec!["-a".to_string()];
        options.extend(emacs_options());
        self.run_analysis(&options, &[staged.path().to_path_buf()])
            .await?;

        let corrected = std::fs::read_to_string(staged.path())?;
        Ok(corrected)
    }

    /// List every file with at least one offense under `root`.
    pub async fn offending_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let options = vec!["--format".to_string(), "files".to_string()];
        let result = self.run_analysis(&options, &[root.to_path_buf()]).await?;
        Ok(parse_file_list(&result.stdout()))
    }

    /// Aggregate offense-count report for `root`, passed through verbatim.
    pub async fn offense_report(&self, root: &Path) -> Result<String> {
        let options = vec!["--format".to_string(), "offenses".to_string()];
        let result = self.run_analysis(&options, &[root.to_path_buf()]).await?;
        Ok(result.stdout())
    }

    async fn run_analysis(
        &self,
        options: &[String],
        targets: &[PathBuf],
    ) -> Result<ProcessResult> {
        let invocation = CommandBuilder::new(&self.config).build(options, targets);
        debug!(command = %invocation.display(), "running analysis");

        let result = self.processes.run(&invocation).await?;
        ensure_analysis_exit(&invocation, result)
    }

    async fn file_lock(&self, key: &Path) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.entry(key.to_path_buf()).or_default().clone()
    }

    /// Drop a file's lock entry once no other check holds a handle to it,
    /// so the map does not grow with every distinct path ever checked.
    async fn release_file_lock(&self, key: &Path, lock: &Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // Two handles means the map's entry plus ours; clones are only ever
        // taken under this same map lock.
        if Arc::strong_count(lock) == 2 {
            in_flight.remove(key);
        }
    }
}

/// Options selecting the single-line-per-offense output format.
fn emacs_options() -> Vec<String> {
    vec!["--format".to_string(), "emacs".to_string()]
}

/// Keep directories (RuboCop recurses into them) and Ruby files; drop
/// everything else so a folder check is never polluted by stray targets.
fn lintable_targets(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| p.is_dir() || is_ruby_file(p))
        .cloned()
        .collect()
}

/// Enforce the `{0, 1}` analysis contract: any other exit code is an
/// abnormal termination carrying stderr, reported as a failed check.
fn ensure_analysis_exit(
    invocation: &CommandInvocation,
    result: ProcessResult,
) -> Result<ProcessResult> {
    match result.exit_code() {
        Some(code) if ANALYSIS_EXIT_CODES.contains(&code) => Ok(result),
        code => Err(ProcessError::AbnormalExit {
            command: invocation.display(),
            exit_code: code,
            stderr: result.stderr().trim().to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;

    fn runner_with_command(command: &str) -> RubocopRunner {
        let mut config = RunnerConfig::default();
        config.rubocop_command = Some(command.to_string());
        RubocopRunner::new(config)
    }

    #[tokio::test]
    async fn test_check_file_empty_path_is_missing_target() {
        let runner = runner_with_command("echo");
        let err = runner.check_file(Path::new("")).await.unwrap_err();
        assert!(err.to_string().contains("No target to check"));
    }

    #[tokio::test]
    async fn test_check_paths_without_ruby_files_is_missing_target() {
        let runner = runner_with_command("echo");
        let err = runner
            .check_paths(&[PathBuf::from("README.md")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no Ruby files"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_lock_released_after_check() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("user.rb");
        std::fs::write(&target, "puts 1\n").unwrap();

        let runner = runner_with_command("echo");
        runner.check_file(&target).await.unwrap();
        assert!(runner.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_lock_released_after_failed_check() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("user.rb");
        std::fs::write(&target, "puts 1\n").unwrap();

        let runner = runner_with_command("/nonexistent/fake-rubocop");
        assert!(runner.check_file(&target).await.is_err());
        assert!(runner.in_flight.lock().await.is_empty());
    }

    #[test]
    fn test_lintable_targets_filters_non_ruby_files() {
        let dir = tempfile::tempdir().unwrap();
        let targets = lintable_targets(&[
            dir.path().to_path_buf(),
            PathBuf::from("user.rb"),
            PathBuf::from("notes.txt"),
        ]);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1], PathBuf::from("user.rb"));
    }
}
