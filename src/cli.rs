// CLI interface for rucop using clap
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::error::{exit_codes, CliError, Result, RucopError};
use crate::runner::RubocopRunner;
use crate::user_output::{UserOutput, UserOutputConfig};

const DEFAULT_SETTINGS_FILE: &str = ".rucop.yaml";

#[derive(Parser)]
#[command(
    name = "rucop",
    about = "A fast RuboCop runner and diagnostics annotator written in Rust",
    version = crate::VERSION,
    long_about = "rucop shells out to RuboCop, enforces its exit-code contract, and turns \
its emacs-format output into per-line annotations for editors and scripts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file path (defaults to .rucop.yaml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Control color output (auto, always, never)
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check files or folders (default command)
    Check {
        /// Files or folders to check
        paths: Vec<PathBuf>,
    },

    /// Auto-correct a Ruby file and print the corrected source
    Fix {
        /// File to auto-correct
        file: PathBuf,

        /// Write the corrected source back to the file
        #[arg(short, long)]
        write: bool,
    },

    /// List all files with offenses under a root
    Files {
        /// Root folder to scan
        root: PathBuf,
    },

    /// Print the aggregate offense-count report for a root
    Report {
        /// Root folder to scan
        root: PathBuf,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completion for
        shell: Shell,
    },
}

impl Cli {
    pub fn run(&self) -> Result<i32> {
        self.init_logging();

        if self.verbose && self.quiet {
            return Err(CliError::ConflictingArguments {
                first: "--verbose".to_string(),
                second: "--quiet".to_string(),
                suggestion:
                    "Use either --verbose for more output or --quiet for less output, but not both"
                        .to_string(),
            }
            .into());
        }

        let output = UserOutput::new(UserOutputConfig::new(self.quiet, self.color.clone()));

        if let Some(Commands::GenerateCompletion { shell }) = &self.command {
            let mut cmd = Self::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut std::io::stdout());
            return Ok(exit_codes::SUCCESS);
        }

        let config = self.load_config()?;
        let runner = RubocopRunner::new(config);

        let runtime = tokio::runtime::Runtime::new().map_err(RucopError::Io)?;
        let result = runtime.block_on(self.dispatch(&runner, &output));

        // A "no target" outcome is a status notice, not a failure
        match result {
            Err(RucopError::Cli(cli_err)) => match *cli_err {
                CliError::MissingTarget { context } => {
                    output.show_status(&format!("RuboCop: {context}."));
                    Ok(exit_codes::SUCCESS)
                }
                other => Err(RucopError::Cli(Box::new(other))),
            },
            other => other,
        }
    }

    async fn dispatch(&self, runner: &RubocopRunner, output: &UserOutput) -> Result<i32> {
        match &self.command {
            None => self.run_check(runner, output, &[]).await,
            Some(Commands::Check { paths }) => self.run_check(runner, output, paths).await,
            Some(Commands::Fix { file, write }) => {
                self.run_fix(runner, output, file, *write).await
            }
            Some(Commands::Files { root }) => {
                let files = runner.offending_files(root).await?;
                for file in &files {
                    output.show_status(&file.display().to_string());
                }
                if files.is_empty() {
                    Ok(exit_codes::SUCCESS)
                } else {
                    Ok(exit_codes::OFFENSES_FOUND)
                }
            }
            Some(Commands::Report { root }) => {
                let report = runner.offense_report(root).await?;
                output.show_status(report.trim_end());
                Ok(exit_codes::SUCCESS)
            }
            Some(Commands::GenerateCompletion { .. }) => {
                unreachable!("completion handled before dispatch")
            }
        }
    }

    async fn run_check(
        &self,
        runner: &RubocopRunner,
        output: &UserOutput,
        paths: &[PathBuf],
    ) -> Result<i32> {
        if paths.is_empty() {
            return Err(CliError::MissingTarget {
                context: "no file or folder given".to_string(),
            }
            .into());
        }

        // A single regular file gets the per-file annotation path; anything
        // else goes through the multi-target check.
        if let [single] = paths {
            if single.is_file() {
                if !crate::filesystem::is_ruby_file(single) {
                    return Err(CliError::MissingTarget {
                        context: "there are no Ruby files to check".to_string(),
                    }
                    .into());
                }
                let annotations = runner.check_file(single).await?;
                output.show_annotations(single, &annotations);
                return Ok(if annotations.is_empty() {
                    exit_codes::SUCCESS
                } else {
                    exit_codes::OFFENSES_FOUND
                });
            }
        }

        let diagnostics = runner.check_paths(paths).await?;
        output.show_diagnostics(&diagnostics);
        Ok(if diagnostics.is_empty() {
            exit_codes::SUCCESS
        } else {
            exit_codes::OFFENSES_FOUND
        })
    }

    async fn run_fix(
        &self,
        runner: &RubocopRunner,
        output: &UserOutput,
        file: &Path,
        write: bool,
    ) -> Result<i32> {
        if !file.is_file() {
            return Err(CliError::MissingTarget {
                context: format!("{} is not a file", file.display()),
            }
            .into());
        }

        let content = std::fs::read_to_string(file)?;
        let corrected = runner.autocorrect(&content).await?;

        if write {
            std::fs::write(file, &corrected)?;
            output.show_status(&format!("RuboCop: corrected {}.", file.display()));
        } else {
            print!("{corrected}");
        }
        Ok(exit_codes::SUCCESS)
    }

    fn load_config(&self) -> Result<RunnerConfig> {
        match &self.settings {
            Some(path) => RunnerConfig::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    RunnerConfig::from_file(default_path)
                } else {
                    let config = RunnerConfig::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    fn init_logging(&self) {
        use crate::logging::{init_logging, LogConfig};

        let log_config = LogConfig::from_cli(self.verbose, self.quiet, self.color.clone());

        if let Err(e) = init_logging(log_config) {
            eprintln!("Failed to initialize logging: {e}");
            // Continue execution even if logging fails
        }
    }
}
