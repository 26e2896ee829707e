use crate::core::{BuildOrchestrator, BuildOutcome, ExitReporter, RawBuildOptions, SignalManager};
use crate::infrastructure::{resolve_project_dir, CommandPipeline, ProcessEnvironment, ProcessExitPrinter, TokioFileSystemService};
use crate::utils::{ConfigLoader, KilnError, Logger, CONFIG_FILE_NAME, PIPELINE_ENV};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version, about = "Kiln - production build orchestrator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a production build
    Build(BuildArgs),
    /// Show orchestrator information
    Info,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,
    /// Enable debug mode in the pipeline
    #[arg(short, long)]
    pub debug: bool,
    /// Enable production profiling
    #[arg(long)]
    pub profile: bool,
    /// Disable linting
    #[arg(long)]
    pub no_lint: bool,
    /// Disable mangling
    #[arg(long)]
    pub no_mangling: bool,
    /// Only build the app directory
    #[arg(long)]
    pub experimental_app_only: bool,
    /// Use the alternate bundler engine
    #[arg(long)]
    pub experimental_turbo: bool,
    /// Build mode: default, compile or generate
    #[arg(long, value_name = "MODE", default_value = "default")]
    pub experimental_build_mode: String,
}

impl BuildArgs {
    pub fn raw_options(&self) -> RawBuildOptions {
        RawBuildOptions {
            debug: self.debug,
            profile: self.profile,
            lint: !self.no_lint,
            mangling: !self.no_mangling,
            app_only: Some(self.experimental_app_only),
            use_alternate_engine: Some(self.experimental_turbo),
            build_mode: self.experimental_build_mode.clone(),
        }
    }
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) {
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Build(args) => self.handle_build_command(&args).await,
            Commands::Info => self.handle_info_command(),
        }
    }

    /// Runs one build. Failures terminate the process through the exit printer.
    async fn handle_build_command(&self, args: &BuildArgs) {
        let outcome = self.build(args).await;
        ExitReporter::finish(outcome, &ProcessExitPrinter);
    }

    async fn build(&self, args: &BuildArgs) -> BuildOutcome {
        if let Err(e) = SignalManager::install() {
            return BuildOutcome::Failure(KilnError::Io(e).into_failure());
        }

        let dir = match resolve_project_dir(args.directory.as_deref()) {
            Ok(dir) => dir,
            Err(e) => return BuildOutcome::Failure(e.into_failure()),
        };

        let command = match ConfigLoader::pipeline_for(&dir) {
            Ok(command) => command,
            Err(e) => return BuildOutcome::Failure(e.into_failure()),
        };

        let orchestrator = BuildOrchestrator::new(
            Arc::new(TokioFileSystemService),
            Arc::new(CommandPipeline::new(command)),
            Box::new(ProcessEnvironment),
        );

        orchestrator.run(&args.raw_options(), &dir).await
    }

    fn handle_info_command(&self) {
        println!("\n  {} {}", "KILN".bright_cyan().bold(), env!("CARGO_PKG_VERSION").bright_white());
        println!();
        println!("  {} {}", "Config file:".bright_black(), CONFIG_FILE_NAME);
        println!("  {} {}", "Pipeline override:".bright_black(), PIPELINE_ENV);
        println!(
            "  {} {}, {}",
            "Pipeline flags:".bright_black(),
            crate::core::DEBUG_BUILD_ENV,
            crate::core::ALTERNATE_ENGINE_ENV
        );
        println!();
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "kiln",
            "build",
            "site",
            "--no-lint",
            "--no-mangling",
            "--experimental-turbo",
            "--experimental-build-mode",
            "compile",
        ])
        .unwrap();

        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let raw = args.raw_options();

        assert_eq!(args.directory, Some(PathBuf::from("site")));
        assert!(!raw.lint);
        assert!(!raw.mangling);
        assert_eq!(raw.use_alternate_engine, Some(true));
        assert_eq!(raw.app_only, Some(false));
        assert_eq!(raw.build_mode, "compile");
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["kiln", "build"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let raw = args.raw_options();

        assert!(args.directory.is_none());
        assert!(raw.lint);
        assert!(raw.mangling);
        assert!(!raw.debug);
        assert_eq!(raw.build_mode, "default");
    }
}
