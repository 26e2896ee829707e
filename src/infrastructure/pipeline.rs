use crate::core::interfaces::BuildPipeline;
use crate::core::models::*;
use crate::core::signals::SignalManager;
use crate::utils::{Logger, PipelineCommand};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::NamedTempFile;
use tokio::process::Command;

/// Written by the pipeline to `--failure-report` before exiting non-zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Runs the build pipeline as an external program
pub struct CommandPipeline {
    command: PipelineCommand,
    report_path: Option<PathBuf>,
}

impl CommandPipeline {
    /// Each run gets a fresh private report file unless a path is pinned
    pub fn new(command: PipelineCommand) -> Self {
        Self {
            command,
            report_path: None,
        }
    }

    pub fn with_report_path(mut self, path: PathBuf) -> Self {
        self.report_path = Some(path);
        self
    }

    /// Flags describing the request, appended after the configured args
    pub fn request_args(request: &PipelineRequest, report_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--dir".into(), request.dir.clone().into_os_string()];

        let flags = [
            (request.profile, "--profile"),
            (request.debug, "--debug"),
            (!request.lint, "--no-lint"),
            (request.disable_mangling, "--no-mangling"),
            (request.app_only, "--app-only"),
            (request.use_alternate_engine, "--alternate-engine"),
        ];
        args.extend(flags.iter().filter(|(on, _)| *on).map(|(_, flag)| OsString::from(*flag)));

        args.push("--build-mode".into());
        args.push(request.build_mode.as_str().into());
        args.push("--failure-report".into());
        args.push(report_path.as_os_str().to_os_string());
        args
    }

    async fn read_report(path: &Path) -> Option<FailureReport> {
        let content = tokio::fs::read_to_string(path).await.ok()?;
        if content.trim().is_empty() {
            return None;
        }

        match serde_json::from_str(&content) {
            Ok(report) => Some(report),
            Err(e) => {
                Logger::debug(&format!("Ignoring malformed failure report: {}", e));
                None
            }
        }
    }

    fn failure_from(report: Option<FailureReport>, status: ExitStatus) -> FailureDetail {
        let exited = format!("build pipeline exited with {}", status);

        match report {
            Some(report) => {
                let root = report.detail.unwrap_or_else(|| report.message.clone());
                FailureDetail {
                    code: report.code,
                    message: report.message,
                    payload: anyhow!(root).context(exited),
                }
            }
            None => FailureDetail::untagged(anyhow!(exited)),
        }
    }

    /// Spawn the pipeline as its own process group and wait for it. The group
    /// is tracked while running so a shutdown signal reaches it.
    async fn spawn_and_wait(&self, request: &PipelineRequest, report_path: &Path) -> std::io::Result<ExitStatus> {
        let mut command = Command::new(&self.command.program);
        command
            .args(&self.command.args)
            .args(Self::request_args(request, report_path));
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn()?;
        if let Some(pid) = child.id() {
            SignalManager::track_pipeline(pid);
        }

        let status = child.wait().await;
        SignalManager::untrack_pipeline();
        status
    }
}

#[async_trait::async_trait]
impl BuildPipeline for CommandPipeline {
    async fn run(&self, request: &PipelineRequest) -> BuildOutcome {
        let temp_report: NamedTempFile;
        let report_path: &Path = match &self.report_path {
            Some(path) => {
                let _ = tokio::fs::remove_file(path).await;
                path
            }
            None => {
                temp_report = match tempfile::Builder::new().prefix("kiln-failure-").suffix(".json").tempfile() {
                    Ok(file) => file,
                    Err(e) => {
                        let payload = anyhow::Error::new(e).context("failed to create failure report file");
                        return BuildOutcome::Failure(FailureDetail::untagged(payload));
                    }
                };
                temp_report.path()
            }
        };

        Logger::debug(&format!("Running pipeline: {} {:?}", self.command.program, self.command.args));

        let status = match self.spawn_and_wait(request, report_path).await {
            Ok(status) => status,
            Err(e) => {
                let payload = anyhow::Error::new(e)
                    .context(format!("failed to start build pipeline `{}`", self.command.program));
                return BuildOutcome::Failure(FailureDetail::untagged(payload));
            }
        };

        let outcome = if status.success() {
            BuildOutcome::Success
        } else {
            BuildOutcome::Failure(Self::failure_from(Self::read_report(report_path).await, status))
        };

        if self.report_path.is_some() {
            let _ = tokio::fs::remove_file(report_path).await;
        }

        outcome
    }
}
