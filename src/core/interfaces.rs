use crate::core::models::*;
use async_trait::async_trait;
use std::path::Path;

/// Directory existence check
#[async_trait]
pub trait DirectoryProbe: Send + Sync {
    async fn directory_exists(&self, path: &Path) -> bool;
}

/// The external build pipeline. Called at most once per process.
#[async_trait]
pub trait BuildPipeline: Send + Sync {
    async fn run(&self, request: &PipelineRequest) -> BuildOutcome;
}

/// Process-wide environment consumed by the pipeline
pub trait EnvironmentSink {
    fn set(&mut self, key: &str, value: &str);
    /// Present with a non-empty value
    fn is_set(&self, key: &str) -> bool;
}

/// Prints the final message and terminates the process
pub trait ExitPrinter {
    fn print_and_exit(&self, outcome: &ExitOutcome);
}
