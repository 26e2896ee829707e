use crate::core::interfaces::{BuildPipeline, DirectoryProbe};
use crate::core::models::*;
use crate::utils::{KilnError, Logger, Timer};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Calls the build pipeline once for a verified project directory
pub struct BuildInvoker {
    probe: Arc<dyn DirectoryProbe>,
    pipeline: Arc<dyn BuildPipeline>,
    invoked: AtomicBool,
}

impl BuildInvoker {
    pub fn new(probe: Arc<dyn DirectoryProbe>, pipeline: Arc<dyn BuildPipeline>) -> Self {
        Self {
            probe,
            pipeline,
            invoked: AtomicBool::new(false),
        }
    }

    /// Build the request handed to the pipeline. The pipeline takes
    /// "disable mangling", the inverse of the user-facing option.
    pub fn request(options: &BuildOptions, dir: &Path, use_alternate_engine: bool) -> PipelineRequest {
        PipelineRequest {
            dir: dir.to_path_buf(),
            profile: options.profile,
            debug: options.debug,
            lint: options.lint,
            disable_mangling: !options.mangling,
            app_only: options.app_only,
            use_alternate_engine,
            build_mode: options.build_mode,
        }
    }

    /// A missing directory fails without touching the pipeline and can be
    /// retried freely. Once the pipeline has been called, later calls fail.
    pub async fn invoke(&self, options: &BuildOptions, dir: &Path, use_alternate_engine: bool) -> BuildOutcome {
        if !self.probe.directory_exists(dir).await {
            return BuildOutcome::Failure(KilnError::ProjectDirectoryNotFound(dir.to_path_buf()).into_failure());
        }

        if self.invoked.swap(true, Ordering::SeqCst) {
            return BuildOutcome::Failure(
                KilnError::Pipeline("build pipeline was already invoked in this process".to_string()).into_failure(),
            );
        }

        let request = Self::request(options, dir, use_alternate_engine);
        Logger::build_start(&dir.display().to_string(), request.build_mode.as_str());

        let timer = Timer::start("build pipeline");
        let outcome = self.pipeline.run(&request).await;

        if options.profile {
            Logger::info(&format!("⏱️  Pipeline finished in {:.2?}", timer.elapsed()));
        }
        if outcome.is_success() {
            Logger::build_complete(timer.elapsed());
        }

        outcome
    }
}
