use crate::core::environment::EnvironmentPropagator;
use crate::core::interfaces::*;
use crate::core::invoker::BuildInvoker;
use crate::core::models::*;
use crate::core::options::OptionNormalizer;
use crate::utils::Logger;
use std::path::Path;
use std::sync::Arc;

/// Linear build flow: normalize, propagate environment, invoke the
/// pipeline. Signal handlers are installed by the caller before any of it.
/// Consumed by `run` so a process builds at most once.
pub struct BuildOrchestrator {
    invoker: BuildInvoker,
    environment: Box<dyn EnvironmentSink + Send>,
}

impl BuildOrchestrator {
    pub fn new(
        probe: Arc<dyn DirectoryProbe>,
        pipeline: Arc<dyn BuildPipeline>,
        environment: Box<dyn EnvironmentSink + Send>,
    ) -> Self {
        Self {
            invoker: BuildInvoker::new(probe, pipeline),
            environment,
        }
    }

    pub async fn run(mut self, raw: &RawBuildOptions, dir: &Path) -> BuildOutcome {
        let (options, warnings) = match OptionNormalizer::normalize(raw) {
            Ok(normalized) => normalized,
            Err(e) => return BuildOutcome::Failure(e.into_failure()),
        };

        for warning in &warnings {
            Logger::advisory(warning.headline, warning.note);
        }

        let use_alternate_engine = EnvironmentPropagator::propagate(&options, self.environment.as_mut());

        self.invoker.invoke(&options, dir, use_alternate_engine).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::{ALTERNATE_ENGINE_ENV, DEBUG_BUILD_ENV};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedProbe(bool);

    #[async_trait]
    impl DirectoryProbe for FixedProbe {
        async fn directory_exists(&self, _path: &Path) -> bool {
            self.0
        }
    }

    struct ScriptedPipeline {
        calls: Mutex<Vec<PipelineRequest>>,
        failure_code: Option<&'static str>,
    }

    impl ScriptedPipeline {
        fn new(failure_code: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                failure_code,
            })
        }
    }

    #[async_trait]
    impl BuildPipeline for ScriptedPipeline {
        async fn run(&self, request: &PipelineRequest) -> BuildOutcome {
            self.calls.lock().unwrap().push(request.clone());
            match self.failure_code {
                Some(code) => BuildOutcome::Failure(FailureDetail {
                    code: Some(code.to_string()),
                    message: "Dynamic code evaluation is not allowed".to_string(),
                    payload: anyhow::anyhow!("Dynamic code evaluation is not allowed"),
                }),
                None => BuildOutcome::Success,
            }
        }
    }

    #[derive(Clone, Default)]
    struct SharedEnvironment(Arc<Mutex<HashMap<String, String>>>);

    impl EnvironmentSink for SharedEnvironment {
        fn set(&mut self, key: &str, value: &str) {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
        }

        fn is_set(&self, key: &str) -> bool {
            self.0.lock().unwrap().contains_key(key)
        }
    }

    #[tokio::test]
    async fn test_flags_reach_pipeline_and_environment() {
        let pipeline = ScriptedPipeline::new(None);
        let env = SharedEnvironment::default();
        let orchestrator = BuildOrchestrator::new(Arc::new(FixedProbe(true)), pipeline.clone(), Box::new(env.clone()));

        let raw = RawBuildOptions {
            debug: true,
            lint: false,
            mangling: false,
            use_alternate_engine: Some(true),
            build_mode: "compile".to_string(),
            ..Default::default()
        };

        let outcome = orchestrator.run(&raw, Path::new("/srv/app")).await;
        assert!(outcome.is_success());

        let calls = pipeline.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].debug);
        assert!(!calls[0].lint);
        assert!(calls[0].disable_mangling);
        assert!(calls[0].use_alternate_engine);
        assert_eq!(calls[0].build_mode, BuildMode::CompileOnly);

        let vars = env.0.lock().unwrap();
        assert_eq!(vars.get(DEBUG_BUILD_ENV).map(String::as_str), Some("1"));
        assert_eq!(vars.get(ALTERNATE_ENGINE_ENV).map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_invalid_mode_stops_before_pipeline() {
        let pipeline = ScriptedPipeline::new(None);
        let env = SharedEnvironment::default();
        let orchestrator = BuildOrchestrator::new(Arc::new(FixedProbe(true)), pipeline.clone(), Box::new(env.clone()));

        let raw = RawBuildOptions {
            debug: true,
            build_mode: "everything".to_string(),
            ..Default::default()
        };

        match orchestrator.run(&raw, Path::new("/srv/app")).await {
            BuildOutcome::Failure(detail) => assert_eq!(detail.code.as_deref(), Some("INVALID_CONFIGURATION")),
            BuildOutcome::Success => panic!("expected invalid configuration"),
        }
        assert!(pipeline.calls.lock().unwrap().is_empty());
        assert!(env.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_failure_is_returned() {
        let pipeline = ScriptedPipeline::new(Some("EDGE_RUNTIME_UNSUPPORTED_API"));
        let orchestrator = BuildOrchestrator::new(
            Arc::new(FixedProbe(true)),
            pipeline.clone(),
            Box::new(SharedEnvironment::default()),
        );

        match orchestrator.run(&RawBuildOptions::default(), Path::new("/srv/app")).await {
            BuildOutcome::Failure(detail) => {
                assert_eq!(detail.code.as_deref(), Some("EDGE_RUNTIME_UNSUPPORTED_API"));
                assert_eq!(detail.message, "Dynamic code evaluation is not allowed");
            }
            BuildOutcome::Success => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_missing_directory_skips_pipeline() {
        let pipeline = ScriptedPipeline::new(None);
        let orchestrator = BuildOrchestrator::new(
            Arc::new(FixedProbe(false)),
            pipeline.clone(),
            Box::new(SharedEnvironment::default()),
        );

        let outcome = orchestrator.run(&RawBuildOptions::default(), Path::new("/nowhere")).await;

        assert!(!outcome.is_success());
        assert!(pipeline.calls.lock().unwrap().is_empty());
    }
}
