use crate::core::interfaces::EnvironmentSink;
use crate::core::models::BuildOptions;
use crate::utils::Logger;

pub const DEBUG_BUILD_ENV: &str = "KILN_DEBUG_BUILD";
pub const ALTERNATE_ENGINE_ENV: &str = "KILN_ALTERNATE_ENGINE";

/// Projects build options into the environment read by the pipeline.
/// Writes only; never clears a flag that is already present.
pub struct EnvironmentPropagator;

impl EnvironmentPropagator {
    /// Returns whether the alternate engine is active after propagation,
    /// either requested here or already set by the caller's environment.
    pub fn propagate(options: &BuildOptions, sink: &mut dyn EnvironmentSink) -> bool {
        if options.debug {
            sink.set(DEBUG_BUILD_ENV, "1");
            Logger::debug(&format!("{}=1", DEBUG_BUILD_ENV));
        }

        if options.use_alternate_engine {
            sink.set(ALTERNATE_ENGINE_ENV, "1");
            Logger::debug(&format!("{}=1", ALTERNATE_ENGINE_ENV));
        }

        sink.is_set(ALTERNATE_ENGINE_ENV)
    }
}
