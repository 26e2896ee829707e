use crate::core::models::*;
use crate::utils::{KilnError, Result};

pub const LINT_DISABLED: Warning = Warning {
    headline: "Linting is disabled.",
    note: None,
};

pub const MANGLING_DISABLED: Warning = Warning {
    headline: "Mangling is disabled.",
    note: Some("Note: This may affect performance and should only be used for debugging purposes."),
};

pub const PROFILING_ENABLED: Warning = Warning {
    headline: "Profiling is enabled.",
    note: Some("Note: This may affect performance."),
};

/// Validates raw flags and derives the canonical build options
pub struct OptionNormalizer;

impl OptionNormalizer {
    pub fn normalize(raw: &RawBuildOptions) -> Result<(BuildOptions, Vec<Warning>)> {
        let build_mode = BuildMode::parse(&raw.build_mode).ok_or_else(|| {
            KilnError::InvalidConfiguration(format!(
                "Invalid build mode \"{}\". Expected one of: default, compile, generate",
                raw.build_mode
            ))
        })?;

        let options = BuildOptions {
            debug: raw.debug,
            profile: raw.profile,
            lint: raw.lint,
            mangling: raw.mangling,
            app_only: raw.app_only.unwrap_or(false),
            use_alternate_engine: raw.use_alternate_engine.unwrap_or(false),
            build_mode,
        };

        let warnings = Self::warnings(&options);
        Ok((options, warnings))
    }

    fn warnings(options: &BuildOptions) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if !options.lint {
            warnings.push(LINT_DISABLED);
        }
        if !options.mangling {
            warnings.push(MANGLING_DISABLED);
        }
        if options.profile {
            warnings.push(PROFILING_ENABLED);
        }

        warnings
    }
}
