use std::fmt;
use std::path::PathBuf;

/// Flags as they arrive from the command line, before validation
#[derive(Debug, Clone)]
pub struct RawBuildOptions {
    pub debug: bool,
    pub profile: bool,
    pub lint: bool,
    pub mangling: bool,
    pub app_only: Option<bool>,
    pub use_alternate_engine: Option<bool>,
    pub build_mode: String,
}

impl Default for RawBuildOptions {
    fn default() -> Self {
        Self {
            debug: false,
            profile: false,
            lint: true,
            mangling: true,
            app_only: None,
            use_alternate_engine: None,
            build_mode: "default".to_string(),
        }
    }
}

/// Canonical build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub debug: bool,
    pub profile: bool,
    pub lint: bool,
    pub mangling: bool,
    pub app_only: bool,
    pub use_alternate_engine: bool,
    pub build_mode: BuildMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    #[default]
    Default,
    CompileOnly,
    GenerateOnly,
}

impl BuildMode {
    /// Parse a user-supplied mode. Returns `None` for unknown spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "default" => Some(BuildMode::Default),
            "compile" | "compile-only" | "experimental-compile" => Some(BuildMode::CompileOnly),
            "generate" | "generate-only" | "experimental-generate" => Some(BuildMode::GenerateOnly),
            _ => None,
        }
    }

    /// Spelling passed to the pipeline
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Default => "default",
            BuildMode::CompileOnly => "compile",
            BuildMode::GenerateOnly => "generate",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory message produced while normalizing options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub headline: &'static str,
    pub note: Option<&'static str>,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.note {
            Some(note) => write!(f, "{} {}", self.headline, note),
            None => f.write_str(self.headline),
        }
    }
}

/// Parameters of the single pipeline call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub dir: PathBuf,
    pub profile: bool,
    pub debug: bool,
    pub lint: bool,
    pub disable_mangling: bool,
    pub app_only: bool,
    pub use_alternate_engine: bool,
    pub build_mode: BuildMode,
}

/// Recognized build-failure kinds. Anything outside this set is unexpected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidResolveAlias,
    BundlerErrors,
    BuildOptimizationFailed,
    StaticExportError,
    StaticGenerationBailout,
    EdgeRuntimeUnsupportedApi,
    ProjectDirectoryNotFound,
    InvalidConfiguration,
}

impl FailureKind {
    pub const ALL: [FailureKind; 8] = [
        FailureKind::InvalidResolveAlias,
        FailureKind::BundlerErrors,
        FailureKind::BuildOptimizationFailed,
        FailureKind::StaticExportError,
        FailureKind::StaticGenerationBailout,
        FailureKind::EdgeRuntimeUnsupportedApi,
        FailureKind::ProjectDirectoryNotFound,
        FailureKind::InvalidConfiguration,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::InvalidResolveAlias => "INVALID_RESOLVE_ALIAS",
            FailureKind::BundlerErrors => "BUNDLER_ERRORS",
            FailureKind::BuildOptimizationFailed => "BUILD_OPTIMIZATION_FAILED",
            FailureKind::StaticExportError => "STATIC_EXPORT_ERROR",
            FailureKind::StaticGenerationBailout => "STATIC_GENERATION_BAILOUT",
            FailureKind::EdgeRuntimeUnsupportedApi => "EDGE_RUNTIME_UNSUPPORTED_API",
            FailureKind::ProjectDirectoryNotFound => "PROJECT_DIRECTORY_NOT_FOUND",
            FailureKind::InvalidConfiguration => "INVALID_CONFIGURATION",
        }
    }

    /// Exact, case-sensitive lookup by wire code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// A failed build. `payload` keeps the original error with its cause chain.
#[derive(Debug)]
pub struct FailureDetail {
    pub code: Option<String>,
    pub message: String,
    pub payload: anyhow::Error,
}

impl FailureDetail {
    pub fn tagged(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code: Some(kind.code().to_string()),
            payload: anyhow::anyhow!("{}", message),
            message,
        }
    }

    pub fn untagged(payload: anyhow::Error) -> Self {
        Self {
            code: None,
            message: payload.to_string(),
            payload,
        }
    }
}

#[derive(Debug)]
pub enum BuildOutcome {
    Success,
    Failure(FailureDetail),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Terminal action for a failed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    pub lines: Vec<String>,
    pub payload: Option<String>,
    pub code: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_parse() {
        assert_eq!(BuildMode::parse("default"), Some(BuildMode::Default));
        assert_eq!(BuildMode::parse("compile"), Some(BuildMode::CompileOnly));
        assert_eq!(BuildMode::parse("experimental-generate"), Some(BuildMode::GenerateOnly));
        assert_eq!(BuildMode::parse("GENERATE-ONLY"), Some(BuildMode::GenerateOnly));
        assert_eq!(BuildMode::parse("turbo"), None);
        assert_eq!(BuildMode::parse(""), None);
    }

    #[test]
    fn test_failure_kind_codes_are_unique() {
        for kind in FailureKind::ALL {
            assert_eq!(FailureKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(FailureKind::from_code("edge_runtime_unsupported_api"), None);
        assert_eq!(FailureKind::from_code("MODULE_NOT_FOUND"), None);
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning {
            headline: "Profiling is enabled.",
            note: Some("Note: This may affect performance."),
        };
        assert_eq!(warning.to_string(), "Profiling is enabled. Note: This may affect performance.");
    }
}
