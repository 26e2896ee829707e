use crate::utils::{KilnError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "kiln.config.json";
pub const PIPELINE_ENV: &str = "KILN_PIPELINE";
pub const DEFAULT_PIPELINE_PROGRAM: &str = "kiln-pipeline";

/// Configuration file format (kiln.config.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KilnConfig {
    /// External build pipeline to delegate to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PipelineCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_PIPELINE_PROGRAM.to_string(),
            args: Vec::new(),
        }
    }
}

/// Config loader that supports config files with environment override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from kiln.config.json in the project root, if present
    pub fn load_from_file(root: &Path) -> Result<Option<KilnConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug("No kiln.config.json found, using defaults");
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)?;

        let config: KilnConfig = serde_json::from_str(&content).map_err(|e| {
            KilnError::config(format!("Failed to parse {}: {}", config_path.display(), e))
        })?;

        Ok(Some(config))
    }

    /// Pick the pipeline command (env > config file > default)
    pub fn resolve_pipeline(file_config: Option<KilnConfig>, env_program: Option<String>) -> PipelineCommand {
        let from_file = file_config.and_then(|c| c.pipeline);

        match env_program.filter(|p| !p.trim().is_empty()) {
            Some(program) => PipelineCommand {
                program,
                args: Vec::new(),
            },
            None => from_file.unwrap_or_default(),
        }
    }

    /// Load the config file and resolve the pipeline command for a project
    pub fn pipeline_for(root: &Path) -> Result<PipelineCommand> {
        let file_config = Self::load_from_file(root)?;
        Ok(Self::resolve_pipeline(file_config, std::env::var(PIPELINE_ENV).ok()))
    }
}
