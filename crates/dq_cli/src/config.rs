//! Environment configuration.

use dq_narrative::NarrativeConfig;
use std::path::PathBuf;
use tracing::debug;

/// Output directory used when `DQ_OUTPUT_DIR` is not set.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub ai_sdk_base_url: Option<String>,
    pub ai_sdk_username: Option<String>,
    pub ai_sdk_password: Option<String>,
}

impl PipelineConfig {
    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first; variables
    /// already set in the environment take precedence over it.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            output_dir: get("DQ_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            ai_sdk_base_url: get("AI_SDK_BASE_URL"),
            ai_sdk_username: get("AI_SDK_USERNAME"),
            ai_sdk_password: get("AI_SDK_PASSWORD"),
        }
    }

    /// Returns the narrative client settings.
    pub fn narrative_config(&self) -> NarrativeConfig {
        NarrativeConfig {
            base_url: self.ai_sdk_base_url.clone(),
            username: self.ai_sdk_username.clone(),
            password: self.ai_sdk_password.clone(),
            ..Default::default()
        }
    }
}
