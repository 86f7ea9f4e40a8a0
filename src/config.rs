use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for freelance-match
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FreelanceMatchConfig {
    /// Matching service connection
    pub service: ServiceConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Workflow policies
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the matching service
    pub base_url: String,
    /// Company the jobs are posted for
    pub owner_id: String,
    /// Bearer token (can be set via env var)
    pub token: Option<String>,
    /// Per-request timeout
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
    /// Log request counters on exit
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmPolicy {
    /// Toggle visibility whatever the confirmation call returned
    Optimistic,
    /// Toggle visibility only after the service acknowledged the batch
    RevertOnFailure,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    pub confirm_policy: ConfirmPolicy,
    /// Put the draft back into the form when job creation fails
    pub restore_draft_on_failure: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            confirm_policy: ConfirmPolicy::Optimistic,
            restore_draft_on_failure: false,
        }
    }
}

impl Default for FreelanceMatchConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: "http://localhost:3001".to_string(),
                owner_id: String::new(),
                token: None, // Read from env var or .freelance-match-rc
                request_timeout_seconds: 30,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
                metrics_enabled: true,
            },
            workflow: WorkflowConfig::default(),
        }
    }
}

impl FreelanceMatchConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (freelance-match.toml, .freelance-match-rc)
    /// 3. Environment variables (prefixed with FREELANCE_MATCH_)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`load`](Self::load) with config files looked up in `dir`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let defaults = Config::try_from(&FreelanceMatchConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        let toml_path = dir.join("freelance-match.toml");
        if toml_path.exists() {
            builder = builder.add_source(File::from(toml_path));
        }

        let rc_path = dir.join(".freelance-match-rc");
        if rc_path.exists() {
            builder = builder.add_source(File::from(rc_path).format(config::FileFormat::Toml));
        }

        // Nested keys use a double underscore: FREELANCE_MATCH_SERVICE__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("FREELANCE_MATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: FreelanceMatchConfig = builder.build()?.try_deserialize()?;

        if loaded.service.token.is_none() {
            if let Ok(token) = std::env::var("FREELANCE_MATCH_TOKEN") {
                loaded.service.token = Some(token);
            }
        }

        Ok(loaded)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.service.token.is_some() {
            copy.service.token = Some("***".to_string());
        }
        copy
    }

    /// Load `.env` from the working directory if it exists.
    ///
    /// Runs before logging is set up, so the caller reports the result.
    pub fn load_env_file() -> Result<Option<PathBuf>> {
        Self::load_env_file_from(Path::new("."))
    }

    pub fn load_env_file_from(dir: &Path) -> Result<Option<PathBuf>> {
        let path = dir.join(".env");
        if !path.exists() {
            return Ok(None);
        }
        dotenvy::from_path(&path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_optimistic() {
        let config = FreelanceMatchConfig::default();
        assert_eq!(config.workflow.confirm_policy, ConfirmPolicy::Optimistic);
        assert!(!config.workflow.restore_draft_on_failure);
        assert_eq!(config.service.request_timeout_seconds, 30);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("freelance-match.toml"),
            r#"
[service]
base_url = "https://api.example.test"
owner_id = "acme"

[workflow]
confirm_policy = "revert_on_failure"
"#,
        )
        .unwrap();

        let config = FreelanceMatchConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.service.base_url, "https://api.example.test");
        assert_eq!(config.service.owner_id, "acme");
        assert_eq!(config.service.request_timeout_seconds, 30);
        assert_eq!(config.workflow.confirm_policy, ConfirmPolicy::RevertOnFailure);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FreelanceMatchConfig::default();
        config.service.owner_id = "globex".to_string();
        config.workflow.restore_draft_on_failure = true;
        config.save_to_file(dir.path().join("freelance-match.toml")).unwrap();

        let reloaded = FreelanceMatchConfig::load_from(dir.path()).unwrap();
        assert_eq!(reloaded.service.owner_id, "globex");
        assert!(reloaded.workflow.restore_draft_on_failure);
    }

    #[test]
    fn test_redacted_masks_token() {
        let mut config = FreelanceMatchConfig::default();
        config.service.token = Some("secret".to_string());
        assert_eq!(config.redacted().service.token.as_deref(), Some("***"));
        assert_eq!(config.service.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_env_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FreelanceMatchConfig::load_env_file_from(dir.path())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_env_file_values_are_exported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "FREELANCE_MATCH_ENV_FILE_MARKER=loaded\n",
        )
        .unwrap();

        let loaded = FreelanceMatchConfig::load_env_file_from(dir.path()).unwrap();
        assert_eq!(loaded, Some(dir.path().join(".env")));
        assert_eq!(
            std::env::var("FREELANCE_MATCH_ENV_FILE_MARKER").unwrap(),
            "loaded"
        );
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "THIS LINE IS BROKEN\n").unwrap();

        let err = FreelanceMatchConfig::load_env_file_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains(".env"));
    }
}
