//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.prvet.toml` in the workspace root
//! 4. `~/.config/prvet/config.toml` (global defaults)
//! 5. Built-in defaults
//!
//! GitHub credentials are fatal preconditions: [`GithubConfig::resolved`]
//! fails before any review logic runs when one is missing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required {name} (set {env} or the corresponding flag)")]
    Missing {
        name: &'static str,
        env: &'static str,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub provider: ProviderConfig,
    pub review: ReviewConfig,
}

/// GitHub connection settings as loaded (possibly incomplete).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// API token. Env only in practice; never written to config files.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Repository in `owner/name` form.
    pub repository: Option<String>,
    /// Pull request number.
    pub pr_number: Option<u64>,
    /// Head commit SHA to anchor review comments to.
    pub commit_sha: Option<String>,
    /// REST API base URL.
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            pr_number: None,
            commit_sha: None,
            api_url: constants::GITHUB_API_URL.to_string(),
        }
    }
}

/// Fully-resolved GitHub settings; every field present.
#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub token: String,
    pub repository: String,
    pub pr_number: u64,
    pub commit_sha: String,
    pub api_url: String,
}

impl GithubConfig {
    /// Check the fatal preconditions and produce resolved settings.
    pub fn resolved(&self) -> Result<GithubSettings, ConfigError> {
        let token = self.token.clone().ok_or(ConfigError::Missing {
            name: "GitHub token",
            env: constants::ENV_GITHUB_TOKEN,
        })?;
        let repository = self.repository.clone().ok_or(ConfigError::Missing {
            name: "repository",
            env: constants::ENV_REPOSITORY,
        })?;
        let pr_number = self.pr_number.ok_or(ConfigError::Missing {
            name: "pull request number",
            env: constants::ENV_PR_NUMBER,
        })?;
        let commit_sha = self.commit_sha.clone().ok_or(ConfigError::Missing {
            name: "head commit SHA",
            env: constants::ENV_COMMIT_SHA,
        })?;

        Ok(GithubSettings {
            token,
            repository,
            pr_number,
            commit_sha,
            api_url: self.api_url.clone(),
        })
    }
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    /// Model for per-file inline reviews.
    pub inline_model: String,
    /// Model for the architectural summary (typically cheaper).
    pub summary_model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("inline_model", &self.inline_model)
            .field("summary_model", &self.summary_model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Anthropic,
            inline_model: "claude-sonnet-4-20250514".to_string(),
            summary_model: "claude-3-5-haiku-latest".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Review behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Maximum inline comments posted per file.
    pub max_comments_per_file: usize,
    /// Seconds to wait before every rate-limited outbound call.
    pub api_delay_secs: f64,
    /// Local checkout used to read full file contents for classification.
    pub workspace: PathBuf,
    /// Filename fragments excluded from review.
    pub exclude_patterns: Vec<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_comments_per_file: constants::MAX_COMMENTS_PER_FILE,
            api_delay_secs: constants::API_DELAY.as_secs_f64(),
            workspace: PathBuf::from("."),
            exclude_patterns: constants::EXCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ReviewConfig {
    /// The inter-call delay as a `Duration`.
    pub fn api_delay(&self) -> Duration {
        Duration::from_secs_f64(self.api_delay_secs.max(0.0))
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, workspace-local config, then applies
    /// environment variable overrides. CLI flags are merged by the caller.
    pub fn load(workspace: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: workspace-local config
        if let Some(root) = workspace {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        // GitHub settings
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.repository.is_some() {
            self.github.repository = other.github.repository;
        }
        if other.github.pr_number.is_some() {
            self.github.pr_number = other.github.pr_number;
        }
        if other.github.commit_sha.is_some() {
            self.github.commit_sha = other.github.commit_sha;
        }
        if other.github.api_url != GithubConfig::default().api_url {
            self.github.api_url = other.github.api_url;
        }

        // Provider settings
        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.inline_model != default_provider.inline_model {
            self.provider.inline_model = other.provider.inline_model;
        }
        if other.provider.summary_model != default_provider.summary_model {
            self.provider.summary_model = other.provider.summary_model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }

        // Review settings
        let default_review = ReviewConfig::default();
        if other.review.max_comments_per_file != default_review.max_comments_per_file {
            self.review.max_comments_per_file = other.review.max_comments_per_file;
        }
        if other.review.api_delay_secs != default_review.api_delay_secs {
            self.review.api_delay_secs = other.review.api_delay_secs;
        }
        if other.review.workspace != default_review.workspace {
            self.review.workspace = other.review.workspace;
        }
        if other.review.exclude_patterns != default_review.exclude_patterns {
            self.review.exclude_patterns = other.review.exclude_patterns;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        // GitHub credentials
        if let Ok(val) = env.var(constants::ENV_GITHUB_TOKEN) {
            self.github.token = Some(val);
        }
        if let Ok(val) = env.var(constants::ENV_REPOSITORY) {
            self.github.repository = Some(val);
        }
        if let Ok(val) = env.var(constants::ENV_PR_NUMBER) {
            match val.parse::<u64>() {
                Ok(n) => self.github.pr_number = Some(n),
                Err(_) => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_PR_NUMBER
                ),
            }
        }
        if let Ok(val) = env.var(constants::ENV_COMMIT_SHA) {
            self.github.commit_sha = Some(val);
        }

        // Provider settings
        if let Ok(val) = env.var(constants::ENV_PROVIDER) {
            if let Ok(name) = val.parse::<ProviderName>() {
                self.provider.name = name;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_PROVIDER
                );
            }
        }
        if let Ok(val) = env.var(constants::ENV_INLINE_MODEL) {
            self.provider.inline_model = val;
        }
        if let Ok(val) = env.var(constants::ENV_SUMMARY_MODEL) {
            self.provider.summary_model = val;
        }
        if let Ok(val) = env.var(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Provider-specific API key resolution
        let api_key = env
            .var(constants::ENV_API_KEY)
            .or_else(|_| env.var(self.provider.name.api_key_env_var()))
            .ok();
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.provider.name, ProviderName::Anthropic);
        assert_eq!(config.provider.inline_model, "claude-sonnet-4-20250514");
        assert_eq!(config.review.max_comments_per_file, 5);
        assert_eq!(config.review.api_delay(), Duration::from_secs(2));
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.github.token.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[github]
repository = "octo/reviewed"
pr_number = 42

[provider]
name = "openai"
inline_model = "gpt-4o"
summary_model = "gpt-4o-mini"

[review]
max_comments_per_file = 3
api_delay_secs = 0.5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.repository.as_deref(), Some("octo/reviewed"));
        assert_eq!(config.github.pr_number, Some(42));
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.inline_model, "gpt-4o");
        assert_eq!(config.provider.summary_model, "gpt-4o-mini");
        assert_eq!(config.review.max_comments_per_file, 3);
        assert_eq!(config.review.api_delay(), Duration::from_millis(500));
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();

        other.github.repository = Some("octo/reviewed".to_string());
        other.provider.name = ProviderName::OpenAI;
        other.provider.inline_model = "gpt-4o".to_string();
        other.provider.api_key = Some("sk-test".to_string());
        other.review.max_comments_per_file = 2;
        other.review.exclude_patterns = vec![".generated.swift".to_string()];

        base.merge(other);

        assert_eq!(base.github.repository.as_deref(), Some("octo/reviewed"));
        assert_eq!(base.provider.name, ProviderName::OpenAI);
        assert_eq!(base.provider.inline_model, "gpt-4o");
        assert_eq!(base.provider.api_key, Some("sk-test".to_string()));
        assert_eq!(base.review.max_comments_per_file, 2);
        assert_eq!(base.review.exclude_patterns, vec![".generated.swift"]);
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.provider.name = ProviderName::OpenAI;
        base.github.pr_number = Some(7);

        base.merge(Config::default());

        assert_eq!(base.provider.name, ProviderName::OpenAI);
        assert_eq!(base.github.pr_number, Some(7));
    }

    #[test]
    fn load_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.toml");
        std::fs::write(
            &path,
            r#"
[provider]
name = "openai"
inline_model = "gpt-4o"
"#,
        )
        .unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.inline_model, "gpt-4o");
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_from_workspace_root() {
        let env = Env::mock(Vec::<(&str, &str)>::new());

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".prvet.toml"),
            r#"
[provider]
name = "openai"
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.provider.name, ProviderName::OpenAI);
    }

    #[test]
    fn apply_env_vars_github_credentials() {
        let env = Env::mock([
            ("GITHUB_TOKEN", "ghp_env"),
            ("GITHUB_REPOSITORY", "octo/reviewed"),
            ("PR_NUMBER", "42"),
            ("PR_HEAD_SHA", "abc1234"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);

        let settings = config.github.resolved().unwrap();
        assert_eq!(settings.token, "ghp_env");
        assert_eq!(settings.repository, "octo/reviewed");
        assert_eq!(settings.pr_number, 42);
        assert_eq!(settings.commit_sha, "abc1234");
    }

    #[test]
    fn apply_env_vars_invalid_pr_number_is_ignored() {
        let env = Env::mock([("PR_NUMBER", "not-a-number")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.github.pr_number, None);
    }

    #[test]
    fn apply_env_vars_provider_and_models() {
        let env = Env::mock([
            ("PRVET_PROVIDER", "openai"),
            ("PRVET_INLINE_MODEL", "gpt-4o"),
            ("PRVET_SUMMARY_MODEL", "gpt-4o-mini"),
            ("PRVET_API_KEY", "sk-env-test"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.inline_model, "gpt-4o");
        assert_eq!(config.provider.summary_model, "gpt-4o-mini");
        assert_eq!(config.provider.api_key, Some("sk-env-test".to_string()));
    }

    #[test]
    fn apply_env_vars_invalid_provider_falls_back() {
        let env = Env::mock([("PRVET_PROVIDER", "not-a-provider")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.name, ProviderName::Anthropic);
    }

    #[test]
    fn apply_env_vars_provider_specific_api_key_fallback() {
        let env = Env::mock([("ANTHROPIC_API_KEY", "sk-anthropic-test")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(
            config.provider.api_key,
            Some("sk-anthropic-test".to_string())
        );
    }

    #[test]
    fn resolved_reports_first_missing_credential() {
        let config = GithubConfig::default();
        let err = config.resolved().unwrap_err().to_string();
        assert!(err.contains("GitHub token"));
        assert!(err.contains("GITHUB_TOKEN"));

        let config = GithubConfig {
            token: Some("t".into()),
            ..Default::default()
        };
        let err = config.resolved().unwrap_err().to_string();
        assert!(err.contains("repository"));

        let config = GithubConfig {
            token: Some("t".into()),
            repository: Some("o/r".into()),
            pr_number: Some(1),
            commit_sha: Some("sha".into()),
            ..Default::default()
        };
        assert!(config.resolved().is_ok());
    }

    #[test]
    fn negative_delay_clamps_to_zero() {
        let review = ReviewConfig {
            api_delay_secs: -1.0,
            ..Default::default()
        };
        assert_eq!(review.api_delay(), Duration::ZERO);
    }
}
