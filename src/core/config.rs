use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::ScorePolicy;

/// Resolved settings, passed explicitly to the client and commands
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    /// Results requested per search
    pub top_k: usize,
    /// Ask the backend for diversity (MMR) re-ranking
    pub use_mmr: bool,
    /// No default: callers must pick how scores are read
    pub score_policy: Option<ScorePolicy>,
    /// Hide results scored below this percentage
    pub min_score_pct: Option<f64>,
    pub timeout_secs: u64,
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            top_k: 8,
            use_mmr: false,
            score_policy: None,
            min_score_pct: None,
            timeout_secs: 30,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// The score policy from the command line, else from configuration
    pub fn resolve_policy(&self, flag: Option<ScorePolicy>) -> Result<ScorePolicy> {
        match flag.or(self.score_policy) {
            Some(policy) => Ok(policy),
            None => bail!(
                "No score policy configured: pass --policy absolute|min_max or set score_policy in {}",
                default_config_path().display()
            ),
        }
    }

    pub fn resolve_catalog(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        match flag.or_else(|| self.catalog_path.clone()) {
            Some(path) => Ok(path),
            None => bail!("No vendor catalog: pass --catalog or set catalog_path"),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.join("vendorsearch").join("config.toml")
}

/// Defaults, then the TOML file at `path` if it exists, then `VENDORSEARCH_*`
/// environment variables (e.g. VENDORSEARCH_BACKEND_URL)
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let s = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix("VENDORSEARCH").try_parsing(true))
        .build()
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    s.try_deserialize()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.top_k, AppConfig::default().top_k);
        assert_eq!(config.score_policy, None);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "backend_url = \"http://search.internal:9000\"\ntop_k = 20\nscore_policy = \"min_max\"\nmin_score_pct = 12.5"
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.backend_url, "http://search.internal:9000");
        assert_eq!(config.top_k, 20);
        assert_eq!(config.score_policy, Some(ScorePolicy::MinMax));
        assert_eq!(config.min_score_pct, Some(12.5));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_policy_is_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "score_policy = \"cosine\"").unwrap();
        assert!(load_config_from(file.path()).is_err());
    }

    #[test]
    fn test_resolve_policy() {
        let mut config = AppConfig::default();
        assert!(config.resolve_policy(None).is_err());
        assert_eq!(
            config.resolve_policy(Some(ScorePolicy::Absolute)).unwrap(),
            ScorePolicy::Absolute
        );

        config.score_policy = Some(ScorePolicy::MinMax);
        assert_eq!(config.resolve_policy(None).unwrap(), ScorePolicy::MinMax);
        assert_eq!(
            config.resolve_policy(Some(ScorePolicy::Absolute)).unwrap(),
            ScorePolicy::Absolute
        );
    }
}
