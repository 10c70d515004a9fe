use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
}

/// How queries reach the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program that reads a query on stdin and prints its result.
    pub program: String,
    pub args: Vec<String>,
    /// Run when a session opens and again when it closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_query: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "cypher-shell".to_string(),
            args: vec!["--format".to_string(), "plain".to_string()],
            reset_query: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the engine command line
        config.engine.program = Self::expand(&config.engine.program);
        config.engine.args = config.engine.args.iter().map(|a| Self::expand(a)).collect();

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/cypherdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand(value: &str) -> String {
        match shellexpand::full(value) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/cypherdoc/config.toml"));
    }

    #[test]
    fn test_default_engine_is_cypher_shell() {
        let config = Config::default();

        assert_eq!(config.engine.program, "cypher-shell");
        assert_eq!(config.engine.args, vec!["--format", "plain"]);
        assert!(config.engine.reset_query.is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            engine: EngineConfig {
                program: "/opt/neo4j/bin/cypher-shell".to_string(),
                args: vec!["-u".to_string(), "neo4j".to_string()],
                reset_query: Some("MATCH (n) DETACH DELETE n".to_string()),
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[engine]\nreset_query = \"MATCH (n) DELETE n\"\n").unwrap();

        assert_eq!(config.engine.program, "cypher-shell");
        assert_eq!(config.engine.reset_query.as_deref(), Some("MATCH (n) DELETE n"));

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_expand_with_tilde() {
        let expanded = Config::expand("~/bin/cypher-shell");

        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("bin/cypher-shell"));
    }

    #[test]
    fn test_expand_with_env_var() {
        unsafe {
            env::set_var("CYPHERDOC_TEST_NEO4J_HOME", "/test/neo4j");
        }

        assert_eq!(
            Config::expand("$CYPHERDOC_TEST_NEO4J_HOME/bin/cypher-shell"),
            "/test/neo4j/bin/cypher-shell"
        );

        unsafe {
            env::remove_var("CYPHERDOC_TEST_NEO4J_HOME");
        }
    }

    #[test]
    fn test_expand_keeps_value_on_unknown_variable() {
        let raw = "$CYPHERDOC_TEST_SURELY_UNSET_VAR/cypher-shell";

        assert_eq!(Config::expand(raw), raw);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[engine]\nargs = \"not a list\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            engine: EngineConfig {
                program: "cat".to_string(),
                args: vec![],
                reset_query: None,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_loaded_args_are_expanded() {
        unsafe {
            env::set_var("CYPHERDOC_TEST_DB_USER", "reader");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[engine]\nprogram = \"cypher-shell\"\nargs = [\"-u\", \"$CYPHERDOC_TEST_DB_USER\"]\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.engine.args, vec!["-u", "reader"]);

        unsafe {
            env::remove_var("CYPHERDOC_TEST_DB_USER");
        }
    }
}
