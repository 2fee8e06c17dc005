use crate::core::{ConfigProvider, InitMode};
use crate::utils::error::{MapperError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECONDS: u64 = 30;
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub datasource: DatasourceConfig,
    pub init: Option<InitConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub acquire_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    pub mode: Option<InitMode>,
    pub schema: Option<Vec<String>>,
    pub data: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapperError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MapperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapperError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        super::validate_datasource_settings(
            "datasource.",
            &self.datasource.url,
            self.max_connections(),
            self.acquire_timeout_seconds(),
        )?;

        validation::validate_file_extensions(
            "init.schema",
            self.schema_locations(),
            super::SCRIPT_EXTENSIONS,
        )?;
        validation::validate_file_extensions(
            "init.data",
            self.data_locations(),
            super::SCRIPT_EXTENSIONS,
        )?;

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(MapperError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn database_url(&self) -> &str {
        &self.datasource.url
    }

    fn max_connections(&self) -> u32 {
        self.datasource
            .max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    fn acquire_timeout_seconds(&self) -> u64 {
        self.datasource
            .acquire_timeout_seconds
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECONDS)
    }

    fn init_mode(&self) -> InitMode {
        self.init
            .as_ref()
            .and_then(|init| init.mode)
            .unwrap_or_default()
    }

    fn schema_locations(&self) -> &[String] {
        self.init
            .as_ref()
            .and_then(|init| init.schema.as_deref())
            .unwrap_or(&[])
    }

    fn data_locations(&self) -> &[String] {
        self.init
            .as_ref()
            .and_then(|init| init.data.as_deref())
            .unwrap_or(&[])
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[datasource]
url = "sqlite://cities.db"
max_connections = 8
acquire_timeout_seconds = 10

[init]
mode = "always"
schema = ["sql/schema.sql"]
data = ["sql/data.sql", "sql/more.sql"]

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.database_url(), "sqlite://cities.db");
        assert_eq!(config.max_connections(), 8);
        assert_eq!(config.acquire_timeout_seconds(), 10);
        assert_eq!(config.init_mode(), InitMode::Always);
        assert_eq!(config.schema_locations(), ["sql/schema.sql"]);
        assert_eq!(config.data_locations().len(), 2);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite::memory:"
"#,
        )
        .unwrap();

        assert_eq!(config.max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout_seconds(), DEFAULT_ACQUIRE_TIMEOUT_SECONDS);
        assert_eq!(config.init_mode(), InitMode::Embedded);
        assert!(config.schema_locations().is_empty());
        assert!(config.data_locations().is_empty());
        assert_eq!(config.log_level(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CITY_MAPPER_TEST_DIR", "/tmp/cities");

        let config = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite://${CITY_MAPPER_TEST_DIR}/cities.db"
"#,
        )
        .unwrap();

        assert_eq!(config.database_url(), "sqlite:///tmp/cities/cities.db");
    }

    #[test]
    fn test_unknown_env_var_left_intact() {
        let config = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite://${CITY_MAPPER_SURELY_UNSET_VAR}/cities.db"
"#,
        )
        .unwrap();

        assert_eq!(
            config.database_url(),
            "sqlite://${CITY_MAPPER_SURELY_UNSET_VAR}/cities.db"
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_mode = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite::memory:"

[init]
mode = "sometimes"
"#,
        );
        assert!(matches!(
            bad_mode,
            Err(MapperError::ConfigValidationError { .. })
        ));

        let bad_level = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite::memory:"

[logging]
level = "loud"
"#,
        )
        .unwrap();
        assert!(bad_level.validate().is_err());

        let bad_pool = TomlConfig::from_toml_str(
            r#"
[datasource]
url = "sqlite::memory:"
max_connections = 0
"#,
        )
        .unwrap();
        assert!(bad_pool.validate().is_err());
    }

    #[test]
    fn test_missing_datasource_section() {
        let result = TomlConfig::from_toml_str("[logging]\nlevel = \"info\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[datasource]\nurl = \"sqlite::memory:\"\n\n[init]\nmode = \"never\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.init_mode(), InitMode::Never);

        assert!(matches!(
            TomlConfig::from_file("does-not-exist.toml"),
            Err(MapperError::IoError(_))
        ));
    }
}
