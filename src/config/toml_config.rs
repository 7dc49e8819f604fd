use crate::core::{ConfigProvider, UserCredential};
use crate::utils::error::{Result, TaxError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const AUTH_SOURCES: [&str; 2] = ["static", "database"];

/// Everything the collaborators need, passed in at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./TaxCalculationDB.sqlite".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// `static` checks the pair below; `database` checks the Users table.
    pub source: String,
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            source: "static".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| TaxError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TaxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TAXDESK_PASSWORD})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TaxError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for AppConfig {
    fn database_path(&self) -> &str {
        &self.database.path
    }

    fn credential(&self) -> UserCredential {
        UserCredential::new(&self.auth.username, &self.auth.password)
    }

    fn auth_source(&self) -> &str {
        &self.auth.source
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("database.path", &self.database.path)?;
        validation::validate_non_empty_string("auth.username", &self.auth.username)?;
        validation::validate_non_empty_string("auth.password", &self.auth.password)?;
        validation::validate_one_of("auth.source", &self.auth.source, &AUTH_SOURCES)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_seed_user() {
        let config = AppConfig::default();
        assert_eq!(config.credential(), UserCredential::new("admin", "admin123"));
        assert_eq!(config.database_path(), "./TaxCalculationDB.sqlite");
        assert_eq!(config.auth_source(), "static");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[database]
path = "/var/lib/taxdesk/tax.sqlite"

[auth]
username = "clerk"
password = "s3cret"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database.path, "/var/lib/taxdesk/tax.sqlite");
        assert_eq!(config.auth.username, "clerk");
        assert_eq!(config.auth.password, "s3cret");
        assert_eq!(config.auth.source, "static");
        assert!(!config.logging.verbose);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TAXDESK_TEST_PASSWORD", "from-env");

        let toml_content = r#"
[auth]
password = "${TAXDESK_TEST_PASSWORD}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.auth.password, "from-env");

        std::env::remove_var("TAXDESK_TEST_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = AppConfig::from_toml_str(
            r#"
[database]
path = "${TAXDESK_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.database.path, "${TAXDESK_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[auth]
source = "ldap"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[auth]
username = "   "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = AppConfig::from_toml_str("[database\npath = 1").unwrap_err();
        assert!(matches!(err, TaxError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nverbose = true\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert!(config.logging.verbose);
        assert_eq!(config.auth.username, "admin");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::from_file("/definitely/not/here/taxdesk.toml").unwrap_err();
        assert!(matches!(err, TaxError::ConfigError { .. }));
    }
}
