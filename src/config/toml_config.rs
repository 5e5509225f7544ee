use crate::core::resolver::DEFAULT_MAX_ATTEMPTS;
use crate::utils::error::{ProfileError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub directory: DirectoryConfig,
    pub nickname: Option<NicknameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub profiles_table: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicknameConfig {
    pub max_attempts: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ProfileError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders from the environment, so keys
    /// like `api_key = "${SUPABASE_SERVICE_KEY}"` stay out of the file.
    /// Unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn max_attempts(&self) -> usize {
        self.nickname
            .as_ref()
            .and_then(|nickname| nickname.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("directory.url", &self.directory.url)?;
        if let Some(max_attempts) = self.nickname.as_ref().and_then(|n| n.max_attempts) {
            validate_positive_number("nickname.max_attempts", max_attempts, 1)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl TomlConfig {
    /// File settings win over CLI flags for the fields they set.
    pub fn overlay(self, mut cli: crate::config::CliConfig) -> crate::config::CliConfig {
        cli.directory_url = self.directory.url;
        if let Some(api_key) = self.directory.api_key {
            cli.api_key = Some(api_key);
        }
        if let Some(table) = self.directory.profiles_table {
            cli.profiles_table = table;
        }
        if let Some(max_attempts) = self.nickname.as_ref().and_then(|n| n.max_attempts) {
            cli.max_attempts = max_attempts;
        }
        cli
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[directory]
url = "https://example.supabase.co/rest/v1"
"#;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config = TomlConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.directory.url, "https://example.supabase.co/rest/v1");
        assert!(config.directory.api_key.is_none());
        assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_parses() {
        let content = r#"
[directory]
url = "https://example.supabase.co/rest/v1"
api_key = "service-key"
profiles_table = "profiles"

[nickname]
max_attempts = 25
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.directory.api_key.as_deref(), Some("service-key"));
        assert_eq!(config.max_attempts(), 25);
    }

    #[test]
    fn test_env_vars_are_substituted() {
        std::env::set_var("CAMPUS_NOTES_TEST_KEY", "from-env");
        let content = r#"
[directory]
url = "https://example.supabase.co/rest/v1"
api_key = "${CAMPUS_NOTES_TEST_KEY}"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.directory.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let content = r#"
[directory]
url = "https://example.supabase.co/rest/v1"
api_key = "${CAMPUS_NOTES_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(
            config.directory.api_key.as_deref(),
            Some("${CAMPUS_NOTES_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("not valid toml [").unwrap_err();
        assert!(matches!(err, ProfileError::ConfigError { .. }));
    }

    #[test]
    fn test_zero_max_attempts_fails_validation() {
        let content = r#"
[directory]
url = "https://example.supabase.co/rest/v1"

[nickname]
max_attempts = 0
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert!(config.validate().is_err());
    }
}
