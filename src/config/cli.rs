use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-notes")]
#[command(about = "Profile onboarding tool for the campus notes backend")]
pub struct CliConfig {
    /// Base URL of the profile directory's REST endpoint
    #[arg(long, default_value = "http://localhost:54321/rest/v1")]
    pub directory_url: String,

    /// Service key, sent as both apikey and bearer headers
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "profiles")]
    pub profiles_table: String,

    /// Nickname generation attempts before giving up
    #[arg(long, default_value = "10")]
    pub max_attempts: usize,

    /// Authenticated user id to onboard
    #[arg(long)]
    pub user_id: String,

    /// Account email, used to derive the handle
    #[arg(long)]
    pub email: Option<String>,

    /// TOML file overriding the directory settings
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn directory_url(&self) -> &str {
        &self.directory_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn profiles_table(&self) -> &str {
        &self.profiles_table
    }

    fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("directory_url", &self.directory_url)?;
        validate_non_empty_string("profiles_table", &self.profiles_table)?;
        validate_positive_number("max_attempts", self.max_attempts, 1)?;
        validate_non_empty_string("user_id", &self.user_id)?;
        Ok(())
    }
}
