use campus_notes::config::toml_config::TomlConfig;
use campus_notes::utils::{logger, validation::Validate};
use campus_notes::{CliConfig, NicknameResolver, OnboardingService, PostgrestClient};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting campus-notes onboarding");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let file_config = match TomlConfig::from_file(&path) {
            Ok(file_config) => file_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        };
        config = file_config.overlay(config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let directory = PostgrestClient::from_config(&config);
    let resolver = NicknameResolver::with_max_attempts(directory.clone(), config.max_attempts);
    let service = OnboardingService::new(directory, resolver);

    match service
        .ensure_profile(&config.user_id, config.email.as_deref())
        .await
    {
        Ok(result) => {
            if result.created {
                tracing::info!(
                    "✅ Created profile '{}' for {}",
                    result.profile.handle,
                    config.user_id
                );
            } else {
                tracing::info!("✅ Profile '{}' already exists", result.profile.handle);
            }
            println!("handle: {}", result.profile.handle);
            println!(
                "display_name: {}",
                result.profile.display_name.as_deref().unwrap_or("-")
            );
            println!("onboarding_complete: {}", result.profile.onboarding_complete);
        }
        Err(e) => {
            tracing::error!("❌ Onboarding failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
