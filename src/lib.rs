pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::postgrest::PostgrestClient;
pub use crate::core::onboarding::OnboardingService;
pub use crate::core::resolver::NicknameResolver;
pub use crate::utils::error::{ProfileError, Result};
