pub mod nickname;
pub mod onboarding;
pub mod resolver;

pub use crate::domain::model::{LookupOutcome, NewProfile, OnboardingResult, Profile};
pub use crate::domain::ports::{ConfigProvider, NicknameDirectory, ProfileStore};
pub use crate::utils::error::Result;
