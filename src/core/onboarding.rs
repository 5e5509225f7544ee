use crate::core::resolver::NicknameResolver;
use crate::domain::model::{NewProfile, OnboardingResult, Profile};
use crate::domain::ports::{NicknameDirectory, ProfileStore};
use crate::utils::error::{ProfileError, Result};
use rand::Rng;
use regex::Regex;

const HANDLE_BASE_MAX_LEN: usize = 24;
const HANDLE_MAX_LEN: usize = 32;
const CREATE_PROFILE_ATTEMPTS: usize = 3;
const SUFFIX_LEN: usize = 4;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Derives the handle base from the local part of the account email,
/// lowercased and restricted to `[a-z0-9_]`. Bases shorter than 3 chars
/// fall back to a user-id derived one. Capped at 24 chars.
pub fn derive_handle_base(email: Option<&str>, user_id: &str) -> String {
    let local_part = email
        .and_then(|address| address.split('@').next())
        .unwrap_or("user");

    let allowed = Regex::new(r"[^a-z0-9_]").unwrap();
    let cleaned = allowed
        .replace_all(&local_part.to_lowercase(), "")
        .to_string();

    let base = if cleaned.len() >= 3 {
        cleaned
    } else {
        format!("user_{}", user_id.chars().take(6).collect::<String>())
    };

    base.chars().take(HANDLE_BASE_MAX_LEN).collect()
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// First-login flow: makes sure the authenticated identity has a profile
/// row, creating one with a derived handle and a generated display name
/// when missing.
pub struct OnboardingService<S: ProfileStore, D: NicknameDirectory> {
    store: S,
    resolver: NicknameResolver<D>,
}

impl<S: ProfileStore, D: NicknameDirectory> OnboardingService<S, D> {
    pub fn new(store: S, resolver: NicknameResolver<D>) -> Self {
        Self { store, resolver }
    }

    /// Fetches the profile for `user_id`, creating it on first login.
    /// Existing profiles with no display name get one backfilled,
    /// best-effort. Fetch failures other than "no rows" propagate.
    pub async fn ensure_profile(
        &self,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<OnboardingResult> {
        match self.store.fetch_profile(user_id).await? {
            Some(profile) => {
                let profile = self.backfill_display_name(profile).await;
                Ok(OnboardingResult {
                    profile,
                    created: false,
                })
            }
            None => {
                tracing::info!("No profile for {}, creating one", user_id);
                let profile = self.create_profile_with_defaults(user_id, email).await?;
                Ok(OnboardingResult {
                    profile,
                    created: true,
                })
            }
        }
    }

    /// Inserts a profile with a derived handle. A unique violation on the
    /// handle gets a fresh random suffix and another try, up to 3 attempts;
    /// any other insert error aborts the flow.
    async fn create_profile_with_defaults(
        &self,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<Profile> {
        let base = derive_handle_base(email, user_id);
        let mut last_conflict = None;

        for attempt in 0..CREATE_PROFILE_ATTEMPTS {
            let handle = if attempt == 0 {
                base.clone()
            } else {
                format!("{}_{}", base, random_suffix())
            };
            let handle: String = handle.chars().take(HANDLE_MAX_LEN).collect();

            // Profile creation must not block on the nickname: a failed
            // generation leaves the display name empty for later backfill.
            let display_name = match self.resolver.resolve().await {
                Ok(nickname) => Some(nickname),
                Err(e) => {
                    tracing::error!("Failed to generate display name: {}", e);
                    None
                }
            };

            let new_profile = NewProfile {
                id: user_id.to_string(),
                handle: handle.clone(),
                campus_email: email.map(str::to_string),
                display_name,
                onboarding_complete: false,
            };

            match self.store.insert_profile(&new_profile).await {
                Ok(profile) => return Ok(profile),
                Err(ProfileError::CreationConflictError { message }) => {
                    tracing::warn!(
                        "Handle '{}' already taken, retrying... (attempt {}/{})",
                        handle,
                        attempt + 1,
                        CREATE_PROFILE_ATTEMPTS
                    );
                    last_conflict = Some(ProfileError::CreationConflictError { message });
                }
                Err(e) => return Err(e),
            }
        }

        Err(
            last_conflict.unwrap_or_else(|| ProfileError::CreationError {
                message: "Failed to create profile".to_string(),
            }),
        )
    }

    /// Best-effort: older profiles may predate display names. Neither a
    /// generation failure nor an update failure blocks the flow.
    async fn backfill_display_name(&self, mut profile: Profile) -> Profile {
        if profile.display_name.is_some() {
            return profile;
        }

        match self.resolver.resolve().await {
            Ok(nickname) => match self
                .store
                .update_display_name(&profile.id, &nickname)
                .await
            {
                Ok(()) => {
                    tracing::info!("Backfilled display name for {}", profile.id);
                    profile.display_name = Some(nickname);
                }
                Err(e) => {
                    tracing::error!("Failed to backfill display name: {}", e);
                }
            },
            Err(e) => {
                tracing::error!("Failed to generate display name for backfill: {}", e);
            }
        }

        profile
    }
}
