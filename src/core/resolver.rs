use crate::core::nickname::generate_nickname;
use crate::domain::model::LookupOutcome;
use crate::domain::ports::NicknameDirectory;
use crate::utils::error::{ProfileError, Result};

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Resolves a nickname nobody else holds yet by generating candidates and
/// checking each one against the directory, one lookup at a time.
///
/// The directory's unique constraint stays the authority of record: two
/// concurrent resolutions can both pass the check for the same candidate,
/// and the write layer handles that collision.
pub struct NicknameResolver<D: NicknameDirectory> {
    directory: D,
    max_attempts: usize,
}

impl<D: NicknameDirectory> NicknameResolver<D> {
    pub fn new(directory: D) -> Self {
        Self::with_max_attempts(directory, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(directory: D, max_attempts: usize) -> Self {
        Self {
            directory,
            max_attempts,
        }
    }

    /// Returns a nickname that was unused at check time, or
    /// `ExhaustionError` once the attempt budget runs out.
    ///
    /// A lookup failure is not availability: the candidate is discarded and
    /// the attempt still counts.
    pub async fn resolve(&self) -> Result<String> {
        for attempt in 0..self.max_attempts {
            let candidate = generate_nickname();

            match self.directory.lookup_handle(&candidate).await {
                Ok(LookupOutcome::NotFound) => return Ok(candidate),
                Ok(LookupOutcome::Found) => {
                    tracing::debug!(
                        "Nickname collision: {}, retrying... (attempt {}/{})",
                        candidate,
                        attempt + 1,
                        self.max_attempts
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not verify nickname {} (attempt {}/{}): {}",
                        candidate,
                        attempt + 1,
                        self.max_attempts,
                        e
                    );
                }
            }
        }

        Err(ProfileError::ExhaustionError {
            max_attempts: self.max_attempts,
        })
    }
}
