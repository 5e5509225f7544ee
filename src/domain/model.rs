use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A profile row as the directory returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub handle: String,
    pub campus_email: Option<String>,
    pub display_name: Option<String>,
    pub onboarding_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a profile; the directory fills in the rest.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: String,
    pub handle: String,
    pub campus_email: Option<String>,
    pub display_name: Option<String>,
    pub onboarding_complete: bool,
}

/// Outcome of an existence check against the directory. Errors are carried
/// separately so an ambiguous failure is never mistaken for availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct OnboardingResult {
    pub profile: Profile,
    pub created: bool,
}
