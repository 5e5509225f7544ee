use crate::domain::model::{LookupOutcome, NewProfile, Profile};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait NicknameDirectory: Send + Sync {
    /// Reports whether any profile already uses `handle`.
    async fn lookup_handle(&self, handle: &str) -> Result<LookupOutcome>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>>;
    async fn insert_profile(&self, profile: &NewProfile) -> Result<Profile>;
    async fn update_display_name(&self, user_id: &str, display_name: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn directory_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn profiles_table(&self) -> &str;
    fn max_attempts(&self) -> usize;
}
