use crate::core::{ConfigProvider, LookupOutcome, NewProfile, NicknameDirectory, Profile, ProfileStore};
use crate::utils::error::{ProfileError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

/// PostgREST's "no rows returned" code; the single-object Accept header
/// turns an empty result into this error, which here means "available".
const NO_ROWS_CODE: &str = "PGRST116";
/// Postgres unique-violation SQLSTATE, surfaced verbatim by PostgREST.
const UNIQUE_VIOLATION_CODE: &str = "23505";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Talks to the managed backend's PostgREST endpoint for the profiles
/// table, implementing both the existence-check and profile-store ports.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    base_url: String,
    api_key: Option<String>,
    table: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl PostgrestClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            table: table.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.directory_url(),
            config.api_key().map(str::to_string),
            config.profiles_table(),
        )
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    /// Pulls the PostgREST error code and a printable detail out of a
    /// failed response. Unparseable bodies degrade to status + raw text.
    async fn read_error(response: Response) -> (Option<String>, String) {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => {
                let message = body.message.unwrap_or_else(|| text.clone());
                (body.code, format!("{}: {}", status, message))
            }
            Err(_) => (None, format!("{}: {}", status, text)),
        }
    }
}

#[async_trait]
impl NicknameDirectory for PostgrestClient {
    async fn lookup_handle(&self, handle: &str) -> Result<LookupOutcome> {
        tracing::debug!("Checking handle availability: {}", handle);

        let filter = format!("eq.{}", handle);
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "handle"), ("handle", filter.as_str())])
            .header("Accept", SINGLE_OBJECT);
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            return Ok(LookupOutcome::Found);
        }

        let (code, detail) = Self::read_error(response).await;
        if code.as_deref() == Some(NO_ROWS_CODE) {
            return Ok(LookupOutcome::NotFound);
        }

        Err(ProfileError::VerificationError { message: detail })
    }
}

#[async_trait]
impl ProfileStore for PostgrestClient {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let filter = format!("eq.{}", user_id);
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header("Accept", SINGLE_OBJECT);
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            let profile = response.json::<Profile>().await?;
            return Ok(Some(profile));
        }

        let (code, detail) = Self::read_error(response).await;
        if code.as_deref() == Some(NO_ROWS_CODE) {
            return Ok(None);
        }

        Err(ProfileError::QueryError { message: detail })
    }

    async fn insert_profile(&self, profile: &NewProfile) -> Result<Profile> {
        tracing::debug!("Inserting profile with handle: {}", profile.handle);

        let request = self
            .client
            .post(self.table_url())
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(profile);
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            let created = response.json::<Profile>().await?;
            return Ok(created);
        }

        let (code, detail) = Self::read_error(response).await;
        if code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
            return Err(ProfileError::CreationConflictError { message: detail });
        }

        Err(ProfileError::CreationError { message: detail })
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> Result<()> {
        let filter = format!("eq.{}", user_id);
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "display_name": display_name }));
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        let (_, detail) = Self::read_error(response).await;
        Err(ProfileError::QueryError { message: detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> PostgrestClient {
        PostgrestClient::new(server.base_url(), None, "profiles")
    }

    #[tokio::test]
    async fn test_lookup_existing_handle_reports_found() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/profiles")
                .query_param("select", "handle")
                .query_param("handle", "eq.SwiftTiger42");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "handle": "SwiftTiger42" }));
        });

        let outcome = client(&server).lookup_handle("SwiftTiger42").await.unwrap();

        lookup_mock.assert();
        assert_eq!(outcome, LookupOutcome::Found);
    }

    #[tokio::test]
    async fn test_lookup_no_rows_reports_not_found() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET).path("/profiles");
            then.status(406).json_body(serde_json::json!({
                "code": "PGRST116",
                "message": "JSON object requested, multiple (or no) rows returned"
            }));
        });

        let outcome = client(&server).lookup_handle("SwiftTiger42").await.unwrap();

        lookup_mock.assert();
        assert_eq!(outcome, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_server_error_is_not_availability() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/profiles");
            then.status(500).json_body(serde_json::json!({
                "code": "XX000",
                "message": "internal error"
            }));
        });

        let err = client(&server).lookup_handle("SwiftTiger42").await.unwrap_err();

        match err {
            ProfileError::VerificationError { message } => {
                assert!(message.contains("internal error"));
            }
            other => panic!("expected verification error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_sends_service_key_headers() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/profiles")
                .header("apikey", "secret-key")
                .header("authorization", "Bearer secret-key");
            then.status(406)
                .json_body(serde_json::json!({ "code": "PGRST116", "message": "no rows" }));
        });

        let client = PostgrestClient::new(server.base_url(), Some("secret-key".to_string()), "profiles");
        let outcome = client.lookup_handle("SwiftTiger42").await.unwrap();

        lookup_mock.assert();
        assert_eq!(outcome, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_profile_maps_no_rows_to_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/profiles").query_param("id", "eq.user-1");
            then.status(406)
                .json_body(serde_json::json!({ "code": "PGRST116", "message": "no rows" }));
        });

        let profile = client(&server).fetch_profile("user-1").await.unwrap();

        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn test_insert_unique_violation_maps_to_conflict() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST).path("/profiles");
            then.status(409).json_body(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"profiles_handle_key\""
            }));
        });

        let new_profile = NewProfile {
            id: "user-1".to_string(),
            handle: "jane".to_string(),
            campus_email: None,
            display_name: None,
            onboarding_complete: false,
        };
        let err = client(&server).insert_profile(&new_profile).await.unwrap_err();

        insert_mock.assert();
        assert!(matches!(err, ProfileError::CreationConflictError { .. }));
    }

    #[tokio::test]
    async fn test_insert_other_error_maps_to_creation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/profiles");
            then.status(403).json_body(serde_json::json!({
                "code": "42501",
                "message": "permission denied for table profiles"
            }));
        });

        let new_profile = NewProfile {
            id: "user-1".to_string(),
            handle: "jane".to_string(),
            campus_email: None,
            display_name: None,
            onboarding_complete: false,
        };
        let err = client(&server).insert_profile(&new_profile).await.unwrap_err();

        assert!(matches!(err, ProfileError::CreationError { .. }));
    }
}
