//! App-only session establishment against the tenant token endpoint

use chrono::{DateTime, Duration, Utc};

use super::types::TokenResponse;
use super::GraphEndpoints;
use crate::domain::DirectoryError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Tenant/application credentials for the client-credentials grant
#[derive(Debug, Clone)]
pub struct Credentials {
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let credentials = Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        };

        for (name, value) in [
            ("tenant id", &credentials.tenant_id),
            ("client id", &credentials.client_id),
            ("client secret", &credentials.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(DirectoryError::configuration(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        Ok(credentials)
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

/// Authenticated session handle. Read-only after establishment; `expires_at`
/// is the slot a future refresh implementation hangs off without changing
/// any caller.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: String,
    token_type: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_at,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Acquires an app-only session for the directory API
#[derive(Debug)]
pub struct TokenClient<'a, C: HttpClientTrait> {
    client: &'a C,
    endpoints: &'a GraphEndpoints,
}

impl<'a, C: HttpClientTrait> TokenClient<'a, C> {
    pub fn new(client: &'a C, endpoints: &'a GraphEndpoints) -> Self {
        Self { client, endpoints }
    }

    fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.endpoints.login_base_url, tenant_id
        )
    }

    /// Exchange credentials for a session. Every failure mode except
    /// throttling/transport (which stay retryable) is an auth failure: the
    /// caller treats it as fatal and issues no further calls.
    pub async fn acquire(&self, credentials: &Credentials) -> Result<Session, DirectoryError> {
        let url = self.token_url(&credentials.tenant_id);
        let scope = format!("{}/.default", self.endpoints.graph_base_url);
        let params: [(&str, &str); 4] = [
            ("client_id", &credentials.client_id),
            ("client_secret", &credentials.client_secret),
            ("scope", &scope),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .client
            .post_form(&url, &params)
            .await
            .map_err(|error| match error {
                e @ (DirectoryError::Throttled { .. } | DirectoryError::Network { .. }) => e,
                other => DirectoryError::auth(other.to_string()),
            })?;

        let token: TokenResponse = serde_json::from_value(response)
            .map_err(|e| DirectoryError::auth(format!("Malformed token response: {}", e)))?;

        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        Ok(Session::new(token.access_token, token.token_type, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    fn endpoints() -> GraphEndpoints {
        GraphEndpoints::default()
    }

    fn credentials() -> Credentials {
        Credentials::new("tenant-1", "client-1", "secret-1").unwrap()
    }

    #[test]
    fn test_credentials_reject_empty_inputs() {
        assert!(Credentials::new("", "client", "secret").is_err());
        assert!(Credentials::new("tenant", " ", "secret").is_err());
        assert!(Credentials::new("tenant", "client", "").is_err());
    }

    #[tokio::test]
    async fn test_acquire_builds_a_session() {
        let url = "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token";
        let client = MockHttpClient::new().with_response(
            url,
            serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "tok-abc"
            }),
        );

        let endpoints = endpoints();
        let session = TokenClient::new(&client, &endpoints)
            .acquire(&credentials())
            .await
            .unwrap();

        assert_eq!(session.access_token(), "tok-abc");
        assert_eq!(session.token_type(), "Bearer");
        assert!(session.expires_at() > Utc::now());
    }

    #[tokio::test]
    async fn test_rejected_credentials_map_to_auth_error() {
        let url = "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token";
        let client = MockHttpClient::new()
            .with_error(url, || DirectoryError::api(400, "invalid_client"));

        let endpoints = endpoints();
        let result = TokenClient::new(&client, &endpoints)
            .acquire(&credentials())
            .await;

        assert!(matches!(result, Err(DirectoryError::Auth { .. })));
    }

    #[tokio::test]
    async fn test_transport_faults_stay_transient() {
        let url = "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token";
        let client =
            MockHttpClient::new().with_error(url, || DirectoryError::network("refused"));

        let endpoints = endpoints();
        let result = TokenClient::new(&client, &endpoints)
            .acquire(&credentials())
            .await;

        assert!(matches!(result, Err(DirectoryError::Network { .. })));
    }
}
