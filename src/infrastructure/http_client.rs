use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DirectoryError;

/// Outcome of a DELETE: the resource was deleted, or it was already gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        bearer: &str,
    ) -> Result<serde_json::Value, DirectoryError>;

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, DirectoryError>;

    /// DELETE with a distinguishable not-found result
    async fn delete(&self, url: &str, bearer: &str) -> Result<DeleteOutcome, DirectoryError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, DirectoryError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DirectoryError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        bearer: &str,
    ) -> Result<serde_json::Value, DirectoryError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| DirectoryError::network(format!("Failed to parse response: {}", e)))
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, DirectoryError> {
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| DirectoryError::network(format!("Failed to parse response: {}", e)))
    }

    async fn delete(&self, url: &str, bearer: &str) -> Result<DeleteOutcome, DirectoryError> {
        let response = self
            .client
            .delete(url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::NotFound);
        }

        check_status(response).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectoryError {
    DirectoryError::network(format!("Request failed: {}", error))
}

/// Map non-success statuses onto the error taxonomy, pulling the message out
/// of the OData error body when there is one
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs);

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    match status.as_u16() {
        401 => Err(DirectoryError::auth(message)),
        403 => Err(DirectoryError::permission_denied(message)),
        429 => Err(DirectoryError::throttled(retry_after, message)),
        code => Err(DirectoryError::api(code, message)),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            // Token endpoint errors use `error_description`, OData uses `error.message`
            error
                .get("message")
                .or_else(|| v.get("error_description"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no response body".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    use super::*;

    type ErrorFactory = fn() -> DirectoryError;

    /// Scripted HTTP client keyed by URL, recording request order
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, Vec<serde_json::Value>>>,
        delete_outcomes: RwLock<HashMap<String, DeleteOutcome>>,
        errors: RwLock<HashMap<String, ErrorFactory>>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses
                .write()
                .unwrap()
                .entry(url.into())
                .or_default()
                .push(response);
            self
        }

        pub fn with_delete_outcome(self, url: impl Into<String>, outcome: DeleteOutcome) -> Self {
            self.delete_outcomes
                .write()
                .unwrap()
                .insert(url.into(), outcome);
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: ErrorFactory) -> Self {
            self.errors.write().unwrap().insert(url.into(), error);
            self
        }

        fn record(&self, method: &str, url: &str) {
            self.requests
                .lock()
                .unwrap()
                .push(format!("{} {}", method, url));
        }

        fn next_response(&self, url: &str) -> Result<serde_json::Value, DirectoryError> {
            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(error());
            }

            let mut responses = self.responses.write().unwrap();
            let queue = responses.get_mut(url).ok_or_else(|| {
                DirectoryError::api(500, format!("No mock response for {}", url))
            })?;

            // Consume queued responses in order, keep replaying the last one
            if queue.len() > 1 {
                Ok(queue.remove(0))
            } else {
                queue
                    .first()
                    .cloned()
                    .ok_or_else(|| DirectoryError::api(500, format!("No mock response for {}", url)))
            }
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn get_json(
            &self,
            url: &str,
            _bearer: &str,
        ) -> Result<serde_json::Value, DirectoryError> {
            self.record("GET", url);
            self.next_response(url)
        }

        async fn post_form(
            &self,
            url: &str,
            _params: &[(&str, &str)],
        ) -> Result<serde_json::Value, DirectoryError> {
            self.record("POST", url);
            self.next_response(url)
        }

        async fn delete(&self, url: &str, _bearer: &str) -> Result<DeleteOutcome, DirectoryError> {
            self.record("DELETE", url);

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(error());
            }

            Ok(self
                .delete_outcomes
                .read()
                .unwrap()
                .get(url)
                .copied()
                .unwrap_or(DeleteOutcome::Deleted))
        }
    }

    #[test]
    fn test_error_message_prefers_odata_body() {
        let body = r#"{"error":{"code":"Authorization_RequestDenied","message":"Insufficient privileges"}}"#;
        assert_eq!(error_message(body), "Insufficient privileges");
        assert_eq!(error_message("plain text"), "plain text");
        assert_eq!(error_message(""), "no response body");
    }
}
