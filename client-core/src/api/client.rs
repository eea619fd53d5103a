//! API client for the shared care backend.
//!
//! Stateless and cheap to clone. The bearer token is passed per call by
//! whoever owns the session, and every response body is validated into
//! its typed shape here - nothing downstream touches raw JSON.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use shared::{
    ApiErrorBody, AuthPayload, AuthResponse, Caregiver, CaregiverListResponse, CaregiverResponse,
    CareRequest, CareRequestListResponse, CareRequestResponse, Child, ChildListResponse,
    ChildResponse, CreateCareRequest, CreateChildRequest, GrowthRecordRequest, HealthResponse,
    LoginRequest, RegisterCaregiverRequest, RegisterRequest,
};

use crate::errors::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound for any single request; a late response surfaces as
    /// an error, never as a late state change.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// API client for communicating with the backend server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from connection settings.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::from_reqwest)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for a base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let response: AuthResponse = self.post_json("/auth/login", None, request).await?;
        normalize_auth(response)
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let response: AuthResponse = self.post_json("/auth/register", None, request).await?;
        normalize_auth(response)
    }

    /// `GET /children`
    pub async fn list_children(&self, token: &str) -> Result<Vec<Child>, ApiError> {
        let response: ChildListResponse = self.get_json("/children", Some(token)).await?;
        Ok(response.children)
    }

    /// `POST /children`
    pub async fn create_child(
        &self,
        token: &str,
        request: &CreateChildRequest,
    ) -> Result<Child, ApiError> {
        let response: ChildResponse = self.post_json("/children", Some(token), request).await?;
        Ok(response.child)
    }

    /// `POST /children/:id/growth`
    pub async fn record_growth(
        &self,
        token: &str,
        child_id: i64,
        request: &GrowthRecordRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/children/{}/growth", child_id);
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        // The growth endpoint is an acknowledgement; the body is not read.
        Self::expect_success(response).await
    }

    /// `GET /caregivers`
    pub async fn list_caregivers(&self, token: &str) -> Result<Vec<Caregiver>, ApiError> {
        let response: CaregiverListResponse = self.get_json("/caregivers", Some(token)).await?;
        Ok(response.caregivers)
    }

    /// `POST /caregivers/register`
    pub async fn register_caregiver(
        &self,
        token: &str,
        request: &RegisterCaregiverRequest,
    ) -> Result<Caregiver, ApiError> {
        let response: CaregiverResponse = self
            .post_json("/caregivers/register", Some(token), request)
            .await?;
        Ok(response.caregiver)
    }

    /// `GET /care-requests`
    pub async fn list_care_requests(&self, token: &str) -> Result<Vec<CareRequest>, ApiError> {
        let response: CareRequestListResponse =
            self.get_json("/care-requests", Some(token)).await?;
        Ok(response.care_requests)
    }

    /// `POST /care-requests`
    pub async fn create_care_request(
        &self,
        token: &str,
        request: &CreateCareRequest,
    ) -> Result<CareRequest, ApiError> {
        let response: CareRequestResponse =
            self.post_json("/care-requests", Some(token), request).await?;
        Ok(response.care_request)
    }

    /// `GET /health` - backend reachability probe.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("/health", None).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let mut request = self.http.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }
        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(())
    }

    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = body.detail().unwrap_or("request failed").to_string();
        warn!(status = status.as_u16(), %message, "backend rejected request");
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Collapse the two observed auth response shapes into one payload,
/// rejecting envelopes that carry no session.
fn normalize_auth(response: AuthResponse) -> Result<AuthPayload, ApiError> {
    match response {
        AuthResponse::Bare(payload) => Ok(payload),
        AuthResponse::Enveloped(envelope) => {
            if !envelope.success {
                let reason = envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "authentication failed".to_string());
                return Err(ApiError::Rejected(reason));
            }
            envelope
                .data
                .ok_or_else(|| ApiError::Decode("auth envelope carried no token or user".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AuthEnvelope, User};

    fn payload() -> AuthPayload {
        AuthPayload {
            token: "t0ken".to_string(),
            user: User {
                id: "7".to_string(),
                name: "Parent User".to_string(),
                email: "p@example.com".to_string(),
                telephone: "+9477123456".to_string(),
            },
        }
    }

    #[test]
    fn test_normalize_accepts_bare_payload() {
        let result = normalize_auth(AuthResponse::Bare(payload())).unwrap();
        assert_eq!(result.token, "t0ken");
    }

    #[test]
    fn test_normalize_accepts_successful_envelope() {
        let response = AuthResponse::Enveloped(AuthEnvelope {
            success: true,
            data: Some(payload()),
            message: None,
            error: None,
        });
        let result = normalize_auth(response).unwrap();
        assert_eq!(result.user.id, "7");
    }

    #[test]
    fn test_normalize_rejects_failed_envelope_with_reason() {
        let response = AuthResponse::Enveloped(AuthEnvelope {
            success: false,
            data: None,
            message: None,
            error: Some("Invalid credentials".to_string()),
        });
        match normalize_auth(response) {
            Err(ApiError::Rejected(reason)) => assert_eq!(reason, "Invalid credentials"),
            other => panic!("unexpected result: {:?}", other.map(|p| p.token)),
        }
    }

    #[test]
    fn test_normalize_flags_success_envelope_without_data() {
        let response = AuthResponse::Enveloped(AuthEnvelope {
            success: true,
            data: None,
            message: None,
            error: None,
        });
        assert!(matches!(normalize_auth(response), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
