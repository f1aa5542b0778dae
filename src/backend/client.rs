use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{
    BackendMessage, ClientAccount, DashboardMetrics, EnrollmentQuoteRequest,
    EnrollmentQuoteResponse, OutboundMessage, PortalRole, ProfileUpdate, RevenueMetrics,
    SettingsUpdate,
};
use crate::accounts::{validate_ein, validate_password, CredentialError};
use crate::config::BackendConfig;
use crate::directory::ProviderListing;
use crate::roster::EmployeeRecord;
use crate::workflows::enrollment::{
    EnrollmentGateway, EnrollmentReceipt, EnrollmentRequest, GatewayError,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Bearer token as persisted by the login flow, if any.
pub trait TokenStore: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Token source for deployments where the token is fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenStore {
    token: Option<String>,
}

impl StaticTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl TokenStore for StaticTokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Error raised by the backend client. Endpoint failures carry a fixed
/// message per endpoint; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to build the backend http client: {0}")]
    ClientBuild(String),
    #[error("{endpoint} request failed")]
    Endpoint { endpoint: &'static str },
    #[error("{endpoint} request could not be sent: {detail}")]
    Transport {
        endpoint: &'static str,
        detail: String,
    },
    #[error("{endpoint} response could not be decoded: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Thin wrapper over the brokerage REST backend: attaches the bearer token
/// and JSON headers, checks the status, and decodes the body.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl BackendClient {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|err| BackendError::ClientBuild(err.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(
            config.base_url.clone(),
            Arc::new(StaticTokenStore::new(config.api_token.clone())),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| BackendError::Transport {
                endpoint,
                detail: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BackendError::Endpoint { endpoint });
        }

        response.json().await.map_err(|err| BackendError::Decode {
            endpoint,
            detail: err.to_string(),
        })
    }

    async fn fire(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(), BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| BackendError::Transport {
                endpoint,
                detail: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BackendError::Endpoint { endpoint });
        }

        Ok(())
    }

    pub async fn dashboard_metrics(
        &self,
        role: PortalRole,
        id: &str,
    ) -> Result<DashboardMetrics, BackendError> {
        let path = format!("/api/{}/{id}/dashboard-metrics/", role.path_segment());
        self.fetch("dashboard-metrics", self.http.get(self.url(&path)))
            .await
    }

    pub async fn revenue_metrics(
        &self,
        role: PortalRole,
        id: &str,
        year: i32,
        month: u32,
    ) -> Result<RevenueMetrics, BackendError> {
        let path = format!("/api/{}/{id}/revenue-metrics/", role.path_segment());
        let request = self
            .http
            .get(self.url(&path))
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.fetch("revenue-metrics", request).await
    }

    pub async fn messages(
        &self,
        role: PortalRole,
        id: &str,
    ) -> Result<Vec<BackendMessage>, BackendError> {
        let path = format!("/api/{}/{id}/messages/", role.path_segment());
        self.fetch("messages", self.http.get(self.url(&path))).await
    }

    pub async fn send_message(
        &self,
        role: PortalRole,
        id: &str,
        message: &OutboundMessage,
    ) -> Result<BackendMessage, BackendError> {
        let path = format!("/api/{}/{id}/messages/", role.path_segment());
        self.fetch("messages", self.http.post(self.url(&path)).json(message))
            .await
    }

    /// Update the role profile. Employer EINs are shape-checked before any
    /// request leaves the client.
    pub async fn update_profile(
        &self,
        role: PortalRole,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        if let Some(ein) = &update.ein {
            validate_ein(ein)?;
        }
        let path = format!("/api/{}/{id}/update-profile/", role.path_segment());
        self.fire("update-profile", self.http.put(self.url(&path)).json(update))
            .await
    }

    pub async fn update_settings(
        &self,
        role: PortalRole,
        id: &str,
        update: &SettingsUpdate,
    ) -> Result<(), BackendError> {
        let path = format!("/api/{}/{id}/update-settings/", role.path_segment());
        self.fire(
            "update-settings",
            self.http.put(self.url(&path)).json(update),
        )
        .await
    }

    pub async fn provider_directory(
        &self,
        role: PortalRole,
        id: &str,
    ) -> Result<Vec<ProviderListing>, BackendError> {
        let path = format!("/api/{}/{id}/provider-directory/", role.path_segment());
        self.fetch("provider-directory", self.http.get(self.url(&path)))
            .await
    }

    pub async fn client_roster(
        &self,
        role: PortalRole,
        id: &str,
    ) -> Result<Vec<ClientAccount>, BackendError> {
        let path = format!("/api/{}/{id}/client-roster/", role.path_segment());
        self.fetch("client-roster", self.http.get(self.url(&path)))
            .await
    }

    pub async fn employee_roster(
        &self,
        role: PortalRole,
        id: &str,
    ) -> Result<Vec<EmployeeRecord>, BackendError> {
        let path = format!("/api/{}/{id}/employee-roster/", role.path_segment());
        self.fetch("employee-roster", self.http.get(self.url(&path)))
            .await
    }

    pub async fn request_quote(
        &self,
        payload: &EnrollmentQuoteRequest,
    ) -> Result<EnrollmentQuoteResponse, BackendError> {
        self.fetch(
            "enrollment-quotes",
            self.http
                .post(self.url("/api/enrollment/quotes/"))
                .json(payload),
        )
        .await
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), BackendError> {
        let request = self
            .http
            .get(self.url("/api/accounts/verify-email/"))
            .query(&[("token", token)]);
        self.fire("verify-email", request).await
    }

    /// Confirm a password reset. The new password is checked against the
    /// portal policy before any request leaves the client.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        validate_password(new_password)?;
        let payload = serde_json::json!({
            "token": token,
            "new_password": new_password,
        });
        self.fire(
            "password-reset-confirm",
            self.http
                .post(self.url("/api/accounts/password/reset/confirm/"))
                .json(&payload),
        )
        .await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        self.fetch(endpoint, self.http.post(self.url(path)).json(body))
            .await
    }
}

#[async_trait::async_trait]
impl EnrollmentGateway for BackendClient {
    async fn submit(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, GatewayError> {
        let result: Result<EnrollmentReceipt, BackendError> = self
            .post_json("enrollment-requests", "/api/enrollment/requests/", &request)
            .await;

        result.map_err(|err| match err {
            BackendError::Endpoint { .. } => GatewayError::Rejected(err.to_string()),
            other => GatewayError::Transport(other.to_string()),
        })
    }
}
