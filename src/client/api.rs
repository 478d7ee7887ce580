//! Boundary operations the admin shell calls against the server.
//!
//! `AuthApi` is the seam: the session store and route guard only ever see
//! this trait, so tests drive them with in-process fakes while the real
//! shell wires in `HttpAuthApi`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;

/// Public identity fields as the browser sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// 401 from the server: no session, expired token, deleted account.
    #[error("not authenticated")]
    Unauthorized,

    /// Any other non-2xx with a message from the response envelope.
    #[error("{message}")]
    Rejected { message: String },

    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AdminIdentity, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn profile(&self) -> Result<AdminIdentity, ClientError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AdminEnvelope {
    #[allow(dead_code)]
    success: bool,
    admin: AdminIdentity,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: String,
}

/// reqwest-backed implementation. The cookie store carries the HTTP-only
/// session cookie across calls the same way a browser does.
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn rejection(response: reqwest::Response) -> ClientError {
        let message = response
            .json::<MessageEnvelope>()
            .await
            .map(|e| e.message)
            .unwrap_or_default();
        ClientError::Rejected { message }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AdminIdentity, ClientError> {
        let response = self
            .http
            .post(self.url("/admin/login"))
            .json(&LoginBody { email, password })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let envelope: AdminEnvelope = response.json().await?;
        Ok(envelope.admin)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/admin/logout")).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn profile(&self) -> Result<AdminIdentity, ClientError> {
        let response = self.http.get(self.url("/admin/profile")).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let envelope: AdminEnvelope = response.json().await?;
        Ok(envelope.admin)
    }
}
