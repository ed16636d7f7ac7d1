use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::Token;
use tokio::sync::RwLock;

use crate::errors::{constants::GCP_SCOPE, Result};

/// Supplies bearer tokens for Google Cloud REST calls.
#[async_trait]
pub trait TokenSource: Send + Sync + std::fmt::Debug {
    async fn token(&self) -> Result<String>;
}

/// Service-account token, refreshed from the credentials file once it expires.
#[derive(Clone, Debug)]
pub struct GcpTokenSource {
    pub token: Arc<RwLock<Token>>,
    pub credentials_path: String,
}

impl GcpTokenSource {
    #[tracing::instrument]
    pub async fn new(credentials_path: String) -> Result<Self> {
        let authenticator = gcp_auth::from_credentials_file(credentials_path.clone()).await?;
        let token = authenticator.get_token(&[GCP_SCOPE]).await?;

        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            credentials_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_token(&self) -> Result<()> {
        let mut token = self.token.write().await;
        if token.has_expired() {
            tracing::debug!("refreshing expired GCP access token");
            let authenticator =
                gcp_auth::from_credentials_file(self.credentials_path.clone()).await?;
            *token = authenticator.get_token(&[GCP_SCOPE]).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl TokenSource for GcpTokenSource {
    async fn token(&self) -> Result<String> {
        self.update_token().await?;
        let token = self.token.read().await;
        Ok(token.as_str().to_string())
    }
}

/// Fixed token, for emulators and tests.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(pub String);

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
