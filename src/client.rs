//! The authentication service as seen from the registration form.

use anyhow::{anyhow, Result};
use api::{ErrorResponse, RegisterForm, RegisterResponse};
use async_trait::async_trait;
use url::Url;

use crate::{config::Config, error::SubmitError};

const REGISTER_PATH: [&str; 2] = ["auth", "register"];

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issues exactly one registration request. No retries.
    async fn register(&self, input: &RegisterForm) -> Result<RegisterResponse, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: reqwest::Client,
    register_url: Url,
}

impl HttpAuthService {
    pub fn new(base_url: &Url) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            register_url: endpoint(base_url, &REGISTER_PATH)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url)
    }

    pub fn register_url(&self) -> &Url {
        &self.register_url
    }
}

/// Appends `segments` to the path of `base`, keeping whatever path `base` already has.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("{base} can't be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[tracing::instrument(skip(self, input), fields(handle = %input.handle))]
    async fn register(&self, input: &RegisterForm) -> Result<RegisterResponse, SubmitError> {
        let response = self
            .client
            .post(self.register_url.clone())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        // Reading the body may fail after the status arrived, that does not change the verdict.
        let body = response.bytes().await.unwrap_or_default();

        if status.is_success() {
            return Ok(match serde_json::from_slice::<RegisterResponse>(&body) {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Unexpected registration response body: {e}");
                    RegisterResponse::default()
                }
            });
        }

        let error = serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .map(|response| response.error);
        Err(SubmitError::Rejected { status, error })
    }
}
