use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::env_renderer::EnvRenderer;

pub const DEFAULT_CONFIG_FILE: &str = "signup.toml";

const DEFAULT_SUCCESS_DURATION: Duration = Duration::from_millis(4000);
const DEFAULT_ERROR_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the authentication API, `auth/register` is appended to its path.
    pub base_url: Url,
    #[serde(default)]
    pub notifications: Notifications,
}

/// How long terminal notifications stay visible.
#[derive(Debug, Copy, Clone, Default, Deserialize)]
pub struct Notifications {
    success_ms: Option<u64>,
    error_ms: Option<u64>,
}

impl Config {
    pub fn from_base_url(url: Url) -> Self {
        Self {
            base_url: url,
            notifications: Notifications::default(),
        }
    }

    /// Reads a TOML configuration file after rendering `SIGNUP_` environment variables into it.
    pub fn load(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let toml = fs::read_to_string(file)
            .with_context(|| format!("Failed to read configuration file from {:?}", file))?;
        Self::from_toml(&toml, &EnvRenderer::from_env())
    }

    pub fn from_toml(toml: &str, env_renderer: &EnvRenderer) -> Result<Self> {
        let with_env = env_renderer
            .render(toml)
            .context("Rendering environment variables into configuration")?;
        Ok(toml::from_str(&with_env)?)
    }
}

impl Notifications {
    pub fn new(success: Duration, error: Duration) -> Self {
        Self {
            success_ms: Some(success.as_millis() as u64),
            error_ms: Some(error.as_millis() as u64),
        }
    }

    pub fn effective_success_duration(&self) -> Duration {
        self.success_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUCCESS_DURATION)
    }

    pub fn effective_error_duration(&self) -> Duration {
        self.error_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ERROR_DURATION)
    }
}
