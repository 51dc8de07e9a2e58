//! Outbound HTTP calls against the upstream platforms.
//!
//! A tool call resolves to exactly one [`UpstreamRequest`], which the
//! [`UpstreamClient`] sends to the [`UpstreamTarget`] of its platform.

pub(crate) mod client;
pub(crate) mod request;

pub use client::UpstreamClient;
pub use request::UpstreamRequest;

use crate::config::PlatformConfig;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    #[error("invalid auth header: {0}")]
    InvalidHeader(String),

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream response is not valid JSON: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return UpstreamError::Transport(format!("request timed out ({})", err.without_url()));
        }
        UpstreamError::Transport(err.without_url().to_string())
    }
}

/// How the credential is presented to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthHeader {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `<name>: <token>`, e.g. NocoDB's `xc-token`
    Custom(HeaderName),
}

impl AuthHeader {
    pub fn from_name(name: &str) -> Result<Self, UpstreamError> {
        let header = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| UpstreamError::InvalidHeader(format!("'{}': {}", name, e)))?;
        if header == AUTHORIZATION {
            Ok(AuthHeader::Bearer)
        } else {
            Ok(AuthHeader::Custom(header))
        }
    }
}

/// Base URL and credential of one upstream platform. Immutable once built.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    name: String,
    base_url: reqwest::Url,
    credential: String,
    auth_header: AuthHeader,
}

impl UpstreamTarget {
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        credential: impl Into<String>,
        auth_header: AuthHeader,
    ) -> Result<Self, UpstreamError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            name: name.into(),
            base_url,
            credential: credential.into(),
            auth_header,
        })
    }

    /// Build the target for an enabled platform; `None` when it has no token
    pub fn from_config(name: &str, config: &PlatformConfig) -> Result<Option<Self>, UpstreamError> {
        let Some(token) = config.credential() else {
            return Ok(None);
        };
        let auth_header = AuthHeader::from_name(&config.auth_header)?;
        Self::new(name, &config.api_url, token, auth_header).map(Some)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    pub(crate) fn auth(&self) -> Result<(HeaderName, HeaderValue), UpstreamError> {
        let (name, value) = match &self.auth_header {
            AuthHeader::Bearer => (AUTHORIZATION, format!("Bearer {}", self.credential)),
            AuthHeader::Custom(name) => (name.clone(), self.credential.clone()),
        };
        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| UpstreamError::InvalidHeader(format!("credential for {}", self.name)))?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}
