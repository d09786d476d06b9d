use autotrader_error::AutotraderError;
use std::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};
use url::Url;

use crate::config::{
    DEFAULT_REQUEST_TIMEOUT_IN_SECS, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF_IN_MILLIS,
};

#[derive(Clone)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
}

impl ApiCredentials {
    pub fn new(key: &str, secret: &str) -> Self {
        Self {
            key: key.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl Debug for ApiCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    /// Always ends with `/` so method paths can be appended verbatim.
    pub http: String,
}

impl ApiEndpoints {
    pub fn new(http: &str) -> Result<Self, AutotraderError> {
        let url = Url::parse(http)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AutotraderError::new_config(format!(
                "base url `{}` must use http or https",
                http
            )));
        }
        let mut http = url.to_string();
        if !http.ends_with('/') {
            http.push('/');
        }
        Ok(Self { http })
    }
}

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub credentials: ApiCredentials,
    pub endpoints: ApiEndpoints,
    /// Extra attempts after a transport failure.
    pub retry_attempts: u32,
    /// Linear backoff step; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
    pub request_timeout: Duration,
}

impl ExchangeConfig {
    pub fn new(credentials: ApiCredentials, endpoints: ApiEndpoints) -> Self {
        Self {
            credentials,
            endpoints,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_IN_MILLIS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_IN_SECS),
        }
    }
}
