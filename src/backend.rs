use crate::session::SessionRecord;
use crate::view::SessionSource;
use crate::FrontendConfig;
use axum::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed session payload: {0}")]
    MalformedSession(#[source] reqwest::Error),
}

/// Handle to the auth backend that owns login and sessions.
#[derive(Clone, Debug)]
pub struct Backend {
    base_url: Url,
    provider: String,
    client: Client,
}

impl Backend {
    pub fn new(config: &FrontendConfig) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(&config.api_base_url)?;

        // Keep any path prefix when joining endpoint paths onto the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            provider: config.provider.clone(),
            client: Client::builder().build()?,
        })
    }

    pub fn session_url(&self) -> Result<Url, BackendError> {
        Ok(self.base_url.join("auth/user")?)
    }

    pub fn login_redirect_url(&self) -> Result<Url, BackendError> {
        let provider = utf8_percent_encode(&self.provider, NON_ALPHANUMERIC);
        Ok(self.base_url.join(&format!("auth/login/{}", provider))?)
    }

    /// Asks the backend who the browser is, forwarding the browser's cookies.
    ///
    /// Any non-success status reads as "no session"; only transport and
    /// decoding problems are errors.
    pub async fn current_session(
        &self,
        cookies: Option<&str>,
    ) -> Result<Option<SessionRecord>, BackendError> {
        let mut request = self.client.get(self.session_url()?);
        if let Some(cookies) = cookies {
            request = request.header(header::COOKIE, cookies);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    tracing::debug!(%status, "backend reports no active session")
                }
                _ => tracing::warn!(%status, "session lookup returned an unexpected status"),
            }
            return Ok(None);
        }

        let session = response
            .json::<SessionRecord>()
            .await
            .map_err(BackendError::MalformedSession)?;

        Ok(Some(session))
    }
}

/// A session lookup carrying the cookies of the request being served.
#[derive(Debug)]
pub struct CredentialedLookup<'a> {
    backend: &'a Backend,
    cookies: Option<&'a str>,
}

impl<'a> CredentialedLookup<'a> {
    pub fn new(backend: &'a Backend, cookies: Option<&'a str>) -> Self {
        Self { backend, cookies }
    }
}

#[async_trait]
impl SessionSource for CredentialedLookup<'_> {
    async fn fetch_session(&self) -> Result<Option<SessionRecord>, BackendError> {
        self.backend.current_session(self.cookies).await
    }
}
