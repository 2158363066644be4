use crate::backend::{Backend, BackendError};
use crate::session::{AuthState, SessionRecord};
use axum::async_trait;
use thiserror::Error;
use url::Url;

/// Shown under the login button when the redirect could not be started.
pub const LOGIN_FAILED_MESSAGE: &str = "Failed to initiate login";

/// The path of the page currently being viewed.
pub trait Location {
    fn path(&self) -> &str;
}

impl Location for str {
    fn path(&self) -> &str {
        self
    }
}

impl Location for axum::http::Uri {
    fn path(&self) -> &str {
        axum::http::Uri::path(self)
    }
}

#[async_trait]
pub trait SessionSource {
    /// `Ok(None)` means the backend answered without vouching for a session.
    async fn fetch_session(&self) -> Result<Option<SessionRecord>, BackendError>;
}

/// Sends the browser somewhere else.
pub trait Navigator {
    fn navigate(&mut self, target: Url) -> Result<(), NavigationError>;
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("could not build login url: {0}")]
    Target(#[from] BackendError),
    #[error("refusing to navigate to a `{0}` url")]
    UnsupportedScheme(String),
}

#[derive(Clone, Debug, Default)]
pub struct View {
    auth: AuthState,
    loading: bool,
    error: Option<String>,
}

impl View {
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Runs once per page load. Only the success path triggers a session
    /// check; every other path keeps the default logged-out state.
    pub async fn mount<L, S>(&mut self, location: &L, success_path: &str, source: &S)
    where
        L: Location + ?Sized,
        S: SessionSource + ?Sized,
    {
        if location.path() == success_path {
            self.check_auth_status(source).await;
        }
    }

    pub async fn check_auth_status<S>(&mut self, source: &S)
    where
        S: SessionSource + ?Sized,
    {
        match source.fetch_session().await {
            Ok(Some(session)) => {
                tracing::debug!(user_id = session.user_id, "session found");
                self.auth = AuthState::LoggedIn(session);
            }
            Ok(None) => {}
            // Failures stay out of the page; the login view is shown as is.
            Err(err) => tracing::error!(error = %err, "error checking auth status"),
        }
    }

    pub fn handle_login<N>(&mut self, backend: &Backend, navigator: &mut N)
    where
        N: Navigator + ?Sized,
    {
        if self.loading {
            tracing::debug!("login already in progress");
            return;
        }

        self.loading = true;
        self.error = None;

        let result = backend
            .login_redirect_url()
            .map_err(NavigationError::from)
            .and_then(|target| navigator.navigate(target));

        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to initiate login");
            self.error = Some(LOGIN_FAILED_MESSAGE.to_string());
            self.loading = false;
        }
    }
}
