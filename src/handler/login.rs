use super::render;
use crate::backend::Backend;
use crate::extractor::PreferredLocale;
use crate::view::{NavigationError, Navigator, View};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;
use url::Url;

/// Navigates by answering the request with a redirect.
#[derive(Debug, Default)]
pub struct Redirector {
    target: Option<Url>,
}

impl Redirector {
    pub fn target(&self) -> Option<&Url> {
        self.target.as_ref()
    }
}

impl Navigator for Redirector {
    fn navigate(&mut self, target: Url) -> Result<(), NavigationError> {
        match target.scheme() {
            "http" | "https" => {
                self.target = Some(target);
                Ok(())
            }
            other => Err(NavigationError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[instrument(skip(backend))]
pub async fn login(
    State(backend): State<Backend>,
    PreferredLocale(locale): PreferredLocale,
) -> Response {
    let mut view = View::default();
    let mut redirector = Redirector::default();

    view.handle_login(&backend, &mut redirector);

    match redirector.target() {
        Some(target) => {
            tracing::debug!(%target, "redirecting to identity provider login");
            Redirect::to(target.as_str()).into_response()
        }
        None => render(&view, locale),
    }
}
