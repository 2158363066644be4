use super::render;
use crate::backend::{Backend, CredentialedLookup};
use crate::extractor::{ForwardedCookies, PreferredLocale};
use crate::view::View;
use crate::FrontendConfig;
use axum::{extract::State, http::Uri, response::Response};
use tracing::instrument;

/// Serves every page that is not a dedicated route. Each request is a fresh
/// page load, so the view starts logged out and is mounted at the request path.
#[instrument(skip(backend, config, cookies))]
pub async fn page(
    State(backend): State<Backend>,
    State(config): State<FrontendConfig>,
    uri: Uri,
    cookies: ForwardedCookies,
    PreferredLocale(locale): PreferredLocale,
) -> Response {
    let mut view = View::default();
    let lookup = CredentialedLookup::new(&backend, cookies.as_header());

    view.mount(&uri, &config.success_path, &lookup).await;

    render(&view, locale)
}
