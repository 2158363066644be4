use crate::format::format_timestamp;
use crate::session::{AuthState, SessionRecord};
use crate::view::View;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Locale;

pub mod login;
pub mod page;

pub use login::login;
pub use page::page;

pub(crate) struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {}", err),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    loading: bool,
    error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "success.html")]
struct SuccessTemplate<'a> {
    session: &'a SessionRecord,
    issued_at: String,
    expires_at: String,
}

/// Renders whichever of the two views the state calls for.
pub(crate) fn render(view: &View, locale: Locale) -> Response {
    match view.auth() {
        AuthState::LoggedIn(session) => HtmlTemplate(SuccessTemplate {
            session,
            issued_at: format_timestamp(&session.issued_at, locale),
            expires_at: format_timestamp(&session.expires_at, locale),
        })
        .into_response(),
        AuthState::LoggedOut => HtmlTemplate(LoginTemplate {
            loading: view.is_loading(),
            error: view.error(),
        })
        .into_response(),
    }
}
