use crate::format::negotiate_locale;
use crate::FrontendConfig;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Locale;
use std::convert::Infallible;

/// The browser's cookies, re-serialized so the session lookup can be made
/// on the browser's behalf.
#[derive(Debug, Clone, Default)]
pub struct ForwardedCookies(Option<String>);

impl ForwardedCookies {
    pub fn as_header(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ForwardedCookies
where
    S: Send + Sync,
{
    // A missing Cookie header just means an anonymous visitor.
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Forwarded verbatim; the backend decides what the pairs mean.
        let header = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        Ok(Self((!header.is_empty()).then_some(header)))
    }
}

/// Locale negotiated from `Accept-Language`, used for rendering dates.
#[derive(Debug, Clone, Copy)]
pub struct PreferredLocale(pub Locale);

#[async_trait]
impl<S> FromRequestParts<S> for PreferredLocale
where
    FrontendConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = FrontendConfig::from_ref(state);
        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Self(negotiate_locale(
            accept_language,
            &config.default_locale,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn request_parts(headers: &[(header::HeaderName, &str)]) -> Parts {
        let mut request = Request::builder().uri("/auth/success");
        for (name, value) in headers {
            request = request.header(name, *value);
        }
        request.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn cookies_are_reassembled_for_forwarding() {
        let mut parts = request_parts(&[(header::COOKIE, "user-session=abc; theme=dark")]);
        let cookies = ForwardedCookies::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(cookies.as_header(), Some("user-session=abc; theme=dark"));
    }

    #[tokio::test]
    async fn cookies_are_forwarded_without_loss() {
        let mut parts = request_parts(&[
            (header::COOKIE, "user-session=abc; bare-flag"),
            (header::COOKIE, "theme=dark"),
        ]);
        let cookies = ForwardedCookies::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(
            cookies.as_header(),
            Some("user-session=abc; bare-flag; theme=dark")
        );
    }

    #[tokio::test]
    async fn no_cookie_header_forwards_nothing() {
        let mut parts = request_parts(&[]);
        let cookies = ForwardedCookies::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(cookies.as_header(), None);
    }

    #[tokio::test]
    async fn locale_follows_accept_language() {
        let config = FrontendConfig::default();

        let mut parts = request_parts(&[(header::ACCEPT_LANGUAGE, "de-DE,de;q=0.9")]);
        let PreferredLocale(locale) = PreferredLocale::from_request_parts(&mut parts, &config)
            .await
            .unwrap();
        assert_eq!(locale, Locale::de_DE);

        let mut parts = request_parts(&[]);
        let PreferredLocale(locale) = PreferredLocale::from_request_parts(&mut parts, &config)
            .await
            .unwrap();
        assert_eq!(locale, Locale::en_US);
    }
}
