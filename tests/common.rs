use auth_frontend_rs::{server, FrontendConfig};
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT: Once = Once::new();

pub const SESSION_COOKIE: &str = "user-session=valid";

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("auth_frontend_rs=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

#[allow(dead_code)]
pub fn session_json() -> serde_json::Value {
    json!({
        "token": "opaque-access-token",
        "user_id": 42,
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "provider": "authentik",
        "issued_at": "2026-06-15T12:00:00Z",
        "expires_at": "2026-06-22T12:00:00Z",
    })
}

/// Starts `app` on an ephemeral local port and returns its address.
#[allow(dead_code)]
pub async fn spawn_backend(app: Router) -> SocketAddr {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn unreachable_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Mock of the auth backend: vouches for requests carrying
/// [`SESSION_COOKIE`], answers 401 otherwise, and counts lookups.
#[allow(dead_code)]
pub fn session_backend(lookups: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/auth/user",
        get(move |headers: HeaderMap| {
            let lookups = lookups.clone();
            async move {
                lookups.fetch_add(1, Ordering::SeqCst);
                let authenticated = headers
                    .get(header::COOKIE)
                    .and_then(|value| value.to_str().ok())
                    .map_or(false, |cookies| {
                        cookies.split("; ").any(|pair| pair == SESSION_COOKIE)
                    });

                if authenticated {
                    Json(session_json()).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "not authenticated").into_response()
                }
            }
        }),
    )
}

#[allow(dead_code)]
pub fn fixed_backend(status: StatusCode, body: &'static str) -> Router {
    Router::new().route("/auth/user", get(move || async move { (status, body) }))
}

#[allow(dead_code)]
pub fn config_for(addr: SocketAddr) -> FrontendConfig {
    FrontendConfig {
        api_base_url: format!("http://{}", addr),
        ..FrontendConfig::default()
    }
}

pub fn frontend(config: FrontendConfig) -> Router {
    setup_tracing();
    server::app(config).unwrap()
}

pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    #[allow(dead_code)]
    pub fn is_login_view(&self) -> bool {
        self.body.contains("Authentication Demo") && !self.body.contains("Successful Login")
    }

    #[allow(dead_code)]
    pub fn shows_error(&self) -> bool {
        self.body.contains("class=\"error\"")
    }
}

pub async fn fetch_page(app: Router, uri: &str, cookie: Option<&str>) -> Page {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    let response: Response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();

    Page {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}
