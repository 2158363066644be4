use crate::{backend::Backend, handler, FrontendConfig};
use anyhow::Context;
use axum::{
    extract::FromRef,
    http::{Request, StatusCode},
    response::Response,
    routing::{get, get_service},
    Router,
};
use std::{io, net::SocketAddr, time::Duration};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::Span;

/// Directory the stylesheet is served from, under `/public`.
pub const STATIC_DIR: &str = "static";

pub async fn start_server(config: FrontendConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address `{}`", config.listen_addr))?;

    let app = app(config)?;

    tracing::info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub fn app(config: FrontendConfig) -> anyhow::Result<Router> {
    let backend = Backend::new(&config).context("invalid backend base url")?;
    tracing::debug!(api_base_url = %config.api_base_url, provider = %config.provider, "backend configured");

    let app_state = AppState { backend, config };

    let assets = get_service(ServeDir::new(STATIC_DIR)).handle_error(|err: io::Error| async move {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", err),
        )
    });

    let app = Router::new()
        .route("/login", get(handler::login))
        .nest_service("/public", assets)
        .fallback(handler::page)
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<_>, _span: &Span| {
                    tracing::info!(method = %request.method(), uri = %request.uri(), "request");
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    tracing::info!(status = %response.status(), ?latency, "response");
                }),
        );

    Ok(app)
}

#[derive(Clone)]
struct AppState {
    backend: Backend,
    config: FrontendConfig,
}

impl FromRef<AppState> for Backend {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

impl FromRef<AppState> for FrontendConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
