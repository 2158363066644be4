use serde::Deserialize;

pub mod backend;
pub mod extractor;
pub mod format;
pub mod handler;
pub mod server;
pub mod session;
pub mod view;

/// Front-end settings, read from `FRONTEND_*` environment variables.
///
/// Every field falls back to the value the demo backend expects, so an empty
/// environment talks to `http://localhost:8080` and signs in via `authentik`.
#[derive(Deserialize, Clone, Debug)]
pub struct FrontendConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_success_path")]
    pub success_path: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            provider: default_provider(),
            success_path: default_success_path(),
            listen_addr: default_listen_addr(),
            default_locale: default_locale(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_provider() -> String {
    "authentik".to_string()
}

fn default_success_path() -> String {
    "/auth/success".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}
