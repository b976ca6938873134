//! Menucheck Server
//!
//! HTTP surface for menu analysis, allergen suggestions, spreadsheet import
//! and the code vocabulary.
//!
//! # Endpoints
//!
//! | Method | Path                     | Purpose                                 |
//! |--------|--------------------------|-----------------------------------------|
//! | POST   | `/api/parse-menu`        | multipart `text`, `image` or `pdf`      |
//! | POST   | `/api/suggest-allergens` | `{"productName": "..."}`                |
//! | POST   | `/api/import/csv`        | CSV with header row                     |
//! | POST   | `/api/import/paste`      | rows pasted from a spreadsheet          |
//! | GET    | `/api/codes`             | allergen and additive vocabulary        |
//! | GET    | `/health`                | liveness and credential status          |
//!
//! The AI endpoints are rate limited per client and answer 500 when the
//! provider credential is missing. Import endpoints work without one.

#![warn(missing_docs)]

pub mod client_id;
pub mod config;
pub mod dto;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use menucheck_extractor::{ExtractorError, MenuService};
use menucheck_gatekeeper::RateLimiter;
use menucheck_llm::OpenAiProvider;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// Provider client could not be constructed
    #[error("Provider setup failed: {0}")]
    Provider(String),
}

impl From<ExtractorError> for ServerError {
    fn from(e: ExtractorError) -> Self {
        match e {
            ExtractorError::Config(msg) => {
                ServerError::Config(config::ConfigError::Invalid(format!("extractor: {}", msg)))
            }
            other => ServerError::Provider(other.to_string()),
        }
    }
}

/// Install the fmt subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed by an embedding binary
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the menu service, or `None` when no credential is configured
pub fn build_menu_service(
    config: &ServerConfig,
    api_key: Option<String>,
) -> Result<Option<MenuService<OpenAiProvider>>, ServerError> {
    let Some(api_key) = api_key else {
        warn!(
            "{} is not set; AI endpoints will answer with a configuration error",
            config::API_KEY_ENV
        );
        return Ok(None);
    };

    let provider = OpenAiProvider::with_endpoint(
        &config.provider_endpoint,
        api_key,
        &config.model,
        config.provider_timeout_secs,
    )
    .map_err(|e| ServerError::Provider(e.to_string()))?
    .with_temperature(config.temperature);

    Ok(Some(MenuService::new(provider, config.extractor.clone())?))
}

/// Start the HTTP server
///
/// Validates configuration, wires the provider, limiter and router, and
/// serves until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();
    config.validate()?;

    info!("Starting Menucheck server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.model);
    info!(
        "Budgets: parse-menu {}/{}ms, suggest {}/{}ms",
        config.parse_menu_limit.max_requests,
        config.parse_menu_limit.window_ms,
        config.suggest_limit.max_requests,
        config.suggest_limit.window_ms
    );

    let menu = build_menu_service(&config, ServerConfig::api_key_from_env())?;
    let limiter = RateLimiter::in_memory().with_max_tracked_keys(config.max_tracked_keys);
    let state = AppState::new(menu, limiter, &config);

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_means_no_service() {
        let config = ServerConfig::default();
        let menu = build_menu_service(&config, None).unwrap();
        assert!(menu.is_none());
    }

    #[test]
    fn test_key_builds_service() {
        let config = ServerConfig::default();
        let menu = build_menu_service(&config, Some("sk-test".to_string())).unwrap();
        assert!(menu.is_some());
    }

    #[test]
    fn test_invalid_extractor_config_rejected() {
        let mut config = ServerConfig::default();
        config.extractor.max_text_length = 0;
        assert!(matches!(
            build_menu_service(&config, Some("sk-test".to_string())),
            Err(ServerError::Config(config::ConfigError::Invalid(m))) if m.starts_with("extractor")
        ));
    }

    #[test]
    fn test_extractor_runtime_errors_stay_provider_errors() {
        let err = ServerError::from(ExtractorError::EmptyInput);
        assert!(matches!(err, ServerError::Provider(_)));
    }
}
