//! HTTP request handlers for the server.
//!
//! Every AI endpoint checks, in this order: provider credential, rate limit,
//! input validation, extraction. Import and code listing endpoints are pure
//! and neither credentialed nor rate limited.

use crate::client_id::client_identifier;
use crate::config::ServerConfig;
use crate::dto::{
    CodesResponse, ErrorResponse, HealthCheckResponse, ProductsResponse, SuggestRequest,
    SuggestResponse,
};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use menucheck_domain::LlmProvider;
use menucheck_extractor::{ExtractorError, MenuService, UploadedArtifact};
use menucheck_gatekeeper::{RateLimitConfig, RateLimiter};
use menucheck_importer::{import_csv, import_paste, ImportError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Room for the text field and multipart framing on top of one upload
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

const PARSE_MENU_FAILED: &str = "The menu could not be analyzed.";
const SUGGEST_FAILED: &str = "Allergen suggestions could not be generated.";

/// Shared application state
pub struct AppState<L> {
    /// Menu service; `None` when no provider credential is configured
    pub menu: Option<Arc<MenuService<L>>>,
    /// Limiter shared by all AI endpoints
    pub limiter: Arc<RateLimiter>,
    /// Budget of the menu analysis endpoint
    pub parse_menu_limit: RateLimitConfig,
    /// Budget of the suggestion endpoint
    pub suggest_limit: RateLimitConfig,
    /// Upload ceiling (bytes)
    pub max_artifact_bytes: usize,
}

impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            menu: self.menu.clone(),
            limiter: Arc::clone(&self.limiter),
            parse_menu_limit: self.parse_menu_limit,
            suggest_limit: self.suggest_limit,
            max_artifact_bytes: self.max_artifact_bytes,
        }
    }
}

impl<L: LlmProvider> AppState<L> {
    /// Assemble state from a (possibly absent) service, a limiter and the config
    pub fn new(menu: Option<MenuService<L>>, limiter: RateLimiter, config: &ServerConfig) -> Self {
        Self {
            menu: menu.map(Arc::new),
            limiter: Arc::new(limiter),
            parse_menu_limit: config.parse_menu_limit,
            suggest_limit: config.suggest_limit,
            max_artifact_bytes: config.extractor.max_artifact_bytes,
        }
    }

    fn menu(&self) -> Result<&MenuService<L>, AppError> {
        self.menu.as_deref().ok_or(AppError::Configuration)
    }

    fn enforce(&self, scope: &str, headers: &HeaderMap, budget: &RateLimitConfig) -> Result<(), AppError> {
        let key = format!("{}:{}", scope, client_identifier(headers));
        let decision = self.limiter.check(&key, budget);
        if decision.allowed {
            return Ok(());
        }

        warn!("Rate limit exceeded for {}", key);
        Err(AppError::RateLimited {
            retry_after_secs: decision.retry_after_secs(),
        })
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Provider credential missing
    Configuration,
    /// Budget exhausted for this client
    RateLimited {
        /// Seconds until the window resets
        retry_after_secs: u64,
    },
    /// Unusable client input
    BadRequest(String),
    /// Recognition or extraction failed
    ExtractionFailed(&'static str),
}

impl AppError {
    fn from_extractor(error: ExtractorError, failure_message: &'static str) -> Self {
        if error.is_client_error() {
            debug!("Rejected input: {}", error);
            AppError::BadRequest(error.to_string())
        } else {
            warn!("Extraction failed: {}", error);
            AppError::ExtractionFailed(failure_message)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} is not set.", crate::config::API_KEY_ENV),
            ),
            AppError::RateLimited { retry_after_secs } => {
                let body = Json(ErrorResponse {
                    error: "Too many requests. Please try again shortly.".to_string(),
                });
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    body,
                )
                    .into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ExtractionFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Text and upload read from a menu analysis form
#[derive(Debug, Default)]
struct MenuForm {
    text: Option<String>,
    artifact: Option<UploadedArtifact>,
}

fn bad_multipart(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Invalid form data: {}", e))
}

async fn read_menu_form(multipart: &mut Multipart, max_artifact_bytes: usize) -> Result<MenuForm, AppError> {
    let mut form = MenuForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "text" => form.text = Some(field.text().await.map_err(bad_multipart)?),
            "image" | "pdf" => {
                let declared = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(bad_multipart)?;
                // Browsers send an empty part for an unused file input
                if data.is_empty() {
                    continue;
                }
                if form.artifact.is_some() {
                    return Err(AppError::from_extractor(
                        ExtractorError::ConflictingUploads,
                        PARSE_MENU_FAILED,
                    ));
                }

                let artifact = if name == "image" {
                    UploadedArtifact::image(&declared, data.to_vec(), max_artifact_bytes)
                } else {
                    UploadedArtifact::document(&declared, data.to_vec(), max_artifact_bytes)
                };
                form.artifact = Some(
                    artifact.map_err(|e| AppError::from_extractor(e, PARSE_MENU_FAILED))?,
                );
            }
            other => debug!("Ignoring form field '{}'", other),
        }
    }

    Ok(form)
}

/// POST /api/parse-menu - Analyze menu text, a photo or a PDF
async fn parse_menu<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProductsResponse>, AppError> {
    let menu = state.menu()?;
    state.enforce("parse-menu", &headers, &state.parse_menu_limit)?;

    let mut multipart = multipart.map_err(|e| bad_multipart(e.body_text()))?;
    let form = read_menu_form(&mut multipart, state.max_artifact_bytes).await?;
    info!(
        "Menu analysis request: {} text chars, upload: {}",
        form.text.as_deref().map(|t| t.chars().count()).unwrap_or(0),
        form.artifact.as_ref().map(UploadedArtifact::kind).unwrap_or("none")
    );

    let result = menu
        .parse_menu(form.text.as_deref(), form.artifact.as_ref())
        .await
        .map_err(|e| AppError::from_extractor(e, PARSE_MENU_FAILED))?;

    Ok(Json(result.into()))
}

/// POST /api/suggest-allergens - Suggest codes for one product name
async fn suggest_allergens<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuggestResponse>, AppError> {
    let menu = state.menu()?;
    state.enforce("suggest", &headers, &state.suggest_limit)?;

    let request: SuggestRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::from_extractor(ExtractorError::InvalidProductName, SUGGEST_FAILED))?;
    let name = request.product_name.unwrap_or_default();

    let suggestion = menu
        .suggest_allergens(&name)
        .await
        .map_err(|e| AppError::from_extractor(e, SUGGEST_FAILED))?;

    Ok(Json(suggestion.into()))
}

/// POST /api/import/csv - Import a CSV file with a header row
async fn import_csv_file(body: String) -> Json<ProductsResponse> {
    Json(import_csv(&body).into())
}

/// POST /api/import/paste - Import rows pasted from a spreadsheet
async fn import_pasted_rows(body: String) -> Result<Json<ProductsResponse>, AppError> {
    Ok(Json(import_paste(&body)?.into()))
}

/// GET /api/codes - The allergen and additive vocabulary
async fn list_codes() -> Json<CodesResponse> {
    Json(CodesResponse::from_registry())
}

/// GET /health - Liveness and credential status
async fn health_check<L: LlmProvider + 'static>(State(state): State<AppState<L>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        ai_enabled: state.menu.is_some(),
    })
}

/// Create the axum router with all routes
pub fn create_router<L: LlmProvider + 'static>(state: AppState<L>) -> AxumRouter {
    let body_limit = state.max_artifact_bytes.saturating_add(BODY_OVERHEAD_BYTES);

    AxumRouter::new()
        .route("/api/parse-menu", post(parse_menu::<L>))
        .route("/api/suggest-allergens", post(suggest_allergens::<L>))
        .route("/api/import/csv", post(import_csv_file))
        .route("/api/import/paste", post(import_pasted_rows))
        .route("/api/codes", get(list_codes))
        .route("/health", get(health_check::<L>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use menucheck_extractor::ExtractorConfig;
    use menucheck_llm::MockProvider;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(menu: Option<MockProvider>) -> AppState<MockProvider> {
        let config = ServerConfig::default();
        let menu = menu.map(|provider| MenuService::new(provider, ExtractorConfig::default()).unwrap());
        AppState::new(menu, RateLimiter::in_memory(), &config)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(None));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_codes() {
        let app = create_router(create_test_state(None));

        let request = Request::builder()
            .uri("/api/codes")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_rate_limited_response_carries_retry_after() {
        let response = AppError::RateLimited { retry_after_secs: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
    }

    #[test]
    fn test_extractor_error_mapping() {
        let response = AppError::from_extractor(ExtractorError::EmptyInput, PARSE_MENU_FAILED).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from_extractor(ExtractorError::Timeout, PARSE_MENU_FAILED).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
