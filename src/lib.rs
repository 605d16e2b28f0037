use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod markdown;
pub mod models;
pub mod repository;

// Routing segregation (public, gated content, admin).
pub mod routes;
use routes::{admin, content, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application from the `#[utoipa::path]` and `ToSchema` annotations. Served
/// at `/api-docs/openapi.json`, which the gate exempts so the docs stay
/// reachable.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Gate and ops.
        handlers::gate::gate_page, handlers::gate::gate_accept, handlers::gate::gate_logout,
        handlers::ops::health, handlers::ops::run_migrate,
        // Gated content pages.
        handlers::content::home, handlers::content::mission, handlers::content::training,
        handlers::content::side_hustle, handlers::content::roadmap_home,
        handlers::content::roadmap_page_detail, handlers::content::ai_tools,
        handlers::content::calendar, handlers::content::news_list,
        handlers::content::news_detail, handlers::content::question_box,
        handlers::content::submit_question,
        // Admin CRUD.
        handlers::admin::get_settings, handlers::admin::put_settings,
        handlers::admin::list_mission_blocks, handlers::admin::create_mission_block,
        handlers::admin::update_mission_block, handlers::admin::delete_mission_block,
        handlers::admin::list_training_categories, handlers::admin::create_training_category,
        handlers::admin::update_training_category, handlers::admin::delete_training_category,
        handlers::admin::list_training_videos, handlers::admin::create_training_video,
        handlers::admin::update_training_video, handlers::admin::delete_training_video,
        handlers::admin::list_side_hustle_items, handlers::admin::create_side_hustle_item,
        handlers::admin::update_side_hustle_item, handlers::admin::delete_side_hustle_item,
        handlers::admin::list_roadmaps, handlers::admin::create_roadmap,
        handlers::admin::update_roadmap, handlers::admin::delete_roadmap,
        handlers::admin::list_roadmap_pages, handlers::admin::create_roadmap_page,
        handlers::admin::update_roadmap_page, handlers::admin::delete_roadmap_page,
        handlers::admin::list_ai_tools, handlers::admin::create_ai_tool,
        handlers::admin::update_ai_tool, handlers::admin::delete_ai_tool,
        handlers::admin::list_hero_images, handlers::admin::create_hero_image,
        handlers::admin::update_hero_image, handlers::admin::delete_hero_image,
        handlers::admin::list_news, handlers::admin::create_news,
        handlers::admin::update_news, handlers::admin::delete_news,
        handlers::admin::list_faq_entries, handlers::admin::create_faq_entry,
        handlers::admin::update_faq_entry, handlers::admin::delete_faq_entry,
        handlers::admin::list_questions, handlers::admin::triage_question,
        handlers::admin::delete_question,
    ),
    components(
        schemas(
            models::StaffUser, models::SiteSetting, models::MissionBlock,
            models::TrainingCategory, models::TrainingVideo, models::SideHustleItem,
            models::Roadmap, models::RoadmapPage, models::AiTool, models::HeroImage,
            models::News, models::FaqEntry, models::Question,
            models::SiteSettingInput, models::MissionBlockInput, models::TrainingCategoryInput,
            models::TrainingVideoInput, models::SideHustleItemInput, models::RoadmapInput,
            models::RoadmapPageInput, models::AiToolInput, models::HeroImageInput,
            models::NewsInput, models::FaqEntryInput,
            models::QuestionSubmission, models::QuestionTriage, models::GateSubmission,
            models::MessageResponse, models::HomeResponse, models::TrainingVideoResponse,
            models::TrainingListResponse, models::SideHustleResponse, models::RoadmapWithPages,
            models::RoadmapPageDetailResponse, models::NewsResponse, models::CalendarResponse,
            models::QuestionBoxResponse,
        )
    ),
    tags(
        (name = "wolfe-site", description = "Wolfe education site API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding the repository and the loaded
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// FromRef implementations let extractors pull individual components out of
// the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
///
/// The access gate is layered over the whole router, mirroring a site-wide
/// middleware: its exemption list (gate endpoints, admin API, ops, docs)
/// decides what stays reachable without a pass, so new content routes are
/// gated by default.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Gate, health, deploy hook.
        .merge(public::public_routes())
        // The gated content pages.
        .merge(content::content_routes())
        // Admin API, nested under /admin. Bearer auth + role check live in
        // the handlers; the gate exempts this subtree.
        .nest("/admin", admin::admin_routes())
        // Site-wide access gate.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::access_gate,
        ))
        .with_state(state);

    // Observability and correlation layers, outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes TraceLayer's span creation: every log line for a request is
/// correlated by the generated x-request-id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
