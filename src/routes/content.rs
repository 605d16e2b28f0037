use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Content Router Module
///
/// The site's visitor-facing pages. The assembled router is wrapped in the
/// access-gate middleware in `create_router`; nothing here performs its own
/// gate check.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        // GET / — hero copy and the active home-slot banner images.
        .route("/", get(handlers::content::home))
        // GET /mission/ — ordered mission blocks.
        .route("/mission/", get(handlers::content::mission))
        // GET /training/?category=slug — public videos with embed URLs.
        .route("/training/", get(handlers::content::training))
        // GET /side-hustle/ — items grouped into the four categories.
        .route("/side-hustle/", get(handlers::content::side_hustle))
        // GET /roadmap/ — all roadmaps with published pages and rendered intros.
        .route("/roadmap/", get(handlers::content::roadmap_home))
        // GET /roadmap/{roadmap_slug}/{page_slug}/ — one published page with
        // rendered body, TOC, and prev/next navigation.
        .route(
            "/roadmap/{roadmap_slug}/{page_slug}/",
            get(handlers::content::roadmap_page_detail),
        )
        // GET /ai-tools/
        .route("/ai-tools/", get(handlers::content::ai_tools))
        // GET /calendar/ — the configured calendar embed URL.
        .route("/calendar/", get(handlers::content::calendar))
        // GET /news/?q=&category= — filtered news listing, pinned first.
        .route("/news/", get(handlers::content::news_list))
        // GET /news/{slug}/
        .route("/news/{slug}/", get(handlers::content::news_detail))
        // GET /question-box/ — published FAQs.
        // POST /question-box/ — visitor question submission.
        .route(
            "/question-box/",
            get(handlers::content::question_box).post(handlers::content::submit_question),
        )
}
