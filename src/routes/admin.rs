use crate::{AppState, handlers::admin};
use axum::{
    Router,
    routing::{get, put},
};

/// Admin Router Module
///
/// Staff-only CRUD over every content entity, nested under `/admin` in
/// `create_router`. The admin surface is exempt from the access gate (it has
/// its own bearer-token auth); every handler authenticates via the
/// `StaffUser` extractor and then checks the 'staff' role.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // Settings singleton: read and full-form save.
        .route("/settings", get(admin::get_settings).put(admin::put_settings))
        // Mission blocks.
        .route(
            "/mission-blocks",
            get(admin::list_mission_blocks).post(admin::create_mission_block),
        )
        .route(
            "/mission-blocks/{id}",
            put(admin::update_mission_block).delete(admin::delete_mission_block),
        )
        // Training categories. Slug derivation happens on create/update.
        .route(
            "/training-categories",
            get(admin::list_training_categories).post(admin::create_training_category),
        )
        .route(
            "/training-categories/{id}",
            put(admin::update_training_category).delete(admin::delete_training_category),
        )
        // Training videos, drafts included.
        .route(
            "/training-videos",
            get(admin::list_training_videos).post(admin::create_training_video),
        )
        .route(
            "/training-videos/{id}",
            put(admin::update_training_video).delete(admin::delete_training_video),
        )
        // Side hustle items.
        .route(
            "/side-hustle-items",
            get(admin::list_side_hustle_items).post(admin::create_side_hustle_item),
        )
        .route(
            "/side-hustle-items/{id}",
            put(admin::update_side_hustle_item).delete(admin::delete_side_hustle_item),
        )
        // Roadmaps. Deleting one cascades to its pages.
        .route(
            "/roadmaps",
            get(admin::list_roadmaps).post(admin::create_roadmap),
        )
        .route(
            "/roadmaps/{id}",
            put(admin::update_roadmap).delete(admin::delete_roadmap),
        )
        // Roadmap pages, drafts included, filterable by roadmap.
        .route(
            "/roadmap-pages",
            get(admin::list_roadmap_pages).post(admin::create_roadmap_page),
        )
        .route(
            "/roadmap-pages/{id}",
            put(admin::update_roadmap_page).delete(admin::delete_roadmap_page),
        )
        // AI tools.
        .route(
            "/ai-tools",
            get(admin::list_ai_tools).post(admin::create_ai_tool),
        )
        .route(
            "/ai-tools/{id}",
            put(admin::update_ai_tool).delete(admin::delete_ai_tool),
        )
        // Hero images, all slots.
        .route(
            "/hero-images",
            get(admin::list_hero_images).post(admin::create_hero_image),
        )
        .route(
            "/hero-images/{id}",
            put(admin::update_hero_image).delete(admin::delete_hero_image),
        )
        // News posts.
        .route("/news", get(admin::list_news).post(admin::create_news))
        .route(
            "/news/{id}",
            put(admin::update_news).delete(admin::delete_news),
        )
        // FAQ entries, unpublished included.
        .route(
            "/faq-entries",
            get(admin::list_faq_entries).post(admin::create_faq_entry),
        )
        .route(
            "/faq-entries/{id}",
            put(admin::update_faq_entry).delete(admin::delete_faq_entry),
        )
        // Question triage: list, status update (PATCH), delete.
        .route("/questions", get(admin::list_questions))
        .route(
            "/questions/{id}",
            axum::routing::patch(admin::triage_question).delete(admin::delete_question),
        )
}
