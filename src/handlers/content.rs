use crate::{
    AppState,
    markdown::{TocDepth, render_markdown_with_toc},
    models::{
        AiTool, CalendarResponse, HeroImage, HomeResponse, MessageResponse, MissionBlock,
        NewsResponse, Question, QuestionBoxResponse, QuestionSubmission, RoadmapPageDetailResponse,
        RoadmapWithPages, SideHustleResponse, TrainingListResponse, TrainingVideoResponse,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

// --- Filter Structs ---

/// TrainingFilter
///
/// Query parameters for the training page: an optional category slug.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct TrainingFilter {
    pub category: Option<String>,
}

/// NewsFilter
///
/// Query parameters for the news listing: free-text keyword and category.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NewsFilter {
    pub q: Option<String>,
    pub category: Option<String>,
}

// --- Handlers ---

/// home
///
/// [Gated Route] Home page payload: the settings singleton (hero copy, CTA)
/// plus the hero images currently visible in the 'home' slot.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home payload", body = HomeResponse))
)]
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let settings = state.repo.get_settings().await;
    let hero_images = state
        .repo
        .list_active_hero_images(HeroImage::SLOT_HOME, Utc::now())
        .await;
    Json(HomeResponse {
        settings,
        hero_images,
    })
}

/// mission
///
/// [Gated Route] Mission blocks in display order.
#[utoipa::path(
    get,
    path = "/mission/",
    responses((status = 200, description = "Mission blocks", body = [MissionBlock]))
)]
pub async fn mission(State(state): State<AppState>) -> Json<Vec<MissionBlock>> {
    Json(state.repo.list_mission_blocks().await)
}

/// training
///
/// [Gated Route] Public training videos, optionally filtered by category
/// slug, each enriched with its derived embeddable URL. The full category
/// list rides along for the filter UI; `current` echoes the selected slug.
///
/// *Security*: the repository applies `is_public=true` unconditionally.
#[utoipa::path(
    get,
    path = "/training/",
    params(TrainingFilter),
    responses((status = 200, description = "Training videos", body = TrainingListResponse))
)]
pub async fn training(
    State(state): State<AppState>,
    Query(filter): Query<TrainingFilter>,
) -> Json<TrainingListResponse> {
    let current = filter.category.unwrap_or_default();
    let selected = (!current.is_empty()).then(|| current.clone());

    let videos = state.repo.list_public_videos(selected).await;
    let categories = state.repo.list_training_categories().await;

    Json(TrainingListResponse {
        videos: videos.into_iter().map(TrainingVideoResponse::from).collect(),
        categories,
        current,
    })
}

/// side_hustle
///
/// [Gated Route] Side-hustle items pre-grouped into the four fixed
/// categories. Unknown categories land in `other_items`.
#[utoipa::path(
    get,
    path = "/side-hustle/",
    responses((status = 200, description = "Side hustle items", body = SideHustleResponse))
)]
pub async fn side_hustle(State(state): State<AppState>) -> Json<SideHustleResponse> {
    let mut response = SideHustleResponse::default();
    for item in state.repo.list_side_hustle_items().await {
        match item.category.as_str() {
            "pocket" => response.pocket_items.push(item),
            "career" => response.career_items.push(item),
            "life" => response.life_items.push(item),
            _ => response.other_items.push(item),
        }
    }
    Json(response)
}

/// roadmap_home
///
/// [Gated Route] All roadmaps in order, each with its published pages and
/// the intro rendered from Markdown (TOC covers h2–h3 here).
#[utoipa::path(
    get,
    path = "/roadmap/",
    responses((status = 200, description = "Roadmaps with pages", body = [RoadmapWithPages]))
)]
pub async fn roadmap_home(State(state): State<AppState>) -> Json<Vec<RoadmapWithPages>> {
    let roadmaps = state.repo.list_roadmaps().await;
    let mut out = Vec::with_capacity(roadmaps.len());
    for roadmap in roadmaps {
        let pages = state.repo.list_published_pages(roadmap.id).await;
        let (intro_html, intro_toc) = render_markdown_with_toc(&roadmap.intro, TocDepth::H2_H3);
        out.push(RoadmapWithPages {
            roadmap,
            intro_html,
            intro_toc,
            pages,
        });
    }
    Json(out)
}

/// roadmap_page_detail
///
/// [Gated Route] One published roadmap page, addressed by roadmap slug plus
/// page slug. The body is converted from Markdown on every request, with a
/// TOC restricted to h2 headings; prev/next navigation follows the published
/// page order. Unknown or unpublished pages are a plain 404.
#[utoipa::path(
    get,
    path = "/roadmap/{roadmap_slug}/{page_slug}/",
    params(
        ("roadmap_slug" = String, Path, description = "Roadmap slug"),
        ("page_slug" = String, Path, description = "Page slug"),
    ),
    responses(
        (status = 200, description = "Page detail", body = RoadmapPageDetailResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn roadmap_page_detail(
    State(state): State<AppState>,
    Path((roadmap_slug, page_slug)): Path<(String, String)>,
) -> Result<Json<RoadmapPageDetailResponse>, StatusCode> {
    let roadmap = state
        .repo
        .get_roadmap_by_slug(&roadmap_slug)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let page = state
        .repo
        .get_published_page(roadmap.id, &page_slug)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let pages = state.repo.list_published_pages(roadmap.id).await;
    let pos = pages.iter().position(|p| p.id == page.id);
    let prev_page = pos.and_then(|i| i.checked_sub(1)).and_then(|i| pages.get(i)).cloned();
    let next_page = pos.and_then(|i| pages.get(i + 1)).cloned();

    let (body_html, body_toc) = render_markdown_with_toc(&page.body, TocDepth::H2);

    Ok(Json(RoadmapPageDetailResponse {
        roadmap,
        page,
        pages,
        prev_page,
        next_page,
        body_html,
        body_toc,
    }))
}

/// ai_tools
///
/// [Gated Route] The AI tool listing.
#[utoipa::path(
    get,
    path = "/ai-tools/",
    responses((status = 200, description = "AI tools", body = [AiTool]))
)]
pub async fn ai_tools(State(state): State<AppState>) -> Json<Vec<AiTool>> {
    Json(state.repo.list_ai_tools().await)
}

/// calendar
///
/// [Gated Route] The calendar embed URL from the settings singleton; empty
/// string until settings exist.
#[utoipa::path(
    get,
    path = "/calendar/",
    responses((status = 200, description = "Calendar embed", body = CalendarResponse))
)]
pub async fn calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let calendar_embed_src = state
        .repo
        .get_settings()
        .await
        .map(|s| s.calendar_embed_src)
        .unwrap_or_default();
    Json(CalendarResponse { calendar_embed_src })
}

/// news_list
///
/// [Gated Route] News posts, pinned first then newest first, with optional
/// keyword (title+body) and category filters. Each item carries the derived
/// 7-day freshness flag.
#[utoipa::path(
    get,
    path = "/news/",
    params(NewsFilter),
    responses((status = 200, description = "News posts", body = [NewsResponse]))
)]
pub async fn news_list(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> Json<Vec<NewsResponse>> {
    let now = Utc::now();
    let items = state.repo.list_news(filter.q, filter.category).await;
    Json(items.into_iter().map(|i| NewsResponse::at(i, now)).collect())
}

/// news_detail
///
/// [Gated Route] One news post by slug.
#[utoipa::path(
    get,
    path = "/news/{slug}/",
    params(("slug" = String, Path, description = "News slug")),
    responses(
        (status = 200, description = "News post", body = NewsResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn news_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<NewsResponse>, StatusCode> {
    match state.repo.get_news_by_slug(&slug).await {
        Some(item) => Ok(Json(NewsResponse::at(item, Utc::now()))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// question_box
///
/// [Gated Route] The question-box page: published FAQ entries only. Private
/// submissions never appear here regardless of status.
#[utoipa::path(
    get,
    path = "/question-box/",
    responses((status = 200, description = "Published FAQs", body = QuestionBoxResponse))
)]
pub async fn question_box(State(state): State<AppState>) -> Json<QuestionBoxResponse> {
    let public_faqs = state.repo.list_published_faqs().await;
    Json(QuestionBoxResponse { public_faqs })
}

/// submit_question
///
/// [Gated Route] Accepts a question-box submission. The body is required;
/// name may be blank for anonymous submissions. Status is forced to 'new'
/// server-side, so a submitter can never influence triage.
#[utoipa::path(
    post,
    path = "/question-box/",
    request_body = QuestionSubmission,
    responses(
        (status = 201, description = "Question received", body = Question),
        (status = 422, description = "Empty body"),
    )
)]
pub async fn submit_question(
    State(state): State<AppState>,
    Json(submission): Json<QuestionSubmission>,
) -> Result<(StatusCode, Json<Question>), (StatusCode, Json<MessageResponse>)> {
    if submission.body.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MessageResponse {
                message: "Please enter your question.".to_string(),
            }),
        ));
    }

    match state.repo.create_question(submission).await {
        Some(question) => Ok((StatusCode::CREATED, Json(question))),
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse {
                message: "Could not save your question. Please try again.".to_string(),
            }),
        )),
    }
}
