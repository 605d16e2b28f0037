use crate::{
    AppState,
    auth::StaffUser,
    models::{
        AiTool, AiToolInput, FaqEntry, FaqEntryInput, HeroImage, HeroImageInput, MissionBlock,
        MissionBlockInput, News, NewsInput, Question, QuestionTriage, Roadmap, RoadmapInput,
        RoadmapPage, RoadmapPageInput, SideHustleItem, SideHustleItemInput, SiteSetting,
        SiteSettingInput, TrainingCategory, TrainingCategoryInput, TrainingVideo,
        TrainingVideoInput,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Role check shared by every admin handler. All staff users carry the
/// 'staff' role today; anything else is forbidden.
fn require_staff(user: &StaffUser) -> Result<(), StatusCode> {
    if user.role == "staff" {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

/// PageFilter
///
/// Optional roadmap filter for the admin page listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PageFilter {
    pub roadmap_id: Option<i64>,
}

// --- Settings ---

/// get_settings
///
/// [Admin Route] The settings singleton; 404 until first saved.
#[utoipa::path(
    get,
    path = "/admin/settings",
    responses((status = 200, description = "Settings", body = SiteSetting))
)]
pub async fn get_settings(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<SiteSetting>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .get_settings()
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// put_settings
///
/// [Admin Route] Full-form settings save. Creates the singleton row on first
/// use, overwrites it afterwards.
#[utoipa::path(
    put,
    path = "/admin/settings",
    request_body = SiteSettingInput,
    responses((status = 200, description = "Saved", body = SiteSetting))
)]
pub async fn put_settings(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<SiteSettingInput>,
) -> Result<Json<SiteSetting>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .upsert_settings(input)
        .await
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// --- Mission blocks ---

#[utoipa::path(
    get,
    path = "/admin/mission-blocks",
    responses((status = 200, description = "Mission blocks", body = [MissionBlock]))
)]
pub async fn list_mission_blocks(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MissionBlock>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_mission_blocks().await))
}

#[utoipa::path(
    post,
    path = "/admin/mission-blocks",
    request_body = MissionBlockInput,
    responses((status = 201, description = "Created", body = MissionBlock))
)]
pub async fn create_mission_block(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<MissionBlockInput>,
) -> Result<(StatusCode, Json<MissionBlock>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_mission_block(input).await {
        Some(block) => Ok((StatusCode::CREATED, Json(block))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/mission-blocks/{id}",
    request_body = MissionBlockInput,
    responses((status = 200, description = "Updated", body = MissionBlock))
)]
pub async fn update_mission_block(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<MissionBlockInput>,
) -> Result<Json<MissionBlock>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_mission_block(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/mission-blocks/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_mission_block(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_mission_block(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Training categories ---

#[utoipa::path(
    get,
    path = "/admin/training-categories",
    responses((status = 200, description = "Categories", body = [TrainingCategory]))
)]
pub async fn list_training_categories(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainingCategory>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_training_categories().await))
}

/// create_training_category
///
/// [Admin Route] The slug is derived from the name when submitted blank; a
/// duplicate slug fails the unique index and surfaces as a 500.
#[utoipa::path(
    post,
    path = "/admin/training-categories",
    request_body = TrainingCategoryInput,
    responses((status = 201, description = "Created", body = TrainingCategory))
)]
pub async fn create_training_category(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<TrainingCategoryInput>,
) -> Result<(StatusCode, Json<TrainingCategory>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_training_category(input).await {
        Some(category) => Ok((StatusCode::CREATED, Json(category))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/training-categories/{id}",
    request_body = TrainingCategoryInput,
    responses((status = 200, description = "Updated", body = TrainingCategory))
)]
pub async fn update_training_category(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TrainingCategoryInput>,
) -> Result<Json<TrainingCategory>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_training_category(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/training-categories/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_training_category(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_training_category(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Training videos ---

/// list_training_videos
///
/// [Admin Route] All videos, including non-public ones the gated listing
/// never shows.
#[utoipa::path(
    get,
    path = "/admin/training-videos",
    responses((status = 200, description = "Videos", body = [TrainingVideo]))
)]
pub async fn list_training_videos(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainingVideo>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_all_videos().await))
}

#[utoipa::path(
    post,
    path = "/admin/training-videos",
    request_body = TrainingVideoInput,
    responses((status = 201, description = "Created", body = TrainingVideo))
)]
pub async fn create_training_video(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<TrainingVideoInput>,
) -> Result<(StatusCode, Json<TrainingVideo>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_training_video(input).await {
        Some(video) => Ok((StatusCode::CREATED, Json(video))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/training-videos/{id}",
    request_body = TrainingVideoInput,
    responses((status = 200, description = "Updated", body = TrainingVideo))
)]
pub async fn update_training_video(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TrainingVideoInput>,
) -> Result<Json<TrainingVideo>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_training_video(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/training-videos/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_training_video(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_training_video(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Side hustle items ---

#[utoipa::path(
    get,
    path = "/admin/side-hustle-items",
    responses((status = 200, description = "Items", body = [SideHustleItem]))
)]
pub async fn list_side_hustle_items(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SideHustleItem>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_side_hustle_items().await))
}

#[utoipa::path(
    post,
    path = "/admin/side-hustle-items",
    request_body = SideHustleItemInput,
    responses((status = 201, description = "Created", body = SideHustleItem))
)]
pub async fn create_side_hustle_item(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<SideHustleItemInput>,
) -> Result<(StatusCode, Json<SideHustleItem>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_side_hustle_item(input).await {
        Some(item) => Ok((StatusCode::CREATED, Json(item))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/side-hustle-items/{id}",
    request_body = SideHustleItemInput,
    responses((status = 200, description = "Updated", body = SideHustleItem))
)]
pub async fn update_side_hustle_item(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<SideHustleItemInput>,
) -> Result<Json<SideHustleItem>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_side_hustle_item(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/side-hustle-items/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_side_hustle_item(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_side_hustle_item(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Roadmaps ---

#[utoipa::path(
    get,
    path = "/admin/roadmaps",
    responses((status = 200, description = "Roadmaps", body = [Roadmap]))
)]
pub async fn list_roadmaps(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Roadmap>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_roadmaps().await))
}

#[utoipa::path(
    post,
    path = "/admin/roadmaps",
    request_body = RoadmapInput,
    responses((status = 201, description = "Created", body = Roadmap))
)]
pub async fn create_roadmap(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<RoadmapInput>,
) -> Result<(StatusCode, Json<Roadmap>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_roadmap(input).await {
        Some(roadmap) => Ok((StatusCode::CREATED, Json(roadmap))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/roadmaps/{id}",
    request_body = RoadmapInput,
    responses((status = 200, description = "Updated", body = Roadmap))
)]
pub async fn update_roadmap(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<RoadmapInput>,
) -> Result<Json<Roadmap>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_roadmap(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// delete_roadmap
///
/// [Admin Route] Deleting a roadmap removes its pages with it.
#[utoipa::path(
    delete,
    path = "/admin/roadmaps/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_roadmap(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_roadmap(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Roadmap pages ---

/// list_roadmap_pages
///
/// [Admin Route] All pages, drafts included, optionally scoped to one
/// roadmap via `?roadmap_id=`.
#[utoipa::path(
    get,
    path = "/admin/roadmap-pages",
    params(PageFilter),
    responses((status = 200, description = "Pages", body = [RoadmapPage]))
)]
pub async fn list_roadmap_pages(
    user: StaffUser,
    State(state): State<AppState>,
    Query(filter): Query<PageFilter>,
) -> Result<Json<Vec<RoadmapPage>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_all_pages(filter.roadmap_id).await))
}

#[utoipa::path(
    post,
    path = "/admin/roadmap-pages",
    request_body = RoadmapPageInput,
    responses((status = 201, description = "Created", body = RoadmapPage))
)]
pub async fn create_roadmap_page(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<RoadmapPageInput>,
) -> Result<(StatusCode, Json<RoadmapPage>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_roadmap_page(input).await {
        Some(page) => Ok((StatusCode::CREATED, Json(page))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/roadmap-pages/{id}",
    request_body = RoadmapPageInput,
    responses((status = 200, description = "Updated", body = RoadmapPage))
)]
pub async fn update_roadmap_page(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<RoadmapPageInput>,
) -> Result<Json<RoadmapPage>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_roadmap_page(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/roadmap-pages/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_roadmap_page(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_roadmap_page(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- AI tools ---

#[utoipa::path(
    get,
    path = "/admin/ai-tools",
    responses((status = 200, description = "Tools", body = [AiTool]))
)]
pub async fn list_ai_tools(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AiTool>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_ai_tools().await))
}

#[utoipa::path(
    post,
    path = "/admin/ai-tools",
    request_body = AiToolInput,
    responses((status = 201, description = "Created", body = AiTool))
)]
pub async fn create_ai_tool(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<AiToolInput>,
) -> Result<(StatusCode, Json<AiTool>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_ai_tool(input).await {
        Some(tool) => Ok((StatusCode::CREATED, Json(tool))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/ai-tools/{id}",
    request_body = AiToolInput,
    responses((status = 200, description = "Updated", body = AiTool))
)]
pub async fn update_ai_tool(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<AiToolInput>,
) -> Result<Json<AiTool>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_ai_tool(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/ai-tools/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_ai_tool(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_ai_tool(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Hero images ---

#[utoipa::path(
    get,
    path = "/admin/hero-images",
    responses((status = 200, description = "Hero images", body = [HeroImage]))
)]
pub async fn list_hero_images(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<HeroImage>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_all_hero_images().await))
}

#[utoipa::path(
    post,
    path = "/admin/hero-images",
    request_body = HeroImageInput,
    responses((status = 201, description = "Created", body = HeroImage))
)]
pub async fn create_hero_image(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<HeroImageInput>,
) -> Result<(StatusCode, Json<HeroImage>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_hero_image(input).await {
        Some(image) => Ok((StatusCode::CREATED, Json(image))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/hero-images/{id}",
    request_body = HeroImageInput,
    responses((status = 200, description = "Updated", body = HeroImage))
)]
pub async fn update_hero_image(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<HeroImageInput>,
) -> Result<Json<HeroImage>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_hero_image(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/hero-images/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_hero_image(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_hero_image(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- News ---

#[utoipa::path(
    get,
    path = "/admin/news",
    responses((status = 200, description = "News posts", body = [News]))
)]
pub async fn list_news(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<News>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_news(None, None).await))
}

#[utoipa::path(
    post,
    path = "/admin/news",
    request_body = NewsInput,
    responses((status = 201, description = "Created", body = News))
)]
pub async fn create_news(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<NewsInput>,
) -> Result<(StatusCode, Json<News>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_news(input).await {
        Some(post) => Ok((StatusCode::CREATED, Json(post))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/news/{id}",
    request_body = NewsInput,
    responses((status = 200, description = "Updated", body = News))
)]
pub async fn update_news(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewsInput>,
) -> Result<Json<News>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_news(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/news/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_news(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_news(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- FAQ entries ---

#[utoipa::path(
    get,
    path = "/admin/faq-entries",
    responses((status = 200, description = "FAQ entries", body = [FaqEntry]))
)]
pub async fn list_faq_entries(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FaqEntry>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_all_faqs().await))
}

#[utoipa::path(
    post,
    path = "/admin/faq-entries",
    request_body = FaqEntryInput,
    responses((status = 201, description = "Created", body = FaqEntry))
)]
pub async fn create_faq_entry(
    user: StaffUser,
    State(state): State<AppState>,
    Json(input): Json<FaqEntryInput>,
) -> Result<(StatusCode, Json<FaqEntry>), StatusCode> {
    require_staff(&user)?;
    match state.repo.create_faq(input).await {
        Some(entry) => Ok((StatusCode::CREATED, Json(entry))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put,
    path = "/admin/faq-entries/{id}",
    request_body = FaqEntryInput,
    responses((status = 200, description = "Updated", body = FaqEntry))
)]
pub async fn update_faq_entry(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<FaqEntryInput>,
) -> Result<Json<FaqEntry>, StatusCode> {
    require_staff(&user)?;
    state
        .repo
        .update_faq(id, input)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/faq-entries/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_faq_entry(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_faq(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

// --- Questions ---

/// list_questions
///
/// [Admin Route] Every submitted question, newest first. This is the only
/// surface where private submissions are readable.
#[utoipa::path(
    get,
    path = "/admin/questions",
    responses((status = 200, description = "Questions", body = [Question]))
)]
pub async fn list_questions(
    user: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, StatusCode> {
    require_staff(&user)?;
    Ok(Json(state.repo.list_questions().await))
}

/// triage_question
///
/// [Admin Route] Moves a question through the triage statuses and optionally
/// links the FAQ entry that answers it. The status string is validated
/// against the known set; anything else is a 422.
#[utoipa::path(
    patch,
    path = "/admin/questions/{id}",
    request_body = QuestionTriage,
    responses(
        (status = 200, description = "Updated", body = Question),
        (status = 404, description = "Not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn triage_question(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(triage): Json<QuestionTriage>,
) -> Result<Json<Question>, StatusCode> {
    require_staff(&user)?;

    let known = [
        Question::STATUS_NEW,
        Question::STATUS_ANSWERED_PRIVATE,
        Question::STATUS_ANSWERED_PUBLIC,
        Question::STATUS_NO_ACTION,
    ];
    if !known.contains(&triage.status.as_str()) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    state
        .repo
        .triage_question(id, triage)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/admin/questions/{id}",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_question(
    user: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_staff(&user)?;
    if state.repo.delete_question(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
