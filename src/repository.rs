use crate::models::{
    AiTool, AiToolInput, FaqEntry, FaqEntryInput, HeroImage, HeroImageInput, MissionBlock,
    MissionBlockInput, News, NewsInput, Question, QuestionSubmission, QuestionTriage, Roadmap,
    RoadmapInput, RoadmapPage, RoadmapPageInput, SideHustleItem, SideHustleItemInput, SiteSetting,
    SiteSettingInput, StaffUser, TrainingCategory, TrainingCategoryInput, TrainingVideo,
    TrainingVideoInput, slug_or_derive,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Abstract contract for all persistence operations, so handlers never see
/// the concrete store. The public half serves the gated content pages and
/// always enforces the relevant visibility flag in its queries; the admin
/// half is plain CRUD over every entity, mirroring the auto-generated admin
/// surface of a conventional content site.
///
/// **Send + Sync + async_trait** make `Arc<dyn Repository>` shareable across
/// Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Public content reads ---
    async fn get_settings(&self) -> Option<SiteSetting>;
    async fn list_mission_blocks(&self) -> Vec<MissionBlock>;
    async fn list_training_categories(&self) -> Vec<TrainingCategory>;
    // Public listing. Must enforce is_public=true; optional category slug filter.
    async fn list_public_videos(&self, category_slug: Option<String>) -> Vec<TrainingVideo>;
    async fn list_side_hustle_items(&self) -> Vec<SideHustleItem>;
    async fn list_roadmaps(&self) -> Vec<Roadmap>;
    async fn get_roadmap_by_slug(&self, slug: &str) -> Option<Roadmap>;
    // Published pages of one roadmap, in display order.
    async fn list_published_pages(&self, roadmap_id: i64) -> Vec<RoadmapPage>;
    async fn get_published_page(&self, roadmap_id: i64, slug: &str) -> Option<RoadmapPage>;
    async fn list_ai_tools(&self) -> Vec<AiTool>;
    // Active hero images for a slot whose optional window contains `now`.
    async fn list_active_hero_images(&self, slot: &str, now: DateTime<Utc>) -> Vec<HeroImage>;
    // Keyword (title+body, case-insensitive) and category filters; pinned first.
    async fn list_news(&self, q: Option<String>, category: Option<String>) -> Vec<News>;
    async fn get_news_by_slug(&self, slug: &str) -> Option<News>;
    async fn list_published_faqs(&self) -> Vec<FaqEntry>;
    // Question-box submission; status is always 'new'.
    async fn create_question(&self, sub: QuestionSubmission) -> Option<Question>;

    // --- Staff / ops ---
    async fn get_staff_user(&self, id: Uuid) -> Option<StaffUser>;
    // Idempotent superuser bootstrap used by /run-migrate/.
    async fn ensure_staff_user(&self, email: &str) -> Option<StaffUser>;
    // Applies pending sqlx migrations. Returns false on failure.
    async fn migrate(&self) -> bool;

    // --- Admin CRUD ---
    async fn upsert_settings(&self, input: SiteSettingInput) -> Option<SiteSetting>;

    async fn create_mission_block(&self, input: MissionBlockInput) -> Option<MissionBlock>;
    async fn update_mission_block(&self, id: i64, input: MissionBlockInput)
    -> Option<MissionBlock>;
    async fn delete_mission_block(&self, id: i64) -> bool;

    async fn create_training_category(
        &self,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory>;
    async fn update_training_category(
        &self,
        id: i64,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory>;
    async fn delete_training_category(&self, id: i64) -> bool;

    // Admin listing: includes non-public videos.
    async fn list_all_videos(&self) -> Vec<TrainingVideo>;
    async fn create_training_video(&self, input: TrainingVideoInput) -> Option<TrainingVideo>;
    async fn update_training_video(
        &self,
        id: i64,
        input: TrainingVideoInput,
    ) -> Option<TrainingVideo>;
    async fn delete_training_video(&self, id: i64) -> bool;

    async fn create_side_hustle_item(&self, input: SideHustleItemInput) -> Option<SideHustleItem>;
    async fn update_side_hustle_item(
        &self,
        id: i64,
        input: SideHustleItemInput,
    ) -> Option<SideHustleItem>;
    async fn delete_side_hustle_item(&self, id: i64) -> bool;

    async fn create_roadmap(&self, input: RoadmapInput) -> Option<Roadmap>;
    async fn update_roadmap(&self, id: i64, input: RoadmapInput) -> Option<Roadmap>;
    async fn delete_roadmap(&self, id: i64) -> bool;

    // Admin listing: includes unpublished pages, optionally one roadmap only.
    async fn list_all_pages(&self, roadmap_id: Option<i64>) -> Vec<RoadmapPage>;
    async fn create_roadmap_page(&self, input: RoadmapPageInput) -> Option<RoadmapPage>;
    async fn update_roadmap_page(&self, id: i64, input: RoadmapPageInput) -> Option<RoadmapPage>;
    async fn delete_roadmap_page(&self, id: i64) -> bool;

    async fn create_ai_tool(&self, input: AiToolInput) -> Option<AiTool>;
    async fn update_ai_tool(&self, id: i64, input: AiToolInput) -> Option<AiTool>;
    async fn delete_ai_tool(&self, id: i64) -> bool;

    async fn list_all_hero_images(&self) -> Vec<HeroImage>;
    async fn create_hero_image(&self, input: HeroImageInput) -> Option<HeroImage>;
    async fn update_hero_image(&self, id: i64, input: HeroImageInput) -> Option<HeroImage>;
    async fn delete_hero_image(&self, id: i64) -> bool;

    async fn create_news(&self, input: NewsInput) -> Option<News>;
    async fn update_news(&self, id: i64, input: NewsInput) -> Option<News>;
    async fn delete_news(&self, id: i64) -> bool;

    async fn list_all_faqs(&self) -> Vec<FaqEntry>;
    async fn create_faq(&self, input: FaqEntryInput) -> Option<FaqEntry>;
    async fn update_faq(&self, id: i64, input: FaqEntryInput) -> Option<FaqEntry>;
    async fn delete_faq(&self, id: i64) -> bool;

    async fn list_questions(&self) -> Vec<Question>;
    // Status / FAQ-link update for triage.
    async fn triage_question(&self, id: i64, triage: QuestionTriage) -> Option<Question>;
    async fn delete_question(&self, id: i64) -> bool;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// Concrete `Repository` backed by PostgreSQL. All queries use the runtime
/// sqlx API (`query_as` / `QueryBuilder`), bound parameters only.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all<T>(&self, sql: &str, label: &str) -> Vec<T>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        match sqlx::query_as::<_, T>(sql).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("{} error: {:?}", label, e);
                vec![]
            }
        }
    }

    async fn exec_delete(&self, sql: &str, id: i64, label: &str) -> bool {
        match sqlx::query(sql).bind(id).execute(&self.pool).await {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("{} error: {:?}", label, e);
                false
            }
        }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// Settings singleton: the first row wins, matching the original site's
    /// behavior when more than one row exists.
    async fn get_settings(&self) -> Option<SiteSetting> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings ORDER BY id LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_settings error: {:?}", e);
                None
            })
    }

    async fn list_mission_blocks(&self) -> Vec<MissionBlock> {
        self.fetch_all(
            "SELECT * FROM mission_blocks ORDER BY sort_order, id",
            "list_mission_blocks",
        )
        .await
    }

    async fn list_training_categories(&self) -> Vec<TrainingCategory> {
        self.fetch_all(
            "SELECT * FROM training_categories ORDER BY id",
            "list_training_categories",
        )
        .await
    }

    /// Public video listing. `is_public = true` is unconditional; the
    /// category filter joins on the category slug.
    async fn list_public_videos(&self, category_slug: Option<String>) -> Vec<TrainingVideo> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "SELECT v.id, v.title, v.category_id, v.description, v.video_url, v.duration, v.is_public \
             FROM training_videos v WHERE v.is_public = true ",
        );
        if let Some(slug) = category_slug {
            builder.push(
                " AND v.category_id IN (SELECT id FROM training_categories WHERE slug = ",
            );
            builder.push_bind(slug);
            builder.push(")");
        }
        builder.push(" ORDER BY v.id");

        match builder
            .build_query_as::<TrainingVideo>()
            .fetch_all(&self.pool)
            .await
        {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("list_public_videos error: {:?}", e);
                vec![]
            }
        }
    }

    async fn list_side_hustle_items(&self) -> Vec<SideHustleItem> {
        self.fetch_all(
            "SELECT * FROM side_hustle_items ORDER BY id",
            "list_side_hustle_items",
        )
        .await
    }

    async fn list_roadmaps(&self) -> Vec<Roadmap> {
        self.fetch_all(
            "SELECT * FROM roadmaps ORDER BY sort_order, id",
            "list_roadmaps",
        )
        .await
    }

    async fn get_roadmap_by_slug(&self, slug: &str) -> Option<Roadmap> {
        sqlx::query_as::<_, Roadmap>("SELECT * FROM roadmaps WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_roadmap_by_slug error: {:?}", e);
                None
            })
    }

    async fn list_published_pages(&self, roadmap_id: i64) -> Vec<RoadmapPage> {
        sqlx::query_as::<_, RoadmapPage>(
            "SELECT * FROM roadmap_pages WHERE roadmap_id = $1 AND is_published = true \
             ORDER BY sort_order, id",
        )
        .bind(roadmap_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_published_pages error: {:?}", e);
            vec![]
        })
    }

    /// Detail lookup only sees published pages; an unpublished page is a 404
    /// to the public surface.
    async fn get_published_page(&self, roadmap_id: i64, slug: &str) -> Option<RoadmapPage> {
        sqlx::query_as::<_, RoadmapPage>(
            "SELECT * FROM roadmap_pages WHERE roadmap_id = $1 AND slug = $2 \
             AND is_published = true",
        )
        .bind(roadmap_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_published_page error: {:?}", e);
            None
        })
    }

    async fn list_ai_tools(&self) -> Vec<AiTool> {
        self.fetch_all("SELECT * FROM ai_tools ORDER BY id", "list_ai_tools")
            .await
    }

    /// Time-windowed hero listing: NULL bounds are open.
    async fn list_active_hero_images(&self, slot: &str, now: DateTime<Utc>) -> Vec<HeroImage> {
        sqlx::query_as::<_, HeroImage>(
            "SELECT * FROM hero_images WHERE slot = $1 AND is_active = true \
             AND (start_at IS NULL OR start_at <= $2) \
             AND (end_at IS NULL OR end_at >= $2) \
             ORDER BY sort_order, id",
        )
        .bind(slot)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_active_hero_images error: {:?}", e);
            vec![]
        })
    }

    /// News listing with keyword and category filters, built safely with
    /// bound parameters. Pinned items lead, newest first inside each group.
    async fn list_news(&self, q: Option<String>, category: Option<String>) -> Vec<News> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM news WHERE TRUE ");

        if let Some(q) = q.filter(|q| !q.trim().is_empty()) {
            let pattern = format!("%{}%", q.trim());
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR body ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(c) = category.filter(|c| !c.is_empty()) {
            builder.push(" AND category = ");
            builder.push_bind(c);
        }

        builder.push(" ORDER BY is_pinned DESC, created_at DESC");

        match builder.build_query_as::<News>().fetch_all(&self.pool).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("list_news error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_news_by_slug(&self, slug: &str) -> Option<News> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_news_by_slug error: {:?}", e);
                None
            })
    }

    async fn list_published_faqs(&self) -> Vec<FaqEntry> {
        self.fetch_all(
            "SELECT * FROM faq_entries WHERE is_published = true ORDER BY created_at DESC",
            "list_published_faqs",
        )
        .await
    }

    async fn create_question(&self, sub: QuestionSubmission) -> Option<Question> {
        sqlx::query_as::<_, Question>(
            "INSERT INTO questions (name, category, body, status, created_at) \
             VALUES ($1, $2, $3, 'new', NOW()) RETURNING *",
        )
        .bind(sub.name)
        .bind(sub.category)
        .bind(sub.body)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_question error: {:?}", e);
            None
        })
    }

    // --- Staff / ops ---

    async fn get_staff_user(&self, id: Uuid) -> Option<StaffUser> {
        sqlx::query_as::<_, StaffUser>("SELECT id, email, role FROM staff_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or(None)
    }

    async fn ensure_staff_user(&self, email: &str) -> Option<StaffUser> {
        sqlx::query_as::<_, StaffUser>(
            "INSERT INTO staff_users (id, email, role) VALUES ($1, $2, 'staff') \
             ON CONFLICT (email) DO UPDATE SET role = 'staff' \
             RETURNING id, email, role",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("ensure_staff_user error: {:?}", e);
            None
        })
    }

    async fn migrate(&self) -> bool {
        match sqlx::migrate!("./migrations").run(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("migrate error: {:?}", e);
                false
            }
        }
    }

    // --- Admin CRUD ---

    /// The settings row is pinned at id = 1 so the form is a pure upsert.
    async fn upsert_settings(&self, input: SiteSettingInput) -> Option<SiteSetting> {
        sqlx::query_as::<_, SiteSetting>(
            "INSERT INTO site_settings (id, hero_title, hero_sub, hero_cta_text, hero_cta_link, calendar_embed_src) \
             VALUES (1, $1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET hero_title = $1, hero_sub = $2, hero_cta_text = $3, \
             hero_cta_link = $4, calendar_embed_src = $5 RETURNING *",
        )
        .bind(input.hero_title)
        .bind(input.hero_sub)
        .bind(input.hero_cta_text)
        .bind(input.hero_cta_link)
        .bind(input.calendar_embed_src)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("upsert_settings error: {:?}", e);
            None
        })
    }

    async fn create_mission_block(&self, input: MissionBlockInput) -> Option<MissionBlock> {
        sqlx::query_as::<_, MissionBlock>(
            "INSERT INTO mission_blocks (title, body, sort_order) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(input.title)
        .bind(input.body)
        .bind(input.sort_order)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_mission_block error: {:?}", e);
            None
        })
    }

    async fn update_mission_block(
        &self,
        id: i64,
        input: MissionBlockInput,
    ) -> Option<MissionBlock> {
        sqlx::query_as::<_, MissionBlock>(
            "UPDATE mission_blocks SET title = $2, body = $3, sort_order = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.title)
        .bind(input.body)
        .bind(input.sort_order)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_mission_block error: {:?}", e);
            None
        })
    }

    async fn delete_mission_block(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM mission_blocks WHERE id = $1",
            id,
            "delete_mission_block",
        )
        .await
    }

    /// Category create derives the slug from the name when left blank.
    async fn create_training_category(
        &self,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory> {
        let slug = slug_or_derive(&input.slug, &input.name);
        sqlx::query_as::<_, TrainingCategory>(
            "INSERT INTO training_categories (name, slug) VALUES ($1, $2) RETURNING *",
        )
        .bind(input.name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_training_category error: {:?}", e);
            None
        })
    }

    async fn update_training_category(
        &self,
        id: i64,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory> {
        let slug = slug_or_derive(&input.slug, &input.name);
        sqlx::query_as::<_, TrainingCategory>(
            "UPDATE training_categories SET name = $2, slug = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_training_category error: {:?}", e);
            None
        })
    }

    async fn delete_training_category(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM training_categories WHERE id = $1",
            id,
            "delete_training_category",
        )
        .await
    }

    async fn list_all_videos(&self) -> Vec<TrainingVideo> {
        self.fetch_all(
            "SELECT * FROM training_videos ORDER BY id",
            "list_all_videos",
        )
        .await
    }

    async fn create_training_video(&self, input: TrainingVideoInput) -> Option<TrainingVideo> {
        sqlx::query_as::<_, TrainingVideo>(
            "INSERT INTO training_videos (title, category_id, description, video_url, duration, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(input.title)
        .bind(input.category_id)
        .bind(input.description)
        .bind(input.video_url)
        .bind(input.duration)
        .bind(input.is_public)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_training_video error: {:?}", e);
            None
        })
    }

    async fn update_training_video(
        &self,
        id: i64,
        input: TrainingVideoInput,
    ) -> Option<TrainingVideo> {
        sqlx::query_as::<_, TrainingVideo>(
            "UPDATE training_videos SET title = $2, category_id = $3, description = $4, \
             video_url = $5, duration = $6, is_public = $7 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.title)
        .bind(input.category_id)
        .bind(input.description)
        .bind(input.video_url)
        .bind(input.duration)
        .bind(input.is_public)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_training_video error: {:?}", e);
            None
        })
    }

    async fn delete_training_video(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM training_videos WHERE id = $1",
            id,
            "delete_training_video",
        )
        .await
    }

    async fn create_side_hustle_item(&self, input: SideHustleItemInput) -> Option<SideHustleItem> {
        sqlx::query_as::<_, SideHustleItem>(
            "INSERT INTO side_hustle_items (name, category, summary, pros, cons, link_url, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(input.name)
        .bind(input.category)
        .bind(input.summary)
        .bind(input.pros)
        .bind(input.cons)
        .bind(input.link_url)
        .bind(input.image_url)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_side_hustle_item error: {:?}", e);
            None
        })
    }

    async fn update_side_hustle_item(
        &self,
        id: i64,
        input: SideHustleItemInput,
    ) -> Option<SideHustleItem> {
        sqlx::query_as::<_, SideHustleItem>(
            "UPDATE side_hustle_items SET name = $2, category = $3, summary = $4, pros = $5, \
             cons = $6, link_url = $7, image_url = $8 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.name)
        .bind(input.category)
        .bind(input.summary)
        .bind(input.pros)
        .bind(input.cons)
        .bind(input.link_url)
        .bind(input.image_url)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_side_hustle_item error: {:?}", e);
            None
        })
    }

    async fn delete_side_hustle_item(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM side_hustle_items WHERE id = $1",
            id,
            "delete_side_hustle_item",
        )
        .await
    }

    async fn create_roadmap(&self, input: RoadmapInput) -> Option<Roadmap> {
        let slug = slug_or_derive(&input.slug, &input.name);
        sqlx::query_as::<_, Roadmap>(
            "INSERT INTO roadmaps (name, slug, kind, sort_order, intro) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(input.name)
        .bind(slug)
        .bind(input.kind)
        .bind(input.sort_order)
        .bind(input.intro)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_roadmap error: {:?}", e);
            None
        })
    }

    async fn update_roadmap(&self, id: i64, input: RoadmapInput) -> Option<Roadmap> {
        let slug = slug_or_derive(&input.slug, &input.name);
        sqlx::query_as::<_, Roadmap>(
            "UPDATE roadmaps SET name = $2, slug = $3, kind = $4, sort_order = $5, intro = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.name)
        .bind(slug)
        .bind(input.kind)
        .bind(input.sort_order)
        .bind(input.intro)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_roadmap error: {:?}", e);
            None
        })
    }

    /// Pages cascade with their roadmap (FK ON DELETE CASCADE).
    async fn delete_roadmap(&self, id: i64) -> bool {
        self.exec_delete("DELETE FROM roadmaps WHERE id = $1", id, "delete_roadmap")
            .await
    }

    async fn list_all_pages(&self, roadmap_id: Option<i64>) -> Vec<RoadmapPage> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM roadmap_pages WHERE TRUE ");
        if let Some(rid) = roadmap_id {
            builder.push(" AND roadmap_id = ");
            builder.push_bind(rid);
        }
        builder.push(" ORDER BY roadmap_id, sort_order, id");

        match builder
            .build_query_as::<RoadmapPage>()
            .fetch_all(&self.pool)
            .await
        {
            Ok(pages) => pages,
            Err(e) => {
                tracing::error!("list_all_pages error: {:?}", e);
                vec![]
            }
        }
    }

    async fn create_roadmap_page(&self, input: RoadmapPageInput) -> Option<RoadmapPage> {
        let slug = slug_or_derive(&input.slug, &input.title);
        sqlx::query_as::<_, RoadmapPage>(
            "INSERT INTO roadmap_pages (roadmap_id, sort_order, title, slug, cover_image, body, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(input.roadmap_id)
        .bind(input.sort_order)
        .bind(input.title)
        .bind(slug)
        .bind(input.cover_image)
        .bind(input.body)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_roadmap_page error: {:?}", e);
            None
        })
    }

    async fn update_roadmap_page(&self, id: i64, input: RoadmapPageInput) -> Option<RoadmapPage> {
        let slug = slug_or_derive(&input.slug, &input.title);
        sqlx::query_as::<_, RoadmapPage>(
            "UPDATE roadmap_pages SET roadmap_id = $2, sort_order = $3, title = $4, slug = $5, \
             cover_image = $6, body = $7, is_published = $8 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.roadmap_id)
        .bind(input.sort_order)
        .bind(input.title)
        .bind(slug)
        .bind(input.cover_image)
        .bind(input.body)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_roadmap_page error: {:?}", e);
            None
        })
    }

    async fn delete_roadmap_page(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM roadmap_pages WHERE id = $1",
            id,
            "delete_roadmap_page",
        )
        .await
    }

    async fn create_ai_tool(&self, input: AiToolInput) -> Option<AiTool> {
        sqlx::query_as::<_, AiTool>(
            "INSERT INTO ai_tools (name, category, intro, howto, link_url, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(input.name)
        .bind(input.category)
        .bind(input.intro)
        .bind(input.howto)
        .bind(input.link_url)
        .bind(input.image_url)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_ai_tool error: {:?}", e);
            None
        })
    }

    async fn update_ai_tool(&self, id: i64, input: AiToolInput) -> Option<AiTool> {
        sqlx::query_as::<_, AiTool>(
            "UPDATE ai_tools SET name = $2, category = $3, intro = $4, howto = $5, \
             link_url = $6, image_url = $7 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.name)
        .bind(input.category)
        .bind(input.intro)
        .bind(input.howto)
        .bind(input.link_url)
        .bind(input.image_url)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_ai_tool error: {:?}", e);
            None
        })
    }

    async fn delete_ai_tool(&self, id: i64) -> bool {
        self.exec_delete("DELETE FROM ai_tools WHERE id = $1", id, "delete_ai_tool")
            .await
    }

    async fn list_all_hero_images(&self) -> Vec<HeroImage> {
        self.fetch_all(
            "SELECT * FROM hero_images ORDER BY slot, sort_order, id",
            "list_all_hero_images",
        )
        .await
    }

    async fn create_hero_image(&self, input: HeroImageInput) -> Option<HeroImage> {
        sqlx::query_as::<_, HeroImage>(
            "INSERT INTO hero_images (slot, sort_order, image_url, alt, is_active, start_at, end_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(input.slot)
        .bind(input.sort_order)
        .bind(input.image_url)
        .bind(input.alt)
        .bind(input.is_active)
        .bind(input.start_at)
        .bind(input.end_at)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_hero_image error: {:?}", e);
            None
        })
    }

    async fn update_hero_image(&self, id: i64, input: HeroImageInput) -> Option<HeroImage> {
        sqlx::query_as::<_, HeroImage>(
            "UPDATE hero_images SET slot = $2, sort_order = $3, image_url = $4, alt = $5, \
             is_active = $6, start_at = $7, end_at = $8 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.slot)
        .bind(input.sort_order)
        .bind(input.image_url)
        .bind(input.alt)
        .bind(input.is_active)
        .bind(input.start_at)
        .bind(input.end_at)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_hero_image error: {:?}", e);
            None
        })
    }

    async fn delete_hero_image(&self, id: i64) -> bool {
        self.exec_delete(
            "DELETE FROM hero_images WHERE id = $1",
            id,
            "delete_hero_image",
        )
        .await
    }

    async fn create_news(&self, input: NewsInput) -> Option<News> {
        let slug = slug_or_derive(&input.slug, &input.title);
        sqlx::query_as::<_, News>(
            "INSERT INTO news (title, slug, category, body, is_pinned, created_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) RETURNING *",
        )
        .bind(input.title)
        .bind(slug)
        .bind(input.category)
        .bind(input.body)
        .bind(input.is_pinned)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_news error: {:?}", e);
            None
        })
    }

    async fn update_news(&self, id: i64, input: NewsInput) -> Option<News> {
        let slug = slug_or_derive(&input.slug, &input.title);
        sqlx::query_as::<_, News>(
            "UPDATE news SET title = $2, slug = $3, category = $4, body = $5, is_pinned = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.title)
        .bind(slug)
        .bind(input.category)
        .bind(input.body)
        .bind(input.is_pinned)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_news error: {:?}", e);
            None
        })
    }

    async fn delete_news(&self, id: i64) -> bool {
        self.exec_delete("DELETE FROM news WHERE id = $1", id, "delete_news")
            .await
    }

    async fn list_all_faqs(&self) -> Vec<FaqEntry> {
        self.fetch_all(
            "SELECT * FROM faq_entries ORDER BY created_at DESC",
            "list_all_faqs",
        )
        .await
    }

    async fn create_faq(&self, input: FaqEntryInput) -> Option<FaqEntry> {
        sqlx::query_as::<_, FaqEntry>(
            "INSERT INTO faq_entries (question_text, answer, category, is_published, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) RETURNING *",
        )
        .bind(input.question_text)
        .bind(input.answer)
        .bind(input.category)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_faq error: {:?}", e);
            None
        })
    }

    async fn update_faq(&self, id: i64, input: FaqEntryInput) -> Option<FaqEntry> {
        sqlx::query_as::<_, FaqEntry>(
            "UPDATE faq_entries SET question_text = $2, answer = $3, category = $4, \
             is_published = $5 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(input.question_text)
        .bind(input.answer)
        .bind(input.category)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_faq error: {:?}", e);
            None
        })
    }

    async fn delete_faq(&self, id: i64) -> bool {
        self.exec_delete("DELETE FROM faq_entries WHERE id = $1", id, "delete_faq")
            .await
    }

    async fn list_questions(&self) -> Vec<Question> {
        self.fetch_all(
            "SELECT * FROM questions ORDER BY created_at DESC",
            "list_questions",
        )
        .await
    }

    async fn triage_question(&self, id: i64, triage: QuestionTriage) -> Option<Question> {
        sqlx::query_as::<_, Question>(
            "UPDATE questions SET status = $2, faq_entry_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(triage.status)
        .bind(triage.faq_entry_id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("triage_question error: {:?}", e);
            None
        })
    }

    async fn delete_question(&self, id: i64) -> bool {
        self.exec_delete("DELETE FROM questions WHERE id = $1", id, "delete_question")
            .await
    }
}
