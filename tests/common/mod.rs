use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use wolfe_site::{
    AppState,
    config::AppConfig,
    models::{
        AiTool, AiToolInput, FaqEntry, FaqEntryInput, HeroImage, HeroImageInput, MissionBlock,
        MissionBlockInput, News, NewsInput, Question, QuestionSubmission, QuestionTriage, Roadmap,
        RoadmapInput, RoadmapPage, RoadmapPageInput, SideHustleItem, SideHustleItemInput,
        SiteSetting, SiteSettingInput, StaffUser, TrainingCategory, TrainingCategoryInput,
        TrainingVideo, TrainingVideoInput, slug_or_derive,
    },
    repository::{Repository, RepositoryState},
};

/// Known staff identity for tests that need to pass authentication via the
/// local 'x-staff-id' bypass.
pub const TEST_STAFF_ID: Uuid = Uuid::from_u128(42);

/// MockRepo
///
/// In-memory stand-in for the Postgres repository. Reads serve pre-canned
/// data; list methods apply the same visibility rules the real queries
/// encode, so handler tests exercise filtering. Writes echo the input back
/// with a fixed id, or fail wholesale when `fail_writes` is set.
pub struct MockRepo {
    pub settings: Option<SiteSetting>,
    pub mission_blocks: Vec<MissionBlock>,
    pub categories: Vec<TrainingCategory>,
    pub videos: Vec<TrainingVideo>,
    pub side_hustle_items: Vec<SideHustleItem>,
    pub roadmaps: Vec<Roadmap>,
    pub pages: Vec<RoadmapPage>,
    pub ai_tools: Vec<AiTool>,
    pub hero_images: Vec<HeroImage>,
    pub news: Vec<News>,
    pub faqs: Vec<FaqEntry>,
    pub questions: Vec<Question>,
    pub staff_user: Option<StaffUser>,
    pub fail_writes: bool,
    pub delete_succeeds: bool,
}

impl Default for MockRepo {
    fn default() -> Self {
        MockRepo {
            settings: None,
            mission_blocks: vec![],
            categories: vec![],
            videos: vec![],
            side_hustle_items: vec![],
            roadmaps: vec![],
            pages: vec![],
            ai_tools: vec![],
            hero_images: vec![],
            news: vec![],
            faqs: vec![],
            questions: vec![],
            staff_user: Some(StaffUser {
                id: TEST_STAFF_ID,
                email: "staff@example.com".to_string(),
                role: "staff".to_string(),
            }),
            fail_writes: false,
            delete_succeeds: true,
        }
    }
}

#[async_trait]
impl Repository for MockRepo {
    async fn get_settings(&self) -> Option<SiteSetting> {
        self.settings.clone()
    }

    async fn list_mission_blocks(&self) -> Vec<MissionBlock> {
        self.mission_blocks.clone()
    }

    async fn list_training_categories(&self) -> Vec<TrainingCategory> {
        self.categories.clone()
    }

    async fn list_public_videos(&self, category_slug: Option<String>) -> Vec<TrainingVideo> {
        let category_id = category_slug.and_then(|slug| {
            self.categories.iter().find(|c| c.slug == slug).map(|c| c.id)
        });
        self.videos
            .iter()
            .filter(|v| v.is_public)
            .filter(|v| category_id.is_none() || v.category_id == category_id)
            .cloned()
            .collect()
    }

    async fn list_side_hustle_items(&self) -> Vec<SideHustleItem> {
        self.side_hustle_items.clone()
    }

    async fn list_roadmaps(&self) -> Vec<Roadmap> {
        self.roadmaps.clone()
    }

    async fn get_roadmap_by_slug(&self, slug: &str) -> Option<Roadmap> {
        self.roadmaps.iter().find(|r| r.slug == slug).cloned()
    }

    async fn list_published_pages(&self, roadmap_id: i64) -> Vec<RoadmapPage> {
        self.pages
            .iter()
            .filter(|p| p.roadmap_id == roadmap_id && p.is_published)
            .cloned()
            .collect()
    }

    async fn get_published_page(&self, roadmap_id: i64, slug: &str) -> Option<RoadmapPage> {
        self.pages
            .iter()
            .find(|p| p.roadmap_id == roadmap_id && p.slug == slug && p.is_published)
            .cloned()
    }

    async fn list_ai_tools(&self) -> Vec<AiTool> {
        self.ai_tools.clone()
    }

    async fn list_active_hero_images(&self, slot: &str, now: DateTime<Utc>) -> Vec<HeroImage> {
        self.hero_images
            .iter()
            .filter(|h| h.slot == slot && h.is_visible_at(now))
            .cloned()
            .collect()
    }

    async fn list_news(&self, q: Option<String>, category: Option<String>) -> Vec<News> {
        self.news
            .iter()
            .filter(|n| {
                q.as_deref().is_none_or(|q| {
                    let q = q.to_lowercase();
                    n.title.to_lowercase().contains(&q) || n.body.to_lowercase().contains(&q)
                })
            })
            .filter(|n| category.as_deref().is_none_or(|c| n.category == c))
            .cloned()
            .collect()
    }

    async fn get_news_by_slug(&self, slug: &str) -> Option<News> {
        self.news.iter().find(|n| n.slug == slug).cloned()
    }

    async fn list_published_faqs(&self) -> Vec<FaqEntry> {
        self.faqs.iter().filter(|f| f.is_published).cloned().collect()
    }

    async fn create_question(&self, sub: QuestionSubmission) -> Option<Question> {
        if self.fail_writes {
            return None;
        }
        Some(Question {
            id: 1,
            name: sub.name,
            category: sub.category,
            body: sub.body,
            status: Question::STATUS_NEW.to_string(),
            faq_entry_id: None,
            created_at: Utc::now(),
        })
    }

    async fn get_staff_user(&self, id: Uuid) -> Option<StaffUser> {
        self.staff_user.clone().filter(|u| u.id == id)
    }

    async fn ensure_staff_user(&self, email: &str) -> Option<StaffUser> {
        if self.fail_writes {
            return None;
        }
        Some(StaffUser {
            id: TEST_STAFF_ID,
            email: email.to_string(),
            role: "staff".to_string(),
        })
    }

    async fn migrate(&self) -> bool {
        !self.fail_writes
    }

    async fn upsert_settings(&self, input: SiteSettingInput) -> Option<SiteSetting> {
        if self.fail_writes {
            return None;
        }
        Some(SiteSetting {
            id: 1,
            hero_title: input.hero_title,
            hero_sub: input.hero_sub,
            hero_cta_text: input.hero_cta_text,
            hero_cta_link: input.hero_cta_link,
            calendar_embed_src: input.calendar_embed_src,
        })
    }

    async fn create_mission_block(&self, input: MissionBlockInput) -> Option<MissionBlock> {
        if self.fail_writes {
            return None;
        }
        Some(MissionBlock {
            id: 1,
            title: input.title,
            body: input.body,
            sort_order: input.sort_order,
        })
    }

    async fn update_mission_block(
        &self,
        id: i64,
        input: MissionBlockInput,
    ) -> Option<MissionBlock> {
        if self.fail_writes {
            return None;
        }
        Some(MissionBlock {
            id,
            title: input.title,
            body: input.body,
            sort_order: input.sort_order,
        })
    }

    async fn delete_mission_block(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn create_training_category(
        &self,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.name);
        Some(TrainingCategory {
            id: 1,
            name: input.name,
            slug,
        })
    }

    async fn update_training_category(
        &self,
        id: i64,
        input: TrainingCategoryInput,
    ) -> Option<TrainingCategory> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.name);
        Some(TrainingCategory {
            id,
            name: input.name,
            slug,
        })
    }

    async fn delete_training_category(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn list_all_videos(&self) -> Vec<TrainingVideo> {
        self.videos.clone()
    }

    async fn create_training_video(&self, input: TrainingVideoInput) -> Option<TrainingVideo> {
        if self.fail_writes {
            return None;
        }
        Some(TrainingVideo {
            id: 1,
            title: input.title,
            category_id: input.category_id,
            description: input.description,
            video_url: input.video_url,
            duration: input.duration,
            is_public: input.is_public,
        })
    }

    async fn update_training_video(
        &self,
        id: i64,
        input: TrainingVideoInput,
    ) -> Option<TrainingVideo> {
        if self.fail_writes {
            return None;
        }
        Some(TrainingVideo {
            id,
            title: input.title,
            category_id: input.category_id,
            description: input.description,
            video_url: input.video_url,
            duration: input.duration,
            is_public: input.is_public,
        })
    }

    async fn delete_training_video(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn create_side_hustle_item(&self, input: SideHustleItemInput) -> Option<SideHustleItem> {
        if self.fail_writes {
            return None;
        }
        Some(SideHustleItem {
            id: 1,
            name: input.name,
            category: input.category,
            summary: input.summary,
            pros: input.pros,
            cons: input.cons,
            link_url: input.link_url,
            image_url: input.image_url,
        })
    }

    async fn update_side_hustle_item(
        &self,
        id: i64,
        input: SideHustleItemInput,
    ) -> Option<SideHustleItem> {
        if self.fail_writes {
            return None;
        }
        Some(SideHustleItem {
            id,
            name: input.name,
            category: input.category,
            summary: input.summary,
            pros: input.pros,
            cons: input.cons,
            link_url: input.link_url,
            image_url: input.image_url,
        })
    }

    async fn delete_side_hustle_item(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn create_roadmap(&self, input: RoadmapInput) -> Option<Roadmap> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.name);
        Some(Roadmap {
            id: 1,
            name: input.name,
            slug,
            kind: input.kind,
            sort_order: input.sort_order,
            intro: input.intro,
        })
    }

    async fn update_roadmap(&self, id: i64, input: RoadmapInput) -> Option<Roadmap> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.name);
        Some(Roadmap {
            id,
            name: input.name,
            slug,
            kind: input.kind,
            sort_order: input.sort_order,
            intro: input.intro,
        })
    }

    async fn delete_roadmap(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn list_all_pages(&self, roadmap_id: Option<i64>) -> Vec<RoadmapPage> {
        self.pages
            .iter()
            .filter(|p| roadmap_id.is_none_or(|rid| p.roadmap_id == rid))
            .cloned()
            .collect()
    }

    async fn create_roadmap_page(&self, input: RoadmapPageInput) -> Option<RoadmapPage> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.title);
        Some(RoadmapPage {
            id: 1,
            roadmap_id: input.roadmap_id,
            sort_order: input.sort_order,
            title: input.title,
            slug,
            cover_image: input.cover_image,
            body: input.body,
            is_published: input.is_published,
        })
    }

    async fn update_roadmap_page(&self, id: i64, input: RoadmapPageInput) -> Option<RoadmapPage> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.title);
        Some(RoadmapPage {
            id,
            roadmap_id: input.roadmap_id,
            sort_order: input.sort_order,
            title: input.title,
            slug,
            cover_image: input.cover_image,
            body: input.body,
            is_published: input.is_published,
        })
    }

    async fn delete_roadmap_page(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn create_ai_tool(&self, input: AiToolInput) -> Option<AiTool> {
        if self.fail_writes {
            return None;
        }
        Some(AiTool {
            id: 1,
            name: input.name,
            category: input.category,
            intro: input.intro,
            howto: input.howto,
            link_url: input.link_url,
            image_url: input.image_url,
        })
    }

    async fn update_ai_tool(&self, id: i64, input: AiToolInput) -> Option<AiTool> {
        if self.fail_writes {
            return None;
        }
        Some(AiTool {
            id,
            name: input.name,
            category: input.category,
            intro: input.intro,
            howto: input.howto,
            link_url: input.link_url,
            image_url: input.image_url,
        })
    }

    async fn delete_ai_tool(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn list_all_hero_images(&self) -> Vec<HeroImage> {
        self.hero_images.clone()
    }

    async fn create_hero_image(&self, input: HeroImageInput) -> Option<HeroImage> {
        if self.fail_writes {
            return None;
        }
        Some(HeroImage {
            id: 1,
            slot: input.slot,
            sort_order: input.sort_order,
            image_url: input.image_url,
            alt: input.alt,
            is_active: input.is_active,
            start_at: input.start_at,
            end_at: input.end_at,
        })
    }

    async fn update_hero_image(&self, id: i64, input: HeroImageInput) -> Option<HeroImage> {
        if self.fail_writes {
            return None;
        }
        Some(HeroImage {
            id,
            slot: input.slot,
            sort_order: input.sort_order,
            image_url: input.image_url,
            alt: input.alt,
            is_active: input.is_active,
            start_at: input.start_at,
            end_at: input.end_at,
        })
    }

    async fn delete_hero_image(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn create_news(&self, input: NewsInput) -> Option<News> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.title);
        Some(News {
            id: 1,
            title: input.title,
            slug,
            category: input.category,
            body: input.body,
            is_pinned: input.is_pinned,
            created_at: Utc::now(),
        })
    }

    async fn update_news(&self, id: i64, input: NewsInput) -> Option<News> {
        if self.fail_writes {
            return None;
        }
        let slug = slug_or_derive(&input.slug, &input.title);
        Some(News {
            id,
            title: input.title,
            slug,
            category: input.category,
            body: input.body,
            is_pinned: input.is_pinned,
            created_at: Utc::now(),
        })
    }

    async fn delete_news(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn list_all_faqs(&self) -> Vec<FaqEntry> {
        self.faqs.clone()
    }

    async fn create_faq(&self, input: FaqEntryInput) -> Option<FaqEntry> {
        if self.fail_writes {
            return None;
        }
        Some(FaqEntry {
            id: 1,
            question_text: input.question_text,
            answer: input.answer,
            category: input.category,
            is_published: input.is_published,
            created_at: Utc::now(),
        })
    }

    async fn update_faq(&self, id: i64, input: FaqEntryInput) -> Option<FaqEntry> {
        if self.fail_writes {
            return None;
        }
        Some(FaqEntry {
            id,
            question_text: input.question_text,
            answer: input.answer,
            category: input.category,
            is_published: input.is_published,
            created_at: Utc::now(),
        })
    }

    async fn delete_faq(&self, _id: i64) -> bool {
        self.delete_succeeds
    }

    async fn list_questions(&self) -> Vec<Question> {
        self.questions.clone()
    }

    async fn triage_question(&self, id: i64, triage: QuestionTriage) -> Option<Question> {
        if self.fail_writes {
            return None;
        }
        self.questions.iter().find(|q| q.id == id).map(|q| {
            let mut q = q.clone();
            q.status = triage.status;
            q.faq_entry_id = triage.faq_entry_id;
            q
        })
    }

    async fn delete_question(&self, _id: i64) -> bool {
        self.delete_succeeds
    }
}

/// Assemble an AppState around a mock repository and the default test config.
pub fn create_test_state(repo: MockRepo) -> AppState {
    AppState {
        repo: Arc::new(repo) as RepositoryState,
        config: AppConfig::default(),
    }
}
