use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::markdown::slugify;

// --- Core Application Schemas (Mapped to Database) ---

/// StaffUser
///
/// Canonical identity record for admin-side callers, stored in `staff_users`.
/// Resolved during bearer-token authentication; staff callers also pass the
/// access gate unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct StaffUser {
    pub id: Uuid,
    pub email: String,
    /// RBAC field: 'staff' for all admin users.
    pub role: String,
}

/// SiteSetting
///
/// Site-wide settings singleton: hero copy, CTA, and the calendar embed URL.
/// Only the first row is ever consulted.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct SiteSetting {
    pub id: i64,
    pub hero_title: String,
    pub hero_sub: String,
    pub hero_cta_text: String,
    pub hero_cta_link: String,
    pub calendar_embed_src: String,
}

/// MissionBlock
///
/// Ordered title+body pair shown on the mission page.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct MissionBlock {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Display sequence, ascending.
    pub sort_order: i32,
}

/// TrainingCategory
///
/// Lookup table for grouping training videos. The slug is derived from the
/// name when left blank and must be globally unique.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct TrainingCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// TrainingVideo
///
/// A training video entry. Stores the raw viewing URL as entered by staff;
/// the embeddable URL is derived on the fly by [`TrainingVideo::embed_src`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct TrainingVideo {
    pub id: i64,
    pub title: String,
    pub category_id: Option<i64>,
    pub description: String,
    /// Raw YouTube viewing URL (watch?v=..., youtu.be/... or /embed/ form).
    pub video_url: String,
    pub duration: String,
    pub is_public: bool,
}

impl TrainingVideo {
    /// Derive the privacy-enhanced embeddable URL from the stored viewing URL.
    ///
    /// Recognized shapes:
    /// - `...watch?v=ID...`  → `https://www.youtube-nocookie.com/embed/ID`
    /// - `youtu.be/ID`       → `https://www.youtube-nocookie.com/embed/ID`
    /// - already `/embed/`   → unchanged
    ///
    /// Anything else passes through unchanged.
    pub fn embed_src(&self) -> String {
        derive_embed_src(&self.video_url)
    }
}

/// Pure string transform behind [`TrainingVideo::embed_src`].
pub fn derive_embed_src(url: &str) -> String {
    if let Some(tail) = url.split("watch?v=").nth(1) {
        let vid = tail.split('&').next().unwrap_or(tail);
        if !vid.is_empty() {
            return format!("https://www.youtube-nocookie.com/embed/{}", vid);
        }
    } else if let Some(tail) = url.split("youtu.be/").nth(1) {
        let vid = tail.split('?').next().unwrap_or(tail);
        if !vid.is_empty() {
            return format!("https://www.youtube-nocookie.com/embed/{}", vid);
        }
    }
    // /embed/ URLs and unrecognized shapes pass through as-is.
    url.to_string()
}

/// SideHustleItem
///
/// Categorized side-hustle listing. Category is one of
/// 'pocket' | 'career' | 'life' | 'other'.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct SideHustleItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub summary: String,
    pub pros: String,
    pub cons: String,
    pub link_url: String,
    pub image_url: Option<String>,
}

/// Roadmap
///
/// A step group in the roadmap section. Owns an ordered collection of
/// [`RoadmapPage`]s. Slug derives from the name when blank, unique globally.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Roadmap {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Grouping label shown in the admin list (e.g. 'step', 'extra').
    pub kind: String,
    pub sort_order: i32,
    /// Markdown intro rendered on the roadmap home page.
    pub intro: String,
}

/// RoadmapPage
///
/// A long-form Markdown page inside a roadmap. Slug derives from the title
/// when blank and is unique *per roadmap*. `is_published` gates visibility
/// without deleting the row.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct RoadmapPage {
    pub id: i64,
    pub roadmap_id: i64,
    pub sort_order: i32,
    pub title: String,
    pub slug: String,
    pub cover_image: Option<String>,
    /// Markdown body, converted fresh on every detail render.
    pub body: String,
    pub is_published: bool,
}

/// AiTool
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct AiTool {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub intro: String,
    pub howto: String,
    pub link_url: String,
    pub image_url: Option<String>,
}

/// HeroImage
///
/// A slotted banner image with ordering, an active flag, and an optional
/// time window. Visibility is the conjunction of all three.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct HeroImage {
    pub id: i64,
    /// Placement slot; the home page reads [`HeroImage::SLOT_HOME`].
    pub slot: String,
    pub sort_order: i32,
    pub image_url: String,
    pub alt: String,
    pub is_active: bool,
    #[ts(type = "string | null")]
    pub start_at: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub end_at: Option<DateTime<Utc>>,
}

impl HeroImage {
    pub const SLOT_HOME: &'static str = "home";

    /// Whether the image should appear at `now`: active, and inside the
    /// optional [start_at, end_at] window (open bounds when unset).
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.start_at.is_none_or(|s| s <= now)
            && self.end_at.is_none_or(|e| e >= now)
    }
}

/// News
///
/// A news post. Pinned items sort first; `is_new` is derived from the
/// creation time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub body: String,
    pub is_pinned: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Window within which a news item counts as new.
pub const NEWS_IS_NEW_DAYS: i64 = 7;

impl News {
    /// True when the item was created within the last 7 days.
    pub fn is_new_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at <= Duration::days(NEWS_IS_NEW_DAYS)
    }
}

/// FaqEntry
///
/// A public Q&A entry. Only published entries appear on the question-box
/// page.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct FaqEntry {
    pub id: i64,
    pub question_text: String,
    pub answer: String,
    pub category: String,
    pub is_published: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Question
///
/// A private visitor-submitted question from the question-box form.
/// Status moves through the triage values below; a question may be linked to
/// the FAQ entry that covers it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Question {
    pub id: i64,
    /// Submitter name; blank means anonymous.
    pub name: String,
    pub category: String,
    pub body: String,
    /// One of [`Question::STATUS_NEW`] and friends.
    pub status: String,
    pub faq_entry_id: Option<i64>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub const STATUS_NEW: &'static str = "new";
    pub const STATUS_ANSWERED_PRIVATE: &'static str = "answered_private";
    pub const STATUS_ANSWERED_PUBLIC: &'static str = "answered_public";
    pub const STATUS_NO_ACTION: &'static str = "no_action";
}

// --- Slug derivation ---

/// Resolve the slug to persist: keep a non-blank submitted slug, otherwise
/// derive one from the human-readable fallback (name or title).
pub fn slug_or_derive(slug: &str, fallback: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        slugify(fallback)
    } else {
        trimmed.to_string()
    }
}

// --- Request Payloads (Input Schemas) ---
//
// Admin CRUD follows the full-form submit model: one input struct per entity,
// used for both create and update.

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SiteSettingInput {
    pub hero_title: String,
    pub hero_sub: String,
    pub hero_cta_text: String,
    pub hero_cta_link: String,
    pub calendar_embed_src: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MissionBlockInput {
    pub title: String,
    pub body: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TrainingCategoryInput {
    pub name: String,
    /// Left blank to derive from the name.
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TrainingVideoInput {
    pub title: String,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    pub video_url: String,
    #[serde(default)]
    pub duration: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SideHustleItemInput {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
    #[serde(default)]
    pub link_url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RoadmapInput {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub kind: String,
    pub sort_order: i32,
    #[serde(default)]
    pub intro: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RoadmapPageInput {
    pub roadmap_id: i64,
    pub sort_order: i32,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub body: String,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AiToolInput {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub howto: String,
    pub link_url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct HeroImageInput {
    pub slot: String,
    pub sort_order: i32,
    pub image_url: String,
    #[serde(default)]
    pub alt: String,
    pub is_active: bool,
    #[ts(type = "string | null")]
    pub start_at: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NewsInput {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub body: String,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct FaqEntryInput {
    pub question_text: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: String,
    pub is_published: bool,
}

/// QuestionSubmission
///
/// Public question-box form payload. Name may be blank for anonymous
/// submissions; status is always set server-side.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct QuestionSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub body: String,
}

/// QuestionTriage
///
/// Admin-side status update for a submitted question, optionally linking the
/// FAQ entry that covers it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct QuestionTriage {
    pub status: String,
    pub faq_entry_id: Option<i64>,
}

/// GateSubmission
///
/// Payload for the gate-accept endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct GateSubmission {
    pub password: String,
    /// Keep the gate cookie for 24h instead of clearing it on browser close.
    #[serde(default)]
    pub remember: bool,
}

// --- Response Schemas (Output) ---

/// Generic user-visible message (gate errors, question-box confirmation).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

/// Home page payload: settings singleton plus currently visible hero images.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct HomeResponse {
    pub settings: Option<SiteSetting>,
    pub hero_images: Vec<HeroImage>,
}

/// A training video enriched with its derived embeddable URL.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TrainingVideoResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub video: TrainingVideo,
    pub embed_src: String,
}

impl From<TrainingVideo> for TrainingVideoResponse {
    fn from(video: TrainingVideo) -> Self {
        let embed_src = video.embed_src();
        Self { video, embed_src }
    }
}

/// Training page payload: filtered videos, the category lookup list, and the
/// currently selected category slug (empty when unfiltered).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TrainingListResponse {
    pub videos: Vec<TrainingVideoResponse>,
    pub categories: Vec<TrainingCategory>,
    pub current: String,
}

/// Side-hustle page payload, pre-grouped by category.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SideHustleResponse {
    pub pocket_items: Vec<SideHustleItem>,
    pub career_items: Vec<SideHustleItem>,
    pub life_items: Vec<SideHustleItem>,
    pub other_items: Vec<SideHustleItem>,
}

/// A roadmap with its published pages and the rendered intro.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RoadmapWithPages {
    #[serde(flatten)]
    #[ts(flatten)]
    pub roadmap: Roadmap,
    pub intro_html: String,
    pub intro_toc: String,
    pub pages: Vec<RoadmapPage>,
}

/// Roadmap detail payload: the page itself, sibling navigation, and the
/// rendered Markdown body plus its TOC fragment.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RoadmapPageDetailResponse {
    pub roadmap: Roadmap,
    pub page: RoadmapPage,
    pub pages: Vec<RoadmapPage>,
    pub prev_page: Option<RoadmapPage>,
    pub next_page: Option<RoadmapPage>,
    pub body_html: String,
    pub body_toc: String,
}

/// A news item with the derived freshness flag.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NewsResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub item: News,
    pub is_new: bool,
}

impl NewsResponse {
    pub fn at(item: News, now: DateTime<Utc>) -> Self {
        let is_new = item.is_new_at(now);
        Self { item, is_new }
    }
}

/// Calendar page payload: just the configured embed URL.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CalendarResponse {
    pub calendar_embed_src: String,
}

/// Question-box GET payload: the published FAQ list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct QuestionBoxResponse {
    pub public_faqs: Vec<FaqEntry>,
}
