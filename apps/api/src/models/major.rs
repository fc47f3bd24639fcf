use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::recommendation::schema::TraitProfile;

/// A row of `majors` joined with its category name. Score columns hold JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct MajorRow {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub academic_strengths_scores: Option<String>,
    pub thinking_style_scores: Option<String>,
    pub learning_style_scores: Option<String>,
    pub interests_scores: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog entry with its parsed trait profile.
#[derive(Debug, Clone, Serialize)]
pub struct MajorRecord {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub profile: TraitProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}
