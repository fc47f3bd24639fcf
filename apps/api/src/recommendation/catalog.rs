//! Major catalog store: the persisted, offline-produced major trait profiles.
//!
//! Profiles are written once per major (manually or by the classification
//! step) and only read while ranking. Each category's scores live in their
//! own JSON text column.

use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::major::{CategoryRow, MajorRecord, MajorRow};
use crate::recommendation::schema::{RawTraitProfile, TraitCategory, TraitProfile};

const SELECT_MAJORS: &str = r#"
    SELECT m.id, m.name, c.name AS category,
           m.academic_strengths_scores, m.thinking_style_scores,
           m.learning_style_scores, m.interests_scores,
           m.created_at, m.updated_at
    FROM majors m
    LEFT JOIN major_categories c ON m.category_id = c.id
"#;

impl From<MajorRow> for MajorRecord {
    fn from(row: MajorRow) -> Self {
        let label = format!("major '{}'", row.name);
        let columns = [
            (TraitCategory::AcademicStrengths, &row.academic_strengths_scores),
            (TraitCategory::ThinkingStyle, &row.thinking_style_scores),
            (TraitCategory::LearningStyle, &row.learning_style_scores),
            (TraitCategory::Interests, &row.interests_scores),
        ];

        let mut raw = RawTraitProfile::new();
        for (category, column) in columns {
            let Some(text) = column.as_deref() else {
                continue;
            };
            match serde_json::from_str::<BTreeMap<String, f64>>(text) {
                Ok(scores) => {
                    raw.insert(category.as_str().to_string(), scores);
                }
                Err(e) => warn!("{label}: malformed {category} scores, treating as empty: {e}"),
            }
        }

        let profile = TraitProfile::from_raw_lenient(&raw, &label);
        if profile.is_unscored() {
            warn!("{label} has no trait scores and will score 0 for every student");
        }

        MajorRecord {
            profile,
            id: row.id,
            name: row.name,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Loads every major in insertion order. That order is the ranking tie-break.
pub async fn fetch_catalog(pool: &SqlitePool) -> Result<Vec<MajorRecord>, AppError> {
    let rows: Vec<MajorRow> = sqlx::query_as(&format!("{SELECT_MAJORS} ORDER BY m.id"))
        .fetch_all(pool)
        .await?;

    info!("Loaded {} majors from catalog", rows.len());
    Ok(rows.into_iter().map(MajorRecord::from).collect())
}

pub async fn get_major(pool: &SqlitePool, id: i64) -> Result<MajorRecord, AppError> {
    let row: Option<MajorRow> = sqlx::query_as(&format!("{SELECT_MAJORS} WHERE m.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(MajorRecord::from)
        .ok_or_else(|| AppError::NotFound(format!("Major {id} not found")))
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryRow>, AppError> {
    let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM major_categories ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Inserts a major or replaces the profile of an existing one with the same name.
/// An unknown category name is created on the fly. The major keeps its id (and
/// therefore its catalog position) across updates.
pub async fn upsert_major(
    pool: &SqlitePool,
    name: &str,
    category: &str,
    profile: &TraitProfile,
) -> Result<MajorRecord, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO major_categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(category)
        .execute(&mut *tx)
        .await?;
    let category_id: i64 = sqlx::query_scalar("SELECT id FROM major_categories WHERE name = ?")
        .bind(category)
        .fetch_one(&mut *tx)
        .await?;

    let raw = profile.to_raw();
    let empty = BTreeMap::new();
    let column = |c: TraitCategory| -> Result<String, AppError> {
        serde_json::to_string(raw.get(c.as_str()).unwrap_or(&empty))
            .map_err(|e| AppError::Internal(e.into()))
    };

    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO majors
            (name, category_id, academic_strengths_scores, thinking_style_scores,
             learning_style_scores, interests_scores, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            category_id = excluded.category_id,
            academic_strengths_scores = excluded.academic_strengths_scores,
            thinking_style_scores = excluded.thinking_style_scores,
            learning_style_scores = excluded.learning_style_scores,
            interests_scores = excluded.interests_scores,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(name)
    .bind(category_id)
    .bind(column(TraitCategory::AcademicStrengths)?)
    .bind(column(TraitCategory::ThinkingStyle)?)
    .bind(column(TraitCategory::LearningStyle)?)
    .bind(column(TraitCategory::Interests)?)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let row: MajorRow = sqlx::query_as(&format!("{SELECT_MAJORS} WHERE m.name = ?"))
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Stored trait profile for major '{name}' (category '{category}')");
    Ok(row.into())
}
