//! Axum route handlers for the assessment and major catalog API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::RecommendationConfig;
use crate::errors::{AppError, AppJson};
use crate::models::major::{CategoryRow, MajorRecord};
use crate::recommendation::catalog::{fetch_catalog, get_major, list_categories, upsert_major};
use crate::recommendation::extraction::Transcript;
use crate::recommendation::profiling::profile_major;
use crate::recommendation::questions::{generate_questions, AssessmentQuestions};
use crate::recommendation::ranker::{rank_majors, MajorMatch};
use crate::recommendation::schema::{RawTraitProfile, TraitProfile};
use crate::recommendation::scorer::ScoreBreakdown;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub user_data: Transcript,
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub traits: RawTraitProfile,
    pub top_k: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionRequest {
    /// Descriptions of the six assessment areas, in output order.
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub major_id: i64,
    pub major_name: String,
    pub category: Option<String>,
    pub match_score: f64,
    pub match_percentage: u32,
    pub breakdown: ScoreBreakdown,
}

impl From<MajorMatch> for Recommendation {
    fn from(m: MajorMatch) -> Self {
        Self {
            match_percentage: (m.score * 100.0).round() as u32,
            major_id: m.major_id,
            major_name: m.major_name,
            category: m.category,
            match_score: m.score,
            breakdown: m.breakdown,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub assessment_id: Uuid,
    pub traits: TraitProfile,
    pub recommendations: Vec<Recommendation>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateMajorRequest {
    pub name: String,
    pub category: String,
    /// Omit to have the model classify the major.
    pub scores: Option<RawTraitProfile>,
}

#[derive(Debug, Serialize)]
pub struct MajorListResponse {
    pub majors: Vec<MajorRecord>,
    pub total_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessment/evaluate
///
/// Transcript → trait vector (LLM) → ranked majors.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    AppJson(request): AppJson<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let top_k = resolve_top_k(request.top_k, &state.config.recommendation)?;
    request.user_data.validate()?;

    let assessment_id = Uuid::new_v4();
    info!(%assessment_id, "Evaluating assessment with {} answers", request.user_data.0.len());

    let traits = state.trait_extractor.extract(&request.user_data).await?;
    let recommendations = recommend(&state, &traits, top_k).await?;

    info!(
        %assessment_id,
        "Recommended {} majors (top: {})",
        recommendations.len(),
        recommendations
            .first()
            .map(|r| r.major_name.as_str())
            .unwrap_or("none")
    );

    Ok(Json(EvaluateResponse {
        assessment_id,
        traits,
        total_count: recommendations.len(),
        recommendations,
    }))
}

/// POST /api/v1/assessment/score
///
/// Ranks majors for an already-extracted trait vector. No model call.
pub async fn handle_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let top_k = resolve_top_k(request.top_k, &state.config.recommendation)?;
    let traits = TraitProfile::from_raw_strict(&request.traits)?;

    let recommendations = recommend(&state, &traits, top_k).await?;

    Ok(Json(ScoreResponse {
        total_count: recommendations.len(),
        recommendations,
    }))
}

/// POST /api/v1/assessment/questions
///
/// The body is optional; without one the default areas are used.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AssessmentQuestions>, AppError> {
    let request = parse_question_request(&body)?;
    Ok(Json(generate_questions(&state.llm, &request.categories).await?))
}

/// GET /api/v1/majors
pub async fn handle_list_majors(
    State(state): State<AppState>,
) -> Result<Json<MajorListResponse>, AppError> {
    let majors = fetch_catalog(&state.db).await?;
    Ok(Json(MajorListResponse {
        total_count: majors.len(),
        majors,
    }))
}

/// GET /api/v1/majors/:id
pub async fn handle_get_major(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MajorRecord>, AppError> {
    Ok(Json(get_major(&state.db, id).await?))
}

/// POST /api/v1/majors
///
/// Stores a major profile. Supplied scores are validated strictly; without
/// scores the major is classified by the model first.
pub async fn handle_upsert_major(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateMajorRequest>,
) -> Result<Json<MajorRecord>, AppError> {
    let name = request.name.trim();
    let category = request.category.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if category.is_empty() {
        return Err(AppError::Validation("category cannot be empty".to_string()));
    }

    let profile = match &request.scores {
        Some(raw) => TraitProfile::from_raw_strict(raw)?,
        None => profile_major(&state.llm, name).await?,
    };

    Ok(Json(upsert_major(&state.db, name, category, &profile).await?))
}

/// GET /api/v1/categories
pub async fn handle_list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryRow>>, AppError> {
    Ok(Json(list_categories(&state.db).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn recommend(
    state: &AppState,
    traits: &TraitProfile,
    top_k: usize,
) -> Result<Vec<Recommendation>, AppError> {
    let catalog = fetch_catalog(&state.db).await?;
    let ranked = rank_majors(traits, &catalog, &state.config.recommendation.weights, top_k);
    Ok(ranked.into_iter().map(Recommendation::from).collect())
}

fn parse_question_request(body: &[u8]) -> Result<QuestionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QuestionRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid question request: {e}")))
}

fn resolve_top_k(requested: Option<usize>, config: &RecommendationConfig) -> Result<usize, AppError> {
    match requested {
        None => Ok(config.default_top_k),
        Some(k) if (1..=config.max_top_k).contains(&k) => Ok(k),
        Some(k) => Err(AppError::Validation(format!(
            "top_k must be between 1 and {}, got {k}",
            config.max_top_k
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_top_k_defaults_and_bounds() {
        let config = RecommendationConfig::default();
        assert_eq!(resolve_top_k(None, &config).unwrap(), 5);
        assert_eq!(resolve_top_k(Some(1), &config).unwrap(), 1);
        assert_eq!(resolve_top_k(Some(7), &config).unwrap(), 7);
        assert!(resolve_top_k(Some(0), &config).is_err());
        assert!(resolve_top_k(Some(8), &config).is_err());
    }

    #[test]
    fn test_question_request_body_is_optional() {
        assert!(parse_question_request(b"").unwrap().categories.is_empty());
        assert!(parse_question_request(b" \n").unwrap().categories.is_empty());
        assert!(parse_question_request(b"{}").unwrap().categories.is_empty());

        let request =
            parse_question_request(br#"{"categories": ["Personality", "Hobbies"]}"#).unwrap();
        assert_eq!(request.categories, ["Personality", "Hobbies"]);

        let err = parse_question_request(b"{\"categories\": 3}").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_match_percentage_rounds_score() {
        let m = MajorMatch {
            major_id: 1,
            major_name: "Computer Science".to_string(),
            category: None,
            score: 0.29,
            breakdown: ScoreBreakdown {
                academic_strengths: 0.0,
                thinking_style: 0.0,
                learning_style: 0.0,
                interests: 0.0,
                overall: 0.29,
            },
        };
        // 0.29 × 100 is 28.999… in binary floating point.
        assert_eq!(Recommendation::from(m).match_percentage, 29);
    }
}
