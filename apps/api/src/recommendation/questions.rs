//! Assessment question generation: one fresh question per assessment area.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, QUESTION_TEMPERATURE};
use crate::llm_client::LlmClient;
use crate::recommendation::prompts::QUESTION_GENERATION_PROMPT;

/// The six areas, in output order. Used when the caller does not describe them.
pub const DEFAULT_QUESTION_AREAS: [&str; 6] = [
    "Personality",
    "Academic_Strengths",
    "Thinking_Style",
    "Learning_Style",
    "Interests",
    "Career_Tendencies",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentQuestions {
    pub personality: String,
    pub academic_strengths: String,
    pub thinking_style: String,
    pub learning_style: String,
    pub interests: String,
    pub career_tendencies: String,
}

impl AssessmentQuestions {
    /// Names of the areas whose question came back blank.
    pub fn blank_areas(&self) -> Vec<&'static str> {
        [
            ("personality", &self.personality),
            ("academic_strengths", &self.academic_strengths),
            ("thinking_style", &self.thinking_style),
            ("learning_style", &self.learning_style),
            ("interests", &self.interests),
            ("career_tendencies", &self.career_tendencies),
        ]
        .into_iter()
        .filter(|(_, q)| q.trim().is_empty())
        .map(|(area, _)| area)
        .collect()
    }
}

/// Asks the model for one question per area.
///
/// `categories` describes the six areas to the model, in output order. An
/// empty slice uses `DEFAULT_QUESTION_AREAS`.
pub async fn generate_questions(
    llm: &LlmClient,
    categories: &[String],
) -> Result<AssessmentQuestions, AppError> {
    let prompt = build_question_prompt(categories)?;

    let questions: AssessmentQuestions = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM, QUESTION_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    let blank = questions.blank_areas();
    if !blank.is_empty() {
        return Err(AppError::Llm(format!(
            "Question generation left areas blank: {}",
            blank.join(", ")
        )));
    }

    info!("Generated assessment questions");
    Ok(questions)
}

pub(crate) fn build_question_prompt(categories: &[String]) -> Result<String, AppError> {
    let areas: Vec<&str> = if categories.is_empty() {
        DEFAULT_QUESTION_AREAS.to_vec()
    } else {
        categories.iter().map(|c| c.trim()).collect()
    };

    if areas.len() != DEFAULT_QUESTION_AREAS.len() {
        return Err(AppError::Validation(format!(
            "categories must describe exactly {} areas, got {}",
            DEFAULT_QUESTION_AREAS.len(),
            areas.len()
        )));
    }
    if let Some(position) = areas.iter().position(|a| a.is_empty()) {
        return Err(AppError::Validation(format!(
            "category {} is blank",
            position + 1
        )));
    }

    let listing = areas
        .iter()
        .enumerate()
        .map(|(i, area)| format!("{}) {area}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(QUESTION_GENERATION_PROMPT.replace("{areas}", &listing))
}
