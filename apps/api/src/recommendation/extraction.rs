//! Trait extraction: turns a question/answer transcript into a `TraitProfile`.
//!
//! Pluggable via the `TraitExtractor` trait. `AppState` carries an
//! `Arc<dyn TraitExtractor>`; production wires in `LlmTraitExtractor`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, SCORING_RULES, SCORING_TEMPERATURE};
use crate::llm_client::LlmClient;
use crate::recommendation::prompts::TRAIT_EXTRACTION_PROMPT;
use crate::recommendation::schema::{RawTraitProfile, TraitProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// An assessment session in the order it was answered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(pub Vec<QaPair>);

impl Transcript {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.0.is_empty() {
            return Err(AppError::Validation(
                "user_data must contain at least one question/answer pair".to_string(),
            ));
        }
        if self.0.iter().all(|qa| qa.answer.trim().is_empty()) {
            return Err(AppError::Validation(
                "user_data contains no answers".to_string(),
            ));
        }
        Ok(())
    }

    /// `Q: …` / `A: …` blocks, one pair per block.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|qa| format!("Q: {}\nA: {}", qa.question.trim(), qa.answer.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
pub trait TraitExtractor: Send + Sync {
    async fn extract(&self, transcript: &Transcript) -> Result<TraitProfile, AppError>;
}

/// Scores a transcript by asking the model to fill in the trait template.
pub struct LlmTraitExtractor(pub LlmClient);

#[async_trait]
impl TraitExtractor for LlmTraitExtractor {
    async fn extract(&self, transcript: &Transcript) -> Result<TraitProfile, AppError> {
        let prompt = TRAIT_EXTRACTION_PROMPT
            .replace("{transcript}", &transcript.render())
            .replace("{template}", &render_template()?)
            .replace("{rules}", SCORING_RULES);

        let raw: RawTraitProfile = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, SCORING_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(format!("Trait extraction failed: {e}")))?;

        // The model is told to return every key; anything less is its failure, not the caller's.
        let profile = TraitProfile::from_raw_strict(&raw)
            .map_err(|e| AppError::Llm(format!("Extracted trait vector rejected: {e}")))?;

        debug!(
            "Extracted trait vector with {} scored dimensions",
            profile.scored_dimensions()
        );
        Ok(profile)
    }
}

pub(crate) fn render_template() -> Result<String, AppError> {
    serde_json::to_string_pretty(&TraitProfile::template())
        .map_err(|e| AppError::Internal(e.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Returns a fixed profile regardless of the transcript.
    pub struct StaticTraitExtractor(pub TraitProfile);

    #[async_trait]
    impl TraitExtractor for StaticTraitExtractor {
        async fn extract(&self, transcript: &Transcript) -> Result<TraitProfile, AppError> {
            transcript.validate()?;
            Ok(self.0.clone())
        }
    }

    fn pair(question: &str, answer: &str) -> QaPair {
        QaPair {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_render_joins_pairs_in_order() {
        let transcript = Transcript(vec![
            pair("How do you learn best?", " Hands-on labs "),
            pair("What interests you?", "Robotics"),
        ]);
        assert_eq!(
            transcript.render(),
            "Q: How do you learn best?\nA: Hands-on labs\nQ: What interests you?\nA: Robotics"
        );
    }

    #[test]
    fn test_empty_transcript_is_rejected() {
        let err = Transcript::default().validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_blank_answers_are_rejected() {
        let transcript = Transcript(vec![pair("Q1", "  "), pair("Q2", "")]);
        assert!(transcript.validate().is_err());
    }

    #[test]
    fn test_transcript_deserializes_from_list() {
        let transcript: Transcript =
            serde_json::from_str(r#"[{"question": "Q", "answer": "A"}]"#).unwrap();
        assert_eq!(transcript.0.len(), 1);
        assert!(transcript.validate().is_ok());
    }

    #[test]
    fn test_prompt_template_names_every_category() {
        let template = render_template().unwrap();
        for key in ["academic_strengths", "thinking_style", "learning_style", "interests"] {
            assert!(template.contains(key), "{key}");
        }
        assert!(template.contains("hands_on_practical"));
    }

    #[tokio::test]
    async fn test_static_extractor_returns_its_profile() {
        let extractor = StaticTraitExtractor(TraitProfile::default());
        let profile = extractor
            .extract(&Transcript(vec![pair("Q", "A")]))
            .await
            .unwrap();
        assert_eq!(profile, TraitProfile::default());
    }
}
