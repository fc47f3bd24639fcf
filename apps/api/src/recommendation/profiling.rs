//! Offline major profiling: classifies a major into the trait template once,
//! so ranking never waits on the model.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, SCORING_RULES, SCORING_TEMPERATURE};
use crate::llm_client::LlmClient;
use crate::recommendation::extraction::render_template;
use crate::recommendation::prompts::MAJOR_CLASSIFICATION_PROMPT;
use crate::recommendation::schema::{RawTraitProfile, TraitProfile};

pub async fn profile_major(llm: &LlmClient, major_name: &str) -> Result<TraitProfile, AppError> {
    let prompt = build_classification_prompt(major_name)?;

    let raw: RawTraitProfile = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM, SCORING_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Major classification failed: {e}")))?;

    let profile = TraitProfile::from_raw_strict(&raw).map_err(|e| {
        AppError::Llm(format!("Classification of '{major_name}' rejected: {e}"))
    })?;

    info!("Classified major '{major_name}'");
    Ok(profile)
}

fn build_classification_prompt(major_name: &str) -> Result<String, AppError> {
    Ok(MAJOR_CLASSIFICATION_PROMPT
        .replace("{major}", major_name.trim())
        .replace("{template}", &render_template()?)
        .replace("{rules}", SCORING_RULES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_major_and_template() {
        let prompt = build_classification_prompt("  Mechanical Engineering ").unwrap();
        assert!(prompt.contains("MAJOR:\nMechanical Engineering\n"));
        assert!(prompt.contains("\"systems_thinking\": 0.0"));
        assert!(!prompt.contains("{template}"));
        assert!(!prompt.contains("{rules}"));
    }
}
