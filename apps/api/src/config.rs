use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::recommendation::scorer::CategoryWeights;

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// K used when a request does not ask for one.
    pub default_top_k: usize,
    /// Largest K a request may ask for.
    pub max_top_k: usize,
    pub weights: CategoryWeights,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_top_k: 7,
            weights: CategoryWeights::default(),
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_top_k == 0 || self.default_top_k > self.max_top_k {
            bail!(
                "RECOMMENDATION_TOP_K must be between 1 and RECOMMENDATION_MAX_TOP_K ({}), got {}",
                self.max_top_k,
                self.default_top_k
            );
        }
        self.weights.validate().context("CATEGORY_WEIGHTS")?;
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RecommendationConfig::default();
        let recommendation = RecommendationConfig {
            default_top_k: parse_env("RECOMMENDATION_TOP_K", defaults.default_top_k)?,
            max_top_k: parse_env("RECOMMENDATION_MAX_TOP_K", defaults.max_top_k)?,
            weights: match std::env::var("CATEGORY_WEIGHTS") {
                Ok(list) => CategoryWeights::parse_list(&list)
                    .context("CATEGORY_WEIGHTS must be four comma-separated weights")?,
                Err(_) => defaults.weights,
            },
        };
        recommendation.validate()?;

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://university.db?mode=rwc".to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            recommendation,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        Err(_) => Ok(default),
    }
}
