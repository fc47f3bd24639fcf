//! Major scorer: combines the four per-category similarities into one match score.
//!
//! overall = Σ(weight_c × similarity_c) / Σ(weight_c), rounded to 2 decimals.
//!
//! The default weights (0.30 / 0.25 / 0.20 / 0.15) total 0.90, so the division
//! by the weight total is what makes the effective weights sum to 1.0 and a
//! perfect match score exactly its shared value.

use serde::{Deserialize, Serialize};

use crate::recommendation::schema::{TraitCategory, TraitError, TraitProfile};
use crate::recommendation::similarity::trait_similarity;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub academic_strengths: f64,
    pub thinking_style: f64,
    pub learning_style: f64,
    pub interests: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            academic_strengths: 0.30,
            thinking_style: 0.25,
            learning_style: 0.20,
            interests: 0.15,
        }
    }
}

impl CategoryWeights {
    pub fn new(
        academic_strengths: f64,
        thinking_style: f64,
        learning_style: f64,
        interests: f64,
    ) -> Result<Self, TraitError> {
        let weights = Self {
            academic_strengths,
            thinking_style,
            learning_style,
            interests,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Parses four comma-separated weights in category order, e.g. `"0.30,0.25,0.20,0.15"`.
    pub fn parse_list(input: &str) -> Result<Self, TraitError> {
        let values = input
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| TraitError::InvalidWeights(format!("'{}' is not a number", part.trim())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [a, t, l, i] => Self::new(*a, *t, *l, *i),
            _ => Err(TraitError::InvalidWeights(format!(
                "expected 4 weights, got {}",
                values.len()
            ))),
        }
    }

    pub fn weight(&self, category: TraitCategory) -> f64 {
        match category {
            TraitCategory::AcademicStrengths => self.academic_strengths,
            TraitCategory::ThinkingStyle => self.thinking_style,
            TraitCategory::LearningStyle => self.learning_style,
            TraitCategory::Interests => self.interests,
        }
    }

    pub fn total(&self) -> f64 {
        TraitCategory::ALL.iter().map(|c| self.weight(*c)).sum()
    }

    pub fn validate(&self) -> Result<(), TraitError> {
        for category in TraitCategory::ALL {
            let w = self.weight(category);
            if !w.is_finite() || w < 0.0 {
                return Err(TraitError::InvalidWeights(format!(
                    "weight for '{category}' must be a finite non-negative number, got {w}"
                )));
            }
        }
        let total = self.total();
        if !total.is_finite() {
            return Err(TraitError::InvalidWeights(format!(
                "weights must have a finite total, got {total}"
            )));
        }
        if total <= 0.0 {
            return Err(TraitError::InvalidWeights(
                "weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-category similarities plus the combined score, reported alongside each match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub academic_strengths: f64,
    pub thinking_style: f64,
    pub learning_style: f64,
    pub interests: f64,
    pub overall: f64,
}

/// Scores one major against `user`. `overall` is in [0, 1], rounded to 2 decimals.
pub fn score_major(
    user: &TraitProfile,
    major: &TraitProfile,
    weights: &CategoryWeights,
) -> ScoreBreakdown {
    let similarity =
        |category: TraitCategory| trait_similarity(user.category(category), major.category(category));

    let academic_strengths = similarity(TraitCategory::AcademicStrengths);
    let thinking_style = similarity(TraitCategory::ThinkingStyle);
    let learning_style = similarity(TraitCategory::LearningStyle);
    let interests = similarity(TraitCategory::Interests);

    let total = weights.total();
    let overall = if total > 0.0 {
        (weights.academic_strengths * academic_strengths
            + weights.thinking_style * thinking_style
            + weights.learning_style * learning_style
            + weights.interests * interests)
            / total
    } else {
        0.0
    };

    ScoreBreakdown {
        academic_strengths: round2(academic_strengths),
        thinking_style: round2(thinking_style),
        learning_style: round2(learning_style),
        interests: round2(interests),
        overall: round2(overall.clamp(0.0, 1.0)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::schema::{Dimension, TraitScores};

    fn uniform_profile(value: f64) -> TraitProfile {
        let mut profile = TraitProfile::default();
        for category in TraitCategory::ALL {
            *profile.category_mut(category) =
                category.dimensions().iter().map(|d| (*d, value)).collect();
        }
        profile
    }

    #[test]
    fn test_default_weights_match_category_order() {
        let w = CategoryWeights::default();
        assert_eq!(w.weight(TraitCategory::AcademicStrengths), 0.30);
        assert_eq!(w.weight(TraitCategory::ThinkingStyle), 0.25);
        assert_eq!(w.weight(TraitCategory::LearningStyle), 0.20);
        assert_eq!(w.weight(TraitCategory::Interests), 0.15);
    }

    #[test]
    fn test_effective_weights_sum_to_one() {
        let w = CategoryWeights::default();
        let effective: f64 = TraitCategory::ALL
            .iter()
            .map(|c| w.weight(*c) / w.total())
            .sum();
        assert!((effective - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_match_scores_shared_value() {
        let w = CategoryWeights::default();
        for shared in [0.2, 0.5, 0.8, 1.0] {
            let profile = uniform_profile(shared);
            let score = score_major(&profile, &profile, &w).overall;
            assert!((score - shared).abs() < 1e-9, "shared={shared} score={score}");
        }
    }

    #[test]
    fn test_all_zero_user_scores_zero() {
        let w = CategoryWeights::default();
        let score = score_major(&uniform_profile(0.0), &uniform_profile(1.0), &w).overall;
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_only_academic_category_contributes_its_weight_share() {
        let user = TraitProfile {
            academic_strengths: TraitScores::new().with(Dimension::Mathematics, 0.9),
            ..TraitProfile::default()
        };
        let major = TraitProfile {
            academic_strengths: TraitScores::new().with(Dimension::Mathematics, 1.0),
            ..TraitProfile::default()
        };
        let breakdown = score_major(&user, &major, &CategoryWeights::default());
        assert_eq!(breakdown.academic_strengths, 1.0);
        assert_eq!(breakdown.thinking_style, 0.0);
        // 0.30 × 1.0 / 0.90
        assert_eq!(breakdown.overall, 0.33);
    }

    #[test]
    fn test_output_rounded_to_two_decimals() {
        let user = TraitProfile {
            thinking_style: TraitScores::new()
                .with(Dimension::LogicalReasoning, 0.7)
                .with(Dimension::CreativeThinking, 0.3),
            ..TraitProfile::default()
        };
        let major = TraitProfile {
            thinking_style: TraitScores::new().with(Dimension::LogicalReasoning, 0.33),
            ..TraitProfile::default()
        };
        let score = score_major(&user, &major, &CategoryWeights::default()).overall;
        assert_eq!(score, (score * 100.0).round() / 100.0);
    }

    #[test]
    fn test_custom_weights_shift_ranking() {
        let user = TraitProfile {
            academic_strengths: TraitScores::new().with(Dimension::Mathematics, 1.0),
            interests: TraitScores::new().with(Dimension::ArtsCulture, 1.0),
            ..TraitProfile::default()
        };
        let math_major = TraitProfile {
            academic_strengths: TraitScores::new().with(Dimension::Mathematics, 1.0),
            ..TraitProfile::default()
        };
        let arts_major = TraitProfile {
            interests: TraitScores::new().with(Dimension::ArtsCulture, 1.0),
            ..TraitProfile::default()
        };

        let defaults = CategoryWeights::default();
        assert!(
            score_major(&user, &math_major, &defaults).overall
                > score_major(&user, &arts_major, &defaults).overall
        );

        let interest_heavy = CategoryWeights::new(0.1, 0.0, 0.0, 0.9).unwrap();
        assert!(
            score_major(&user, &arts_major, &interest_heavy).overall
                > score_major(&user, &math_major, &interest_heavy).overall
        );
    }

    #[test]
    fn test_parse_list_accepts_four_weights() {
        let w = CategoryWeights::parse_list("0.4, 0.3,0.2 ,0.1").unwrap();
        assert_eq!(w, CategoryWeights::new(0.4, 0.3, 0.2, 0.1).unwrap());
    }

    #[test]
    fn test_parse_list_rejects_wrong_arity_and_garbage() {
        assert!(CategoryWeights::parse_list("0.5,0.5").is_err());
        assert!(CategoryWeights::parse_list("0.3,0.25,abc,0.15").is_err());
    }

    #[test]
    fn test_validate_rejects_negative_and_all_zero() {
        assert!(CategoryWeights::new(-0.1, 0.5, 0.3, 0.3).is_err());
        assert!(CategoryWeights::new(0.0, 0.0, 0.0, 0.0).is_err());
        assert!(CategoryWeights::new(f64::INFINITY, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_validate_rejects_weights_whose_total_overflows() {
        let err = CategoryWeights::new(1e308, 1e308, 1e308, 1e308).unwrap_err();
        assert!(err.to_string().contains("finite total"));
        assert!(CategoryWeights::parse_list("1e308,1e308,0,0").is_err());
    }

    #[test]
    fn test_large_finite_weights_still_normalize() {
        let w = CategoryWeights::new(1e300, 1e300, 1e300, 1e300).unwrap();
        let profile = uniform_profile(0.7);
        assert_eq!(score_major(&profile, &profile, &w).overall, 0.7);
    }
}
