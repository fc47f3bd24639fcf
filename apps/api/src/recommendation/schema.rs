//! Trait schema: the closed set of categories and dimensions that every
//! trait vector (student or major) is expressed in.
//!
//! The wire and storage form is an untyped `category -> dimension -> score`
//! map (`RawTraitProfile`). It is converted into a typed `TraitProfile` either
//! strictly (request and model output: reject anything incomplete or unknown)
//! or leniently (stored major profiles: default and log).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Untyped `category -> dimension -> score` mapping as it appears in JSON.
pub type RawTraitProfile = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraitError {
    #[error("incomplete trait vector: missing category '{0}'")]
    IncompleteTraitVector(TraitCategory),

    #[error("unknown trait category '{0}'")]
    UnknownCategory(String),

    #[error("unknown dimension '{dimension}' in category '{category}'")]
    UnknownDimension {
        category: TraitCategory,
        dimension: String,
    },

    #[error("dimension '{dimension}' belongs to '{expected}', found under '{found}'")]
    MisplacedDimension {
        dimension: Dimension,
        expected: TraitCategory,
        found: TraitCategory,
    },

    #[error("score for '{0}' is not a finite number")]
    InvalidScore(Dimension),

    #[error("invalid category weights: {0}")]
    InvalidWeights(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    AcademicStrengths,
    ThinkingStyle,
    LearningStyle,
    Interests,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 4] = [
        TraitCategory::AcademicStrengths,
        TraitCategory::ThinkingStyle,
        TraitCategory::LearningStyle,
        TraitCategory::Interests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TraitCategory::AcademicStrengths => "academic_strengths",
            TraitCategory::ThinkingStyle => "thinking_style",
            TraitCategory::LearningStyle => "learning_style",
            TraitCategory::Interests => "interests",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn dimensions(self) -> &'static [Dimension] {
        match self {
            TraitCategory::AcademicStrengths => &Dimension::ACADEMIC_STRENGTHS,
            TraitCategory::ThinkingStyle => &Dimension::THINKING_STYLE,
            TraitCategory::LearningStyle => &Dimension::LEARNING_STYLE,
            TraitCategory::Interests => &Dimension::INTERESTS,
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dimensions
// ────────────────────────────────────────────────────────────────────────────

/// A scored sub-dimension. Every variant belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    // academic_strengths
    Mathematics,
    PhysicalSciences,
    LifeSciences,
    ComputerScience,
    BusinessEconomics,
    SocialSciences,
    LanguageLiterature,
    LawPublicPolicy,
    EducationPedagogy,
    DesignCreativeStudies,
    HealthMedicalSciences,
    AgricultureEnvironment,
    // thinking_style
    LogicalReasoning,
    AnalyticalThinking,
    CriticalThinking,
    SystemsThinking,
    CreativeThinking,
    StrategicThinking,
    EthicalJudgment,
    HumanCenteredThinking,
    // learning_style
    VisualLearning,
    AuditoryLearning,
    ReadingWriting,
    HandsOnPractical,
    ResearchOriented,
    CollaborativeLearning,
    IndependentLearning,
    // interests
    TechnologyInnovation,
    ScientificDiscovery,
    BusinessEnterprise,
    PublicServiceSociety,
    HealthWellbeing,
    LawGovernance,
    ArtsCulture,
    MediaCommunication,
    EnvironmentSustainability,
    TravelHospitality,
    EducationTraining,
}

impl Dimension {
    pub const ACADEMIC_STRENGTHS: [Dimension; 12] = [
        Dimension::Mathematics,
        Dimension::PhysicalSciences,
        Dimension::LifeSciences,
        Dimension::ComputerScience,
        Dimension::BusinessEconomics,
        Dimension::SocialSciences,
        Dimension::LanguageLiterature,
        Dimension::LawPublicPolicy,
        Dimension::EducationPedagogy,
        Dimension::DesignCreativeStudies,
        Dimension::HealthMedicalSciences,
        Dimension::AgricultureEnvironment,
    ];

    pub const THINKING_STYLE: [Dimension; 8] = [
        Dimension::LogicalReasoning,
        Dimension::AnalyticalThinking,
        Dimension::CriticalThinking,
        Dimension::SystemsThinking,
        Dimension::CreativeThinking,
        Dimension::StrategicThinking,
        Dimension::EthicalJudgment,
        Dimension::HumanCenteredThinking,
    ];

    pub const LEARNING_STYLE: [Dimension; 7] = [
        Dimension::VisualLearning,
        Dimension::AuditoryLearning,
        Dimension::ReadingWriting,
        Dimension::HandsOnPractical,
        Dimension::ResearchOriented,
        Dimension::CollaborativeLearning,
        Dimension::IndependentLearning,
    ];

    pub const INTERESTS: [Dimension; 11] = [
        Dimension::TechnologyInnovation,
        Dimension::ScientificDiscovery,
        Dimension::BusinessEnterprise,
        Dimension::PublicServiceSociety,
        Dimension::HealthWellbeing,
        Dimension::LawGovernance,
        Dimension::ArtsCulture,
        Dimension::MediaCommunication,
        Dimension::EnvironmentSustainability,
        Dimension::TravelHospitality,
        Dimension::EducationTraining,
    ];

    pub fn category(self) -> TraitCategory {
        use Dimension::*;
        match self {
            Mathematics | PhysicalSciences | LifeSciences | ComputerScience
            | BusinessEconomics | SocialSciences | LanguageLiterature | LawPublicPolicy
            | EducationPedagogy | DesignCreativeStudies | HealthMedicalSciences
            | AgricultureEnvironment => TraitCategory::AcademicStrengths,
            LogicalReasoning | AnalyticalThinking | CriticalThinking | SystemsThinking
            | CreativeThinking | StrategicThinking | EthicalJudgment
            | HumanCenteredThinking => TraitCategory::ThinkingStyle,
            VisualLearning | AuditoryLearning | ReadingWriting | HandsOnPractical
            | ResearchOriented | CollaborativeLearning | IndependentLearning => {
                TraitCategory::LearningStyle
            }
            TechnologyInnovation | ScientificDiscovery | BusinessEnterprise
            | PublicServiceSociety | HealthWellbeing | LawGovernance | ArtsCulture
            | MediaCommunication | EnvironmentSustainability | TravelHospitality
            | EducationTraining => TraitCategory::Interests,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Dimension::*;
        match self {
            Mathematics => "mathematics",
            PhysicalSciences => "physical_sciences",
            LifeSciences => "life_sciences",
            ComputerScience => "computer_science",
            BusinessEconomics => "business_economics",
            SocialSciences => "social_sciences",
            LanguageLiterature => "language_literature",
            LawPublicPolicy => "law_public_policy",
            EducationPedagogy => "education_pedagogy",
            DesignCreativeStudies => "design_creative_studies",
            HealthMedicalSciences => "health_medical_sciences",
            AgricultureEnvironment => "agriculture_environment",
            LogicalReasoning => "logical_reasoning",
            AnalyticalThinking => "analytical_thinking",
            CriticalThinking => "critical_thinking",
            SystemsThinking => "systems_thinking",
            CreativeThinking => "creative_thinking",
            StrategicThinking => "strategic_thinking",
            EthicalJudgment => "ethical_judgment",
            HumanCenteredThinking => "human_centered_thinking",
            VisualLearning => "visual_learning",
            AuditoryLearning => "auditory_learning",
            ReadingWriting => "reading_writing",
            HandsOnPractical => "hands_on_practical",
            ResearchOriented => "research_oriented",
            CollaborativeLearning => "collaborative_learning",
            IndependentLearning => "independent_learning",
            TechnologyInnovation => "technology_innovation",
            ScientificDiscovery => "scientific_discovery",
            BusinessEnterprise => "business_enterprise",
            PublicServiceSociety => "public_service_society",
            HealthWellbeing => "health_wellbeing",
            LawGovernance => "law_governance",
            ArtsCulture => "arts_culture",
            MediaCommunication => "media_communication",
            EnvironmentSustainability => "environment_sustainability",
            TravelHospitality => "travel_hospitality",
            EducationTraining => "education_training",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TraitCategory::ALL
            .iter()
            .flat_map(|c| c.dimensions())
            .copied()
            .find(|d| d.as_str() == name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strictness {
    Strict,
    Lenient,
}

/// Scores for the dimensions of a single category. Absent dimensions read as 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraitScores(BTreeMap<Dimension, f64>);

impl TraitScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Stores a score, clamped into [0, 1].
    pub fn set(&mut self, dimension: Dimension, value: f64) {
        self.0.insert(dimension, value.clamp(0.0, 1.0));
    }

    #[cfg(test)]
    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        self.set(dimension, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_raw(
        category: TraitCategory,
        raw: &BTreeMap<String, f64>,
        strictness: Strictness,
        label: &str,
    ) -> Result<Self, TraitError> {
        let mut scores = TraitScores::new();

        for (name, &value) in raw {
            let parsed = Dimension::from_name(name)
                .ok_or_else(|| TraitError::UnknownDimension {
                    category,
                    dimension: name.clone(),
                })
                .and_then(|dimension| {
                    if dimension.category() == category {
                        Ok(dimension)
                    } else {
                        Err(TraitError::MisplacedDimension {
                            dimension,
                            expected: dimension.category(),
                            found: category,
                        })
                    }
                })
                .and_then(|dimension| {
                    if value.is_finite() {
                        Ok(dimension)
                    } else {
                        Err(TraitError::InvalidScore(dimension))
                    }
                });

            match parsed {
                Ok(dimension) => {
                    if !(0.0..=1.0).contains(&value) {
                        warn!("{label}: clamping {dimension}={value} into [0, 1]");
                    }
                    scores.set(dimension, value);
                }
                Err(e) if strictness == Strictness::Strict => return Err(e),
                Err(e) => warn!("{label}: dropping score: {e}"),
            }
        }

        Ok(scores)
    }
}

impl FromIterator<(Dimension, f64)> for TraitScores {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        let mut scores = TraitScores::new();
        for (dimension, value) in iter {
            scores.set(dimension, value);
        }
        scores
    }
}

/// A full trait vector: one `TraitScores` per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraitProfile {
    pub academic_strengths: TraitScores,
    pub thinking_style: TraitScores,
    pub learning_style: TraitScores,
    pub interests: TraitScores,
}

impl TraitProfile {
    pub fn category(&self, category: TraitCategory) -> &TraitScores {
        match category {
            TraitCategory::AcademicStrengths => &self.academic_strengths,
            TraitCategory::ThinkingStyle => &self.thinking_style,
            TraitCategory::LearningStyle => &self.learning_style,
            TraitCategory::Interests => &self.interests,
        }
    }

    pub fn category_mut(&mut self, category: TraitCategory) -> &mut TraitScores {
        match category {
            TraitCategory::AcademicStrengths => &mut self.academic_strengths,
            TraitCategory::ThinkingStyle => &mut self.thinking_style,
            TraitCategory::LearningStyle => &mut self.learning_style,
            TraitCategory::Interests => &mut self.interests,
        }
    }

    /// Converts a user-supplied or model-produced vector. Every category must be
    /// present and every key must name a known dimension of its category.
    pub fn from_raw_strict(raw: &RawTraitProfile) -> Result<Self, TraitError> {
        Self::convert(raw, Strictness::Strict, "trait vector")
    }

    /// Converts a stored profile. Missing categories become empty mappings and
    /// unusable entries are dropped; both are logged against `label`.
    pub fn from_raw_lenient(raw: &RawTraitProfile, label: &str) -> Self {
        match Self::convert(raw, Strictness::Lenient, label) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("{label}: unusable trait profile, treating as empty: {e}");
                TraitProfile::default()
            }
        }
    }

    fn convert(
        raw: &RawTraitProfile,
        strictness: Strictness,
        label: &str,
    ) -> Result<Self, TraitError> {
        for category in TraitCategory::ALL {
            if !raw.contains_key(category.as_str()) {
                match strictness {
                    Strictness::Strict => return Err(TraitError::IncompleteTraitVector(category)),
                    Strictness::Lenient => {
                        warn!("{label}: missing category '{category}', defaulting to empty")
                    }
                }
            }
        }

        let mut profile = TraitProfile::default();
        for (name, scores) in raw {
            let Some(category) = TraitCategory::from_name(name) else {
                match strictness {
                    Strictness::Strict => return Err(TraitError::UnknownCategory(name.clone())),
                    Strictness::Lenient => {
                        warn!("{label}: ignoring unknown category '{name}'");
                        continue;
                    }
                }
            };
            *profile.category_mut(category) =
                TraitScores::from_raw(category, scores, strictness, label)?;
        }

        Ok(profile)
    }

    /// Number of dimensions that carry a score, across all categories.
    pub fn scored_dimensions(&self) -> usize {
        TraitCategory::ALL
            .into_iter()
            .map(|category| self.category(category).len())
            .sum()
    }

    /// True when no category carries any score.
    pub fn is_unscored(&self) -> bool {
        TraitCategory::ALL
            .into_iter()
            .all(|category| self.category(category).is_empty())
    }

    /// The untyped form used for storage. Only dimensions that carry a score are emitted.
    pub fn to_raw(&self) -> RawTraitProfile {
        TraitCategory::ALL
            .into_iter()
            .map(|category| {
                let scores = self
                    .category(category)
                    .iter()
                    .map(|(d, v)| (d.as_str().to_string(), v))
                    .collect();
                (category.as_str().to_string(), scores)
            })
            .collect()
    }

    /// All-zero template naming every category and dimension, embedded in prompts.
    pub fn template() -> RawTraitProfile {
        TraitCategory::ALL
            .into_iter()
            .map(|category| {
                let scores = category
                    .dimensions()
                    .iter()
                    .map(|d| (d.as_str().to_string(), 0.0))
                    .collect();
                (category.as_str().to_string(), scores)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTraitProfile {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> RawTraitProfile {
        raw(json!({
            "academic_strengths": {"mathematics": 0.9},
            "thinking_style": {"logical_reasoning": 0.8},
            "learning_style": {},
            "interests": {"technology_innovation": 0.7}
        }))
    }

    #[test]
    fn test_every_dimension_belongs_to_its_listed_category() {
        for category in TraitCategory::ALL {
            for dimension in category.dimensions() {
                assert_eq!(dimension.category(), category, "{dimension}");
            }
        }
    }

    #[test]
    fn test_dimension_count_is_38() {
        let total: usize = TraitCategory::ALL.iter().map(|c| c.dimensions().len()).sum();
        assert_eq!(total, 38);
    }

    #[test]
    fn test_dimension_names_round_trip_and_match_serde() {
        for category in TraitCategory::ALL {
            for &dimension in category.dimensions() {
                assert_eq!(Dimension::from_name(dimension.as_str()), Some(dimension));
                let json = serde_json::to_string(&dimension).unwrap();
                assert_eq!(json, format!("\"{}\"", dimension.as_str()));
            }
        }
    }

    #[test]
    fn test_category_names_match_serde() {
        for category in TraitCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_missing_dimension_reads_zero() {
        let scores = TraitScores::new().with(Dimension::Mathematics, 0.4);
        assert_eq!(scores.get(Dimension::Mathematics), 0.4);
        assert_eq!(scores.get(Dimension::LifeSciences), 0.0);
    }

    #[test]
    fn test_set_clamps_into_unit_interval() {
        let scores = TraitScores::new()
            .with(Dimension::Mathematics, 1.7)
            .with(Dimension::LifeSciences, -0.2);
        assert_eq!(scores.get(Dimension::Mathematics), 1.0);
        assert_eq!(scores.get(Dimension::LifeSciences), 0.0);
    }

    #[test]
    fn test_strict_accepts_complete_vector() {
        let profile = TraitProfile::from_raw_strict(&complete()).unwrap();
        assert_eq!(profile.academic_strengths.get(Dimension::Mathematics), 0.9);
        assert_eq!(profile.thinking_style.get(Dimension::LogicalReasoning), 0.8);
        assert!(profile.learning_style.is_empty());
    }

    #[test]
    fn test_strict_rejects_missing_category() {
        let mut input = complete();
        input.remove("interests");
        let err = TraitProfile::from_raw_strict(&input).unwrap_err();
        assert_eq!(
            err,
            TraitError::IncompleteTraitVector(TraitCategory::Interests)
        );
        assert!(err.to_string().contains("incomplete trait vector"));
    }

    #[test]
    fn test_strict_rejects_unknown_dimension() {
        let mut input = complete();
        input
            .get_mut("academic_strengths")
            .unwrap()
            .insert("mathmatics".to_string(), 0.5);
        let err = TraitProfile::from_raw_strict(&input).unwrap_err();
        assert!(matches!(err, TraitError::UnknownDimension { .. }));
    }

    #[test]
    fn test_strict_rejects_unknown_category() {
        let mut input = complete();
        input.insert("personality".to_string(), BTreeMap::new());
        let err = TraitProfile::from_raw_strict(&input).unwrap_err();
        assert_eq!(err, TraitError::UnknownCategory("personality".to_string()));
    }

    #[test]
    fn test_strict_rejects_misplaced_dimension() {
        let mut input = complete();
        input
            .get_mut("interests")
            .unwrap()
            .insert("mathematics".to_string(), 0.5);
        let err = TraitProfile::from_raw_strict(&input).unwrap_err();
        assert_eq!(
            err,
            TraitError::MisplacedDimension {
                dimension: Dimension::Mathematics,
                expected: TraitCategory::AcademicStrengths,
                found: TraitCategory::Interests,
            }
        );
    }

    #[test]
    fn test_strict_rejects_non_finite_score() {
        let mut input = complete();
        input
            .get_mut("thinking_style")
            .unwrap()
            .insert("critical_thinking".to_string(), f64::NAN);
        let err = TraitProfile::from_raw_strict(&input).unwrap_err();
        assert_eq!(err, TraitError::InvalidScore(Dimension::CriticalThinking));
    }

    #[test]
    fn test_lenient_defaults_missing_category_to_empty() {
        let input = raw(json!({"academic_strengths": {"mathematics": 1.0}}));
        let profile = TraitProfile::from_raw_lenient(&input, "major 'Physics'");
        assert_eq!(profile.academic_strengths.get(Dimension::Mathematics), 1.0);
        assert!(profile.thinking_style.is_empty());
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_lenient_drops_unknown_keys_and_keeps_the_rest() {
        let input = raw(json!({
            "academic_strengths": {"mathematics": 0.6, "astrology": 0.9},
            "hobbies": {"chess": 1.0}
        }));
        let profile = TraitProfile::from_raw_lenient(&input, "major 'Statistics'");
        assert_eq!(profile.academic_strengths.len(), 1);
        assert_eq!(profile.academic_strengths.get(Dimension::Mathematics), 0.6);
    }

    #[test]
    fn test_to_raw_then_strict_preserves_scores() {
        let original = TraitProfile::from_raw_strict(&complete()).unwrap();
        let restored = TraitProfile::from_raw_strict(&original.to_raw()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_scored_dimensions_counts_across_categories() {
        let profile = TraitProfile::from_raw_strict(&complete()).unwrap();
        assert_eq!(profile.scored_dimensions(), 3);
        assert!(!profile.is_unscored());
        assert!(TraitProfile::default().is_unscored());
    }

    #[test]
    fn test_to_raw_names_every_category() {
        let raw = TraitProfile::default().to_raw();
        assert_eq!(raw.len(), 4);
        assert!(raw.values().all(|scores| scores.is_empty()));
    }

    #[test]
    fn test_template_lists_every_dimension_at_zero() {
        let template = TraitProfile::template();
        assert_eq!(template.len(), 4);
        assert_eq!(template["academic_strengths"].len(), 12);
        assert_eq!(template["thinking_style"].len(), 8);
        assert_eq!(template["learning_style"].len(), 7);
        assert_eq!(template["interests"].len(), 11);
        assert!(template.values().flat_map(|m| m.values()).all(|v| *v == 0.0));
    }
}
