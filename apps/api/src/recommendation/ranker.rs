use serde::Serialize;

use crate::models::major::MajorRecord;
use crate::recommendation::schema::TraitProfile;
use crate::recommendation::scorer::{score_major, CategoryWeights, ScoreBreakdown};

#[derive(Debug, Clone, Serialize)]
pub struct MajorMatch {
    pub major_id: i64,
    pub major_name: String,
    pub category: Option<String>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores every major against `user` and returns the `top_k` best, highest first.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank_majors(
    user: &TraitProfile,
    catalog: &[MajorRecord],
    weights: &CategoryWeights,
    top_k: usize,
) -> Vec<MajorMatch> {
    let mut matches: Vec<MajorMatch> = catalog
        .iter()
        .map(|major| {
            let breakdown = score_major(user, &major.profile, weights);
            MajorMatch {
                major_id: major.id,
                major_name: major.name.clone(),
                category: major.category.clone(),
                score: breakdown.overall,
                breakdown,
            }
        })
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(top_k);
    matches
}
