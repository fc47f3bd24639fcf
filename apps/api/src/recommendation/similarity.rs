use crate::recommendation::schema::TraitScores;

/// Weighted average of products over the dimensions the user scored:
/// Σ(user · major) / Σ(user).
///
/// Major-side dimensions the user did not score are ignored, and dimensions
/// the major lacks contribute 0. An all-zero user category yields 0.0.
pub fn trait_similarity(user: &TraitScores, major: &TraitScores) -> f64 {
    let (numerator, denominator) = user.iter().fold(
        (0.0_f64, 0.0_f64),
        |(numerator, denominator), (dimension, user_value)| {
            (
                numerator + user_value * major.get(dimension),
                denominator + user_value,
            )
        },
    );

    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}
