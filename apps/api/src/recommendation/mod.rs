// Major recommendation: trait schema, similarity scoring, ranking, the
// persisted major catalog, and the model-backed steps that feed them.
// Scoring and ranking are pure; only extraction, profiling and question
// generation call the model, and only through llm_client.

pub mod catalog;
pub mod extraction;
pub mod handlers;
pub mod profiling;
pub mod prompts;
pub mod questions;
pub mod ranker;
pub mod schema;
pub mod scorer;
pub mod similarity;
