// Core algorithm exports
pub mod filters;
pub mod generator;
pub mod mappings;
pub mod scoring;
pub mod store;

pub use filters::{business_model_fits, check_size_fits, geography_fits, industry_aligned, stage_preferred};
pub use generator::MatchGenerator;
pub use mappings::{business_model_labels, round_labels};
pub use scoring::{calculate_default_match_score, calculate_match_score};
pub use store::{InMemoryProfileStore, ProfileStore, StoreError};
