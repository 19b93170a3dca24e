//! Venture Match - match-scoring service pairing startups with investors
//!
//! This library provides the scoring engine that rates a startup against an
//! investor over five weighted factors, and the generator that ranks every
//! opposite-role candidate for a given user.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, InMemoryProfileStore, MatchGenerator, ProfileStore, StoreError};
pub use crate::models::{InvestorProfile, MatchFactors, MatchResult, Role, ScoringWeights, StartupProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let generator = MatchGenerator::default();
        assert_eq!(*generator.weights(), ScoringWeights::default());
    }
}
