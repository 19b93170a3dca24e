// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessModel, InvestorProfile, MatchFactors, MatchResult, MatchStatus, Profile, Role,
    ScoringWeights, StartupProfile, StartupStage, StoredMatch,
};
pub use requests::{GenerateMatchesRequest, ListMatchesQuery, ScorePairRequest, UpdateStatusRequest};
pub use responses::{ErrorResponse, GenerateMatchesResponse, HealthResponse, ListMatchesResponse};
