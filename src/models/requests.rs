use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{InvestorProfile, MatchStatus, Role, StartupProfile};

/// Request to generate matches for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to score a single startup/investor pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairRequest {
    pub startup: StartupProfile,
    pub investor: InvestorProfile,
}

/// Query parameters for listing persisted matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesQuery {
    pub role: Role,
}

/// Request to move a persisted match to a new status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: MatchStatus,
}
