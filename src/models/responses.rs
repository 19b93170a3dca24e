use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, StoredMatch};

/// Response for the generate matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMatchesResponse {
    pub matches: Vec<MatchResult>,
    /// Pairs newly persisted as pending by this call
    pub created: u64,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the persisted matches listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesResponse {
    pub matches: Vec<StoredMatch>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
