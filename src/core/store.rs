use async_trait::async_trait;
use thiserror::Error;

use crate::models::{InvestorProfile, Profile, Role, StartupProfile};

/// Errors a profile store may report to the match generator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response from profile store: {0}")]
    InvalidResponse(String),

    #[error("Unauthorized: profile store rejected credentials")]
    Unauthorized,
}

/// Read access to startup and investor profiles
///
/// Implementations are expected to apply the candidate status filter
/// (`active` investors, `published` startups) in `find_active_candidates`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile owned by `user_id` on the `role` side, if one exists
    async fn find_own_profile(&self, user_id: &str, role: Role) -> Result<Option<Profile>, StoreError>;

    /// All eligible profiles of `role`
    async fn find_active_candidates(&self, role: Role) -> Result<Vec<Profile>, StoreError>;
}

/// Profile store backed by plain vectors
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    startups: Vec<StartupProfile>,
    investors: Vec<InvestorProfile>,
    failure: Option<String>,
}

impl InMemoryProfileStore {
    pub fn new(startups: Vec<StartupProfile>, investors: Vec<InvestorProfile>) -> Self {
        Self {
            startups,
            investors,
            failure: None,
        }
    }

    /// A store whose every call fails with `StoreError::Unavailable`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_own_profile(&self, user_id: &str, role: Role) -> Result<Option<Profile>, StoreError> {
        self.check_available()?;

        let profile = match role {
            Role::Startup => self
                .startups
                .iter()
                .find(|s| s.user_id == user_id)
                .cloned()
                .map(Profile::Startup),
            Role::Investor => self
                .investors
                .iter()
                .find(|i| i.user_id == user_id)
                .cloned()
                .map(Profile::Investor),
        };

        Ok(profile)
    }

    async fn find_active_candidates(&self, role: Role) -> Result<Vec<Profile>, StoreError> {
        self.check_available()?;

        let status = role.eligible_status();
        let candidates = match role {
            Role::Startup => self
                .startups
                .iter()
                .filter(|s| s.status.as_deref() == Some(status))
                .cloned()
                .map(Profile::Startup)
                .collect(),
            Role::Investor => self
                .investors
                .iter()
                .filter(|i| i.status.as_deref() == Some(status))
                .cloned()
                .map(Profile::Investor)
                .collect(),
        };

        Ok(candidates)
    }
}
