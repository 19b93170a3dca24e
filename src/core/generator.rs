use crate::models::{InvestorProfile, MatchResult, Profile, Role, ScoringWeights, StartupProfile};
use crate::core::{
    scoring::calculate_match_score,
    store::{ProfileStore, StoreError},
};

/// Batch matcher - scores a user's profile against every opposite-role candidate
///
/// # Pipeline Stages
/// 1. Load the caller's own profile
/// 2. Load eligible candidates of the opposite role
/// 3. Score every (startup, investor) pair
/// 4. Drop zero scores and rank by score
///
/// Persistence and deduplication against stored matches are left to the caller.
#[derive(Debug, Clone)]
pub struct MatchGenerator {
    weights: ScoringWeights,
}

impl MatchGenerator {
    /// Build a generator with custom weights; a change from the default rule set is logged
    pub fn new(weights: ScoringWeights) -> Self {
        if weights.is_overridden() {
            tracing::warn!(
                "Scoring weights overridden: {:?} (default {:?})",
                weights,
                ScoringWeights::default()
            );
        }
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Generate ranked matches for a user, degrading every failure to an empty list
    ///
    /// A missing profile is a normal state for new users and yields no matches.
    /// Store errors are logged and also yield no matches.
    pub async fn generate_matches<S>(&self, store: &S, user_id: &str, role: Role) -> Vec<MatchResult>
    where
        S: ProfileStore + ?Sized,
    {
        match self.try_generate_matches(store, user_id, role).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Match generation failed for {} ({}): {}", user_id, role, e);
                Vec::new()
            }
        }
    }

    /// Generate ranked matches for a user, surfacing store errors
    pub async fn try_generate_matches<S>(
        &self,
        store: &S,
        user_id: &str,
        role: Role,
    ) -> Result<Vec<MatchResult>, StoreError>
    where
        S: ProfileStore + ?Sized,
    {
        let Some(own_profile) = store.find_own_profile(user_id, role).await? else {
            tracing::debug!("No {} profile for user {}, nothing to match", role, user_id);
            return Ok(Vec::new());
        };

        let candidate_role = role.opposite();
        let candidates = store.find_active_candidates(candidate_role).await?;

        if candidates.is_empty() {
            tracing::debug!("No active {} candidates for user {}", candidate_role, user_id);
            return Ok(Vec::new());
        }

        let total_candidates = candidates.len();

        let matches = match own_profile {
            Profile::Startup(startup) if role == Role::Startup => {
                let investors = candidates
                    .into_iter()
                    .filter_map(|candidate| match candidate {
                        Profile::Investor(investor) => Some(investor),
                        Profile::Startup(other) => {
                            tracing::warn!("Skipping startup {} in investor candidate set", other.id);
                            None
                        }
                    })
                    .collect();
                self.rank_investors(&startup, investors)
            }
            Profile::Investor(investor) if role == Role::Investor => {
                let startups = candidates
                    .into_iter()
                    .filter_map(|candidate| match candidate {
                        Profile::Startup(startup) => Some(startup),
                        Profile::Investor(other) => {
                            tracing::warn!("Skipping investor {} in startup candidate set", other.id);
                            None
                        }
                    })
                    .collect();
                self.rank_startups(&investor, startups)
            }
            other => {
                tracing::warn!(
                    "Store returned a {} profile ({}) for a {} lookup of user {}",
                    other.role(),
                    other.id(),
                    role,
                    user_id
                );
                return Ok(Vec::new());
            }
        };

        tracing::debug!(
            "Generated {} matches for {} {} (from {} candidates)",
            matches.len(),
            role,
            user_id,
            total_candidates
        );

        Ok(matches)
    }

    /// Score a startup against a loaded set of investors
    pub fn rank_investors(
        &self,
        startup: &StartupProfile,
        investors: Vec<InvestorProfile>,
    ) -> Vec<MatchResult> {
        let scored = investors
            .iter()
            .filter(|investor| investor.is_candidate_eligible())
            .map(|investor| calculate_match_score(startup, investor, &self.weights))
            .collect();

        rank(scored, Role::Startup)
    }

    /// Score an investor against a loaded set of startups
    ///
    /// The startup still goes first into the calculator.
    pub fn rank_startups(
        &self,
        investor: &InvestorProfile,
        startups: Vec<StartupProfile>,
    ) -> Vec<MatchResult> {
        let scored = startups
            .iter()
            .filter(|startup| startup.is_candidate_eligible())
            .map(|startup| calculate_match_score(startup, investor, &self.weights))
            .collect();

        rank(scored, Role::Investor)
    }
}

impl Default for MatchGenerator {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Drop zero scores, then sort by score (descending) and candidate id (ascending)
fn rank(mut scored: Vec<MatchResult>, role: Role) -> Vec<MatchResult> {
    scored.retain(|result| result.score > 0);

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.counterpart_id(role).cmp(b.counterpart_id(role)))
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::InMemoryProfileStore;
    use crate::models::{BusinessModel, StartupStage};

    fn create_startup(id: &str, user_id: &str) -> StartupProfile {
        StartupProfile {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: Some(format!("Startup {}", id)),
            status: Some("published".to_string()),
            industry: vec!["Fintech".to_string()],
            stage: Some(StartupStage::Mvp),
            business_model: Some(BusinessModel::B2b),
            target_amount: Some(750_000.0),
        }
    }

    fn create_investor(id: &str, industries: &[&str], global: bool) -> InvestorProfile {
        InvestorProfile {
            id: id.to_string(),
            user_id: format!("user_{}", id),
            name: Some(format!("Investor {}", id)),
            status: Some("active".to_string()),
            investment_industries: industries.iter().map(|s| s.to_string()).collect(),
            investment_stages: vec![],
            business_models: vec![],
            check_size_min: None,
            check_size_max: None,
            investment_geographies: if global { vec!["Global".to_string()] } else { vec![] },
        }
    }

    #[test]
    fn test_rank_investors_filters_and_sorts() {
        let generator = MatchGenerator::with_default_weights();
        let startup = create_startup("s1", "founder");

        let investors = vec![
            create_investor("low", &[], true),               // 10
            create_investor("none", &["Retail"], false),     // 0
            create_investor("high", &["Fintech"], true),     // 40
        ];

        let matches = generator.rank_investors(&startup, investors);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].investor_id, "high");
        assert_eq!(matches[0].score, 40);
        assert_eq!(matches[1].investor_id, "low");
        assert_eq!(matches[1].score, 10);
    }

    #[test]
    fn test_custom_weights_applied() {
        let weights = ScoringWeights {
            geography: 0,
            ..ScoringWeights::default()
        };
        let generator = MatchGenerator::new(weights);
        let startup = create_startup("s1", "founder");

        let matches = generator.rank_investors(&startup, vec![create_investor("global_only", &[], true)]);

        assert_eq!(generator.weights(), &weights);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_ties_broken_by_candidate_id() {
        let generator = MatchGenerator::with_default_weights();
        let startup = create_startup("s1", "founder");

        let investors = vec![
            create_investor("c", &[], true),
            create_investor("a", &[], true),
            create_investor("b", &[], true),
        ];

        let matches = generator.rank_investors(&startup, investors);
        let ids: Vec<&str> = matches.iter().map(|m| m.investor_id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ineligible_candidates_skipped() {
        let generator = MatchGenerator::with_default_weights();
        let startup = create_startup("s1", "founder");
        let mut dormant = create_investor("dormant", &["Fintech"], true);
        dormant.status = Some("inactive".to_string());

        let matches = generator.rank_investors(&startup, vec![dormant]);

        assert!(matches.is_empty());
    }

    #[test]
    fn test_investor_side_keeps_startup_first() {
        let generator = MatchGenerator::with_default_weights();
        let investor = create_investor("i1", &["Fintech"], false);

        let matches = generator.rank_startups(&investor, vec![create_startup("s1", "founder")]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].startup_id, "s1");
        assert_eq!(matches[0].investor_id, "i1");
        assert_eq!(matches[0].score, 30);
    }

    #[test]
    fn test_generate_without_profile_is_empty() {
        let generator = MatchGenerator::with_default_weights();
        let store = InMemoryProfileStore::new(vec![], vec![create_investor("i1", &["Fintech"], true)]);

        let matches = tokio_test::block_on(generator.generate_matches(&store, "nobody", Role::Startup));

        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_generate_swallows_store_errors() {
        let generator = MatchGenerator::with_default_weights();
        let store = InMemoryProfileStore::failing("timeout");

        let matches = generator.generate_matches(&store, "founder", Role::Startup).await;
        assert!(matches.is_empty());

        let err = generator
            .try_generate_matches(&store, "founder", Role::Startup)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_generate_through_dyn_store() {
        let generator = MatchGenerator::with_default_weights();
        let store: Box<dyn ProfileStore> = Box::new(InMemoryProfileStore::new(
            vec![create_startup("s1", "founder")],
            vec![create_investor("i1", &["Fintech"], true)],
        ));

        let matches = generator.generate_matches(store.as_ref(), "founder", Role::Startup).await;

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 40);
    }
}
