use crate::models::{InvestorProfile, MatchFactors, MatchResult, ScoringWeights, StartupProfile};
use crate::core::filters::{
    business_model_fits, check_size_fits, geography_fits, industry_aligned, stage_preferred,
};

/// Highest score a pair can reach regardless of configured weights
pub const MAX_SCORE: u8 = 100;

/// Calculate a match score (0-100) between a startup and an investor
///
/// Every factor is binary: it contributes its full weight or zero.
///
/// Scoring formula (default weights):
/// score = min(
///     industry_alignment * 30 +    # Shared industry tag
///     stage_preference * 25 +      # Stage maps to a targeted round
///     business_model_fit * 20 +    # Model maps to a targeted label
///     check_size_match * 15 +      # target / 1000 within [min, max]
///     geography_match * 10,        # Investor is "Global"
///     100
/// )
pub fn calculate_match_score(
    startup: &StartupProfile,
    investor: &InvestorProfile,
    weights: &ScoringWeights,
) -> MatchResult {
    let award = |matched: bool, weight: u8| if matched { weight } else { 0 };

    let factors = MatchFactors {
        industry_alignment: award(industry_aligned(startup, investor), weights.industry),
        stage_preference: award(stage_preferred(startup, investor), weights.stage),
        business_model_fit: award(business_model_fits(startup, investor), weights.business_model),
        check_size_match: award(check_size_fits(startup, investor), weights.check_size),
        geography_match: award(geography_fits(investor), weights.geography),
    };

    // Unreachable with the default weights, which already sum to 100
    let score = factors.total().min(u32::from(MAX_SCORE)) as u8;

    MatchResult {
        startup_id: startup.id.clone(),
        investor_id: investor.id.clone(),
        score,
        factors,
    }
}

/// Calculate a match score with the default factor weights
pub fn calculate_default_match_score(
    startup: &StartupProfile,
    investor: &InvestorProfile,
) -> MatchResult {
    calculate_match_score(startup, investor, &ScoringWeights::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessModel, StartupStage};

    fn create_test_startup(stage: &str, model: &str, target_amount: Option<f64>) -> StartupProfile {
        StartupProfile {
            id: "startup_1".to_string(),
            user_id: "founder_1".to_string(),
            name: None,
            status: Some("published".to_string()),
            industry: vec!["Technology".to_string()],
            stage: Some(StartupStage::from(stage)),
            business_model: Some(BusinessModel::from(model)),
            target_amount,
        }
    }

    fn create_test_investor() -> InvestorProfile {
        InvestorProfile {
            id: "investor_1".to_string(),
            user_id: "angel_1".to_string(),
            name: None,
            status: Some("active".to_string()),
            investment_industries: vec!["Technology".to_string()],
            investment_stages: vec!["Seed".to_string()],
            business_models: vec!["SaaS".to_string()],
            check_size_min: Some(100.0),
            check_size_max: Some(1000.0),
            investment_geographies: vec!["Global".to_string()],
        }
    }

    fn create_empty_investor() -> InvestorProfile {
        InvestorProfile {
            id: "investor_0".to_string(),
            user_id: "angel_0".to_string(),
            name: None,
            status: Some("active".to_string()),
            investment_industries: vec![],
            investment_stages: vec![],
            business_models: vec![],
            check_size_min: None,
            check_size_max: None,
            investment_geographies: vec!["North America".to_string()],
        }
    }

    #[test]
    fn test_full_match() {
        let startup = create_test_startup("idea", "saas", Some(500_000.0));
        let investor = create_test_investor();

        let result = calculate_default_match_score(&startup, &investor);

        assert_eq!(result.score, 100);
        assert_eq!(
            result.factors,
            MatchFactors {
                industry_alignment: 30,
                stage_preference: 25,
                business_model_fit: 20,
                check_size_match: 15,
                geography_match: 10,
            }
        );
        assert_eq!(result.startup_id, "startup_1");
        assert_eq!(result.investor_id, "investor_1");
    }

    #[test]
    fn test_empty_investor_scores_zero() {
        let startup = create_test_startup("growth", "b2b", Some(2_000_000.0));
        let investor = create_empty_investor();

        let result = calculate_default_match_score(&startup, &investor);

        assert_eq!(result.score, 0);
        assert_eq!(result.factors, MatchFactors::default());
    }

    #[test]
    fn test_check_size_uses_thousands() {
        let startup = create_test_startup("idea", "saas", Some(50_000.0));
        let investor = create_test_investor();

        let result = calculate_default_match_score(&startup, &investor);

        // 50000 / 1000 = 50, outside [100, 1000]
        assert_eq!(result.factors.check_size_match, 0);

        let startup = create_test_startup("idea", "saas", Some(150_000.0));
        let result = calculate_default_match_score(&startup, &investor);
        assert_eq!(result.factors.check_size_match, 15);
    }

    #[test]
    fn test_unknown_stage_scores_zero_on_stage() {
        let startup = create_test_startup("nonexistent", "saas", Some(500_000.0));
        let investor = create_test_investor();

        let result = calculate_default_match_score(&startup, &investor);

        assert_eq!(result.factors.stage_preference, 0);
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_score_capped_with_custom_weights() {
        let startup = create_test_startup("idea", "saas", Some(500_000.0));
        let investor = create_test_investor();
        let weights = ScoringWeights {
            industry: 50,
            stage: 50,
            business_model: 50,
            check_size: 50,
            geography: 50,
        };

        let result = calculate_match_score(&startup, &investor, &weights);

        assert_eq!(result.factors.total(), 250);
        assert_eq!(result.score, MAX_SCORE);
    }
}
