use crate::models::{InvestorProfile, StartupProfile};
use super::mappings::{business_model_labels, round_labels};

/// Geography label that signals the investor will fund anywhere
pub const GLOBAL_GEOGRAPHY: &str = "Global";

/// `target_amount` is in raw currency units, check sizes are in thousands
const CHECK_SIZE_UNIT: f64 = 1000.0;

/// True when the startup shares at least one industry tag with the investor
#[inline]
pub fn industry_aligned(startup: &StartupProfile, investor: &InvestorProfile) -> bool {
    startup
        .industry
        .iter()
        .any(|tag| investor.investment_industries.contains(tag))
}

/// True when one of the round labels for the startup's stage is targeted by the investor
#[inline]
pub fn stage_preferred(startup: &StartupProfile, investor: &InvestorProfile) -> bool {
    let Some(stage) = &startup.stage else {
        return false;
    };

    round_labels(stage)
        .iter()
        .any(|label| investor.investment_stages.iter().any(|s| s == label))
}

/// True when one of the labels for the startup's business model is targeted by the investor
#[inline]
pub fn business_model_fits(startup: &StartupProfile, investor: &InvestorProfile) -> bool {
    let Some(model) = &startup.business_model else {
        return false;
    };

    business_model_labels(model)
        .iter()
        .any(|label| investor.business_models.iter().any(|m| m == label))
}

/// True when the startup's target, converted to thousands, sits inside the investor's check range
///
/// All three values must be present; the bounds are inclusive.
#[inline]
pub fn check_size_fits(startup: &StartupProfile, investor: &InvestorProfile) -> bool {
    match (investor.check_size_min, investor.check_size_max, startup.target_amount) {
        (Some(min), Some(max), Some(target)) => {
            let target_thousands = target / CHECK_SIZE_UNIT;
            target_thousands >= min && target_thousands <= max
        }
        _ => false,
    }
}

/// True when the investor invests globally
///
/// Placeholder: no other geographic matching exists yet.
#[inline]
pub fn geography_fits(investor: &InvestorProfile) -> bool {
    investor
        .investment_geographies
        .iter()
        .any(|geo| geo == GLOBAL_GEOGRAPHY)
}
