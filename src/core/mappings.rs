use crate::models::{BusinessModel, StartupStage};

/// Funding-round labels an investor would use for a startup at `stage`
///
/// Unrecognized stages map to no labels, so the stage factor can never match.
pub fn round_labels(stage: &StartupStage) -> &'static [&'static str] {
    match stage {
        StartupStage::Idea | StartupStage::Prototype => &["Pre-seed", "Seed"],
        StartupStage::Mvp => &["Seed", "Series A"],
        StartupStage::EarlyStage => &["Series A", "Series B"],
        StartupStage::Growth => &["Series B", "Series C"],
        StartupStage::Expansion => &["Series C", "Series D+", "Growth", "Late Stage"],
        StartupStage::Unrecognized(_) => &[],
    }
}

/// Investor-facing labels for a startup's business model
pub fn business_model_labels(model: &BusinessModel) -> &'static [&'static str] {
    match model {
        BusinessModel::B2b => &["B2B"],
        BusinessModel::B2c => &["B2C"],
        BusinessModel::B2b2c => &["B2B2C"],
        BusinessModel::Marketplace => &["Marketplace"],
        BusinessModel::Saas => &["SaaS", "B2B"],
        BusinessModel::Other => &["Other"],
        BusinessModel::Unrecognized(_) => &[],
    }
}
