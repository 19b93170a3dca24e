use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the marketplace a user belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Startup,
    Investor,
}

impl Role {
    /// The role whose profiles are candidates for this role
    pub fn opposite(self) -> Self {
        match self {
            Role::Startup => Role::Investor,
            Role::Investor => Role::Startup,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Startup => "startup",
            Role::Investor => "investor",
        }
    }

    /// Status a profile of this role must carry to be offered as a candidate
    pub fn eligible_status(self) -> &'static str {
        match self {
            Role::Startup => "published",
            Role::Investor => "active",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "startup" => Ok(Role::Startup),
            "investor" => Ok(Role::Investor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Development stage of a startup
///
/// Values outside the known set are kept as `Unrecognized` so that a typo in
/// stored data only costs the stage factor instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StartupStage {
    Idea,
    Prototype,
    Mvp,
    EarlyStage,
    Growth,
    Expansion,
    Unrecognized(String),
}

impl StartupStage {
    pub fn as_str(&self) -> &str {
        match self {
            StartupStage::Idea => "idea",
            StartupStage::Prototype => "prototype",
            StartupStage::Mvp => "mvp",
            StartupStage::EarlyStage => "early-stage",
            StartupStage::Growth => "growth",
            StartupStage::Expansion => "expansion",
            StartupStage::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for StartupStage {
    fn from(value: String) -> Self {
        match value.as_str() {
            "idea" => StartupStage::Idea,
            "prototype" => StartupStage::Prototype,
            "mvp" => StartupStage::Mvp,
            "early-stage" => StartupStage::EarlyStage,
            "growth" => StartupStage::Growth,
            "expansion" => StartupStage::Expansion,
            _ => StartupStage::Unrecognized(value),
        }
    }
}

impl From<&str> for StartupStage {
    fn from(value: &str) -> Self {
        StartupStage::from(value.to_string())
    }
}

impl From<StartupStage> for String {
    fn from(value: StartupStage) -> Self {
        match value {
            StartupStage::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Revenue model of a startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessModel {
    B2b,
    B2c,
    B2b2c,
    Marketplace,
    Saas,
    Other,
    Unrecognized(String),
}

impl BusinessModel {
    pub fn as_str(&self) -> &str {
        match self {
            BusinessModel::B2b => "b2b",
            BusinessModel::B2c => "b2c",
            BusinessModel::B2b2c => "b2b2c",
            BusinessModel::Marketplace => "marketplace",
            BusinessModel::Saas => "saas",
            BusinessModel::Other => "other",
            BusinessModel::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for BusinessModel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "b2b" => BusinessModel::B2b,
            "b2c" => BusinessModel::B2c,
            "b2b2c" => BusinessModel::B2b2c,
            "marketplace" => BusinessModel::Marketplace,
            "saas" => BusinessModel::Saas,
            "other" => BusinessModel::Other,
            _ => BusinessModel::Unrecognized(value),
        }
    }
}

impl From<&str> for BusinessModel {
    fn from(value: &str) -> Self {
        BusinessModel::from(value.to_string())
    }
}

impl From<BusinessModel> for String {
    fn from(value: BusinessModel) -> Self {
        match value {
            BusinessModel::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Treats an explicit `null` list the same as a missing one
fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Startup profile as stored by the profile-management subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupProfile {
    pub id: String,
    #[serde(alias = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub industry: Vec<String>,
    #[serde(default)]
    pub stage: Option<StartupStage>,
    #[serde(alias = "businessModel", default)]
    pub business_model: Option<BusinessModel>,
    /// Raw currency units
    #[serde(alias = "targetAmount", default)]
    pub target_amount: Option<f64>,
}

impl StartupProfile {
    /// True unless the record carries a status other than `published`
    pub fn is_candidate_eligible(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |status| status == Role::Startup.eligible_status())
    }
}

/// Investor profile as stored by the profile-management subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub id: String,
    #[serde(alias = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(alias = "investmentIndustries", default, deserialize_with = "nullable_vec")]
    pub investment_industries: Vec<String>,
    #[serde(alias = "investmentStages", default, deserialize_with = "nullable_vec")]
    pub investment_stages: Vec<String>,
    #[serde(alias = "businessModels", default, deserialize_with = "nullable_vec")]
    pub business_models: Vec<String>,
    /// Thousands of currency units
    #[serde(alias = "checkSizeMin", default)]
    pub check_size_min: Option<f64>,
    /// Thousands of currency units
    #[serde(alias = "checkSizeMax", default)]
    pub check_size_max: Option<f64>,
    #[serde(alias = "investmentGeographies", default, deserialize_with = "nullable_vec")]
    pub investment_geographies: Vec<String>,
}

impl InvestorProfile {
    /// True unless the record carries a status other than `active`
    pub fn is_candidate_eligible(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |status| status == Role::Investor.eligible_status())
    }
}

/// A profile of either side
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Startup(StartupProfile),
    Investor(InvestorProfile),
}

impl Profile {
    pub fn id(&self) -> &str {
        match self {
            Profile::Startup(startup) => &startup.id,
            Profile::Investor(investor) => &investor.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Startup(_) => Role::Startup,
            Profile::Investor(_) => Role::Investor,
        }
    }
}

/// Per-factor weights; each factor awards its full weight or nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub industry: u8,
    pub stage: u8,
    pub business_model: u8,
    pub check_size: u8,
    pub geography: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            industry: 30,
            stage: 25,
            business_model: 20,
            check_size: 15,
            geography: 10,
        }
    }
}

impl ScoringWeights {
    /// True when any factor weight differs from the published 30/25/20/15/10 rule set
    pub fn is_overridden(&self) -> bool {
        *self != Self::default()
    }
}

/// Breakdown of the points each factor contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFactors {
    #[serde(rename = "industryAlignment")]
    pub industry_alignment: u8,
    #[serde(rename = "stagePreference")]
    pub stage_preference: u8,
    #[serde(rename = "businessModelFit")]
    pub business_model_fit: u8,
    #[serde(rename = "checkSizeMatch")]
    pub check_size_match: u8,
    #[serde(rename = "geographyMatch")]
    pub geography_match: u8,
}

impl MatchFactors {
    /// Uncapped sum of all factor contributions
    pub fn total(&self) -> u32 {
        [
            self.industry_alignment,
            self.stage_preference,
            self.business_model_fit,
            self.check_size_match,
            self.geography_match,
        ]
        .iter()
        .map(|&points| u32::from(points))
        .sum()
    }
}

/// Scored startup/investor pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "startupId")]
    pub startup_id: String,
    #[serde(rename = "investorId")]
    pub investor_id: String,
    pub score: u8,
    pub factors: MatchFactors,
}

impl MatchResult {
    /// Id of the pair member on the `role` side
    pub fn side_id(&self, role: Role) -> &str {
        match role {
            Role::Startup => &self.startup_id,
            Role::Investor => &self.investor_id,
        }
    }

    /// Id of the pair member that is not on the `role` side
    pub fn counterpart_id(&self, role: Role) -> &str {
        self.side_id(role.opposite())
    }
}

/// Lifecycle of a persisted match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Match row as stored in the matches table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMatch {
    pub id: uuid::Uuid,
    #[serde(rename = "startupId")]
    pub startup_id: String,
    #[serde(rename = "investorId")]
    pub investor_id: String,
    pub score: i32,
    pub factors: MatchFactors,
    pub status: MatchStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_opposite() {
        assert_eq!(Role::Startup.opposite(), Role::Investor);
        assert_eq!(Role::Investor.opposite(), Role::Startup);
        assert_eq!("Investor".parse::<Role>(), Ok(Role::Investor));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_deserialization_ignores_case() {
        for raw in ["investor", "Investor", "INVESTOR"] {
            let role: Role = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(role, Role::Investor);
        }

        assert!(serde_json::from_value::<Role>(serde_json::json!("admin")).is_err());
        assert_eq!(serde_json::to_value(Role::Startup).unwrap(), serde_json::json!("startup"));
    }

    #[test]
    fn test_weight_override_detected() {
        assert!(!ScoringWeights::default().is_overridden());

        let no_geography = ScoringWeights {
            geography: 0,
            ..ScoringWeights::default()
        };
        assert!(no_geography.is_overridden());
    }

    #[test]
    fn test_unknown_stage_survives_deserialization() {
        let startup: StartupProfile = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "user_id": "u1",
            "industry": ["Technology"],
            "stage": "nonexistent",
            "business_model": "saas",
            "target_amount": 250000
        }))
        .unwrap();

        assert_eq!(
            startup.stage,
            Some(StartupStage::Unrecognized("nonexistent".to_string()))
        );
        assert_eq!(startup.business_model, Some(BusinessModel::Saas));
        assert_eq!(startup.target_amount, Some(250000.0));
    }

    #[test]
    fn test_null_lists_become_empty() {
        let investor: InvestorProfile = serde_json::from_value(serde_json::json!({
            "id": "i1",
            "status": "active",
            "investment_industries": null,
            "investment_stages": null,
            "check_size_min": null
        }))
        .unwrap();

        assert!(investor.investment_industries.is_empty());
        assert!(investor.investment_stages.is_empty());
        assert!(investor.business_models.is_empty());
        assert!(investor.investment_geographies.is_empty());
        assert_eq!(investor.check_size_min, None);
    }

    #[test]
    fn test_camel_case_aliases() {
        let investor: InvestorProfile = serde_json::from_value(serde_json::json!({
            "id": "i1",
            "userId": "u9",
            "investmentGeographies": ["Global"],
            "checkSizeMax": 1000
        }))
        .unwrap();

        assert_eq!(investor.user_id, "u9");
        assert_eq!(investor.investment_geographies, vec!["Global"]);
        assert_eq!(investor.check_size_max, Some(1000.0));
    }

    #[test]
    fn test_stage_serializes_to_raw_string() {
        let json = serde_json::to_value(StartupStage::EarlyStage).unwrap();
        assert_eq!(json, serde_json::json!("early-stage"));

        let json = serde_json::to_value(BusinessModel::Unrecognized("d2c".into())).unwrap();
        assert_eq!(json, serde_json::json!("d2c"));
    }

    #[test]
    fn test_candidate_eligibility() {
        let mut investor = InvestorProfile {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            name: None,
            status: Some("active".to_string()),
            investment_industries: vec![],
            investment_stages: vec![],
            business_models: vec![],
            check_size_min: None,
            check_size_max: None,
            investment_geographies: vec![],
        };
        assert!(investor.is_candidate_eligible());

        investor.status = Some("suspended".to_string());
        assert!(!investor.is_candidate_eligible());

        investor.status = None;
        assert!(investor.is_candidate_eligible());
    }

    #[test]
    fn test_factor_total() {
        let factors = MatchFactors {
            industry_alignment: 30,
            stage_preference: 0,
            business_model_fit: 20,
            check_size_match: 15,
            geography_match: 10,
        };
        assert_eq!(factors.total(), 75);
    }
}
