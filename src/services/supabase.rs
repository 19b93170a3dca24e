use crate::core::store::{ProfileStore, StoreError};
use crate::models::{InvestorProfile, Profile, Role, StartupProfile};
use async_trait::async_trait;
use reqwest::{header::CONTENT_RANGE, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the hosted database REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<SupabaseError> for StoreError {
    fn from(value: SupabaseError) -> Self {
        match value {
            SupabaseError::Unauthorized => StoreError::Unauthorized,
            SupabaseError::InvalidResponse(msg) => StoreError::InvalidResponse(msg),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Table names in the hosted database
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub startups: String,
    pub investors: String,
}

impl SupabaseTables {
    fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Startup => &self.startups,
            Role::Investor => &self.investors,
        }
    }
}

/// Rows requested per candidate page; hosted PostgREST caps responses at `max-rows` (1000 by default)
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// One page of rows plus the total reported in `Content-Range`, when known
#[derive(Debug)]
struct RowPage {
    rows: Vec<Value>,
    total: Option<usize>,
}

/// REST client for the hosted database
///
/// Reads startup and investor profiles through the PostgREST interface.
/// Row-level access rules are enforced by the database for the configured key.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
    page_size: usize,
}

impl SupabaseClient {
    /// Create a new client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the number of rows fetched per candidate page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Run a GET against `table` with PostgREST filters and return one page of rows
    async fn select_rows(&self, table: &str, filters: &[(&str, String)]) -> Result<RowPage, SupabaseError> {
        let query = filters
            .iter()
            .map(|(column, filter)| format!("{}={}", column, urlencoding::encode(filter)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?select=*&{}", self.table_url(table), query);

        tracing::debug!("Querying rows from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Query on {} failed: {} - {}", table, status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to query {}: {}",
                table, status
            )));
        }

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total);

        let json: Value = response.json().await?;

        match json {
            Value::Array(rows) => Ok(RowPage { rows, total }),
            _ => Err(SupabaseError::InvalidResponse(format!(
                "Expected an array of rows from {}",
                table
            ))),
        }
    }

    /// Get the profile of `role` owned by `user_id`
    pub async fn get_profile(&self, user_id: &str, role: Role) -> Result<Option<Profile>, SupabaseError> {
        let table = self.tables.for_role(role);
        let page = self
            .select_rows(
                table,
                &[
                    ("user_id", format!("eq.{}", user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let Some(row) = page.rows.into_iter().next() else {
            tracing::debug!("No {} profile for user {}", role, user_id);
            return Ok(None);
        };

        let profile = match role {
            Role::Startup => Profile::Startup(parse_row::<StartupProfile>(row)?),
            Role::Investor => Profile::Investor(parse_row::<InvestorProfile>(row)?),
        };

        Ok(Some(profile))
    }

    /// Query every candidate of `role` carrying that role's eligible status
    ///
    /// Pages through the table with `offset`/`limit` until the total from
    /// `Content-Range` has been read, or a short page ends the table when no
    /// total is reported.
    pub async fn query_candidates(&self, role: Role) -> Result<Vec<Profile>, SupabaseError> {
        let table = self.tables.for_role(role);
        let status_filter = format!("eq.{}", role.eligible_status());
        let mut rows = Vec::new();

        loop {
            let page = self
                .select_rows(
                    table,
                    &[
                        ("status", status_filter.clone()),
                        ("order", "id.asc".to_string()),
                        ("offset", rows.len().to_string()),
                        ("limit", self.page_size.to_string()),
                    ],
                )
                .await?;

            let page_len = page.rows.len();
            rows.extend(page.rows);

            let done = match page.total {
                Some(total) => page_len == 0 || rows.len() >= total,
                None => page_len < self.page_size,
            };
            if done {
                break;
            }
        }

        let total = rows.len();

        let profiles: Vec<Profile> = rows
            .into_iter()
            .filter_map(|row| {
                let parsed = match role {
                    Role::Startup => parse_row::<StartupProfile>(row).map(Profile::Startup),
                    Role::Investor => parse_row::<InvestorProfile>(row).map(Profile::Investor),
                };
                parsed
                    .map_err(|e| tracing::warn!("Skipping malformed {} row: {}", role, e))
                    .ok()
            })
            .collect();

        tracing::debug!("Queried {} {} candidates (rows: {})", profiles.len(), role, total);

        Ok(profiles)
    }
}

/// Total row count from a `Content-Range` value such as `0-999/2500`; `*` means unknown
fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn parse_row<T: DeserializeOwned>(row: Value) -> Result<T, SupabaseError> {
    serde_json::from_value(row)
        .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse profile: {}", e)))
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn find_own_profile(&self, user_id: &str, role: Role) -> Result<Option<Profile>, StoreError> {
        Ok(self.get_profile(user_id, role).await?)
    }

    async fn find_active_candidates(&self, role: Role) -> Result<Vec<Profile>, StoreError> {
        Ok(self.query_candidates(role).await?)
    }
}
