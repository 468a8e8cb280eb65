//! REST backend boundary
//!
//! The backend is a black box returning JSON; these are the only
//! operations this core consumes. The `assign` wire format carries an
//! explicit `"unassigned"` sentinel where memory uses `Option`.

use crate::auth::team::TeamSlug;
use crate::config::BackendConfig;
use crate::pipeline::lead::{Employee, EmployeeId, Lead, LeadId};
use crate::utils::error::{CrmError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Wire sentinel for the unassigned state.
pub const UNASSIGNED_SENTINEL: &str = "unassigned";

/// A lead as the backend returns it: the in-memory [`Lead`] plus the
/// stage slug the board will bucket it under.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeadRecord {
    /// Lead identifier
    pub id: LeadId,
    /// Company name
    #[serde(default)]
    pub company: String,
    /// Contact person
    #[serde(default)]
    pub contact: String,
    /// Deal value
    #[serde(default)]
    pub value: Option<f64>,
    /// Stage slug
    pub stage: String,
    /// Assigned employee, if any
    #[serde(default)]
    pub assigned_employee_id: Option<EmployeeId>,
}

impl From<LeadRecord> for Lead {
    fn from(record: LeadRecord) -> Self {
        Self {
            id: record.id,
            company: record.company,
            contact: record.contact,
            value: record.value,
            assigned_employee_id: record.assigned_employee_id,
        }
    }
}

/// Operations this core consumes from the REST backend.
#[async_trait]
pub trait LeadBackend: Send + Sync {
    /// Fetch the leads visible to a team view.
    async fn fetch_leads(&self, team: TeamSlug) -> Result<Vec<LeadRecord>>;

    /// Fetch the employees of a team (assignment targets).
    async fn fetch_employees(&self, team: TeamSlug) -> Result<Vec<Employee>>;

    /// Mutate a lead's assignment; `None` unassigns.
    async fn assign(&self, lead_id: LeadId, assignee: Option<EmployeeId>) -> Result<()>;

    /// Mutate a lead's pipeline stage. `reason` is mandatory and
    /// human-authored.
    async fn change_stage(&self, lead_id: LeadId, stage: &str, reason: &str) -> Result<()>;

    /// Move a lead back to the earlier named stage. `reason` is mandatory.
    async fn revert(&self, lead_id: LeadId, reason: &str) -> Result<()>;
}

#[derive(Serialize)]
struct AssignRequest<'a> {
    assignee: &'a str,
}

#[derive(Serialize)]
struct StageChangeRequest<'a> {
    stage: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct RevertRequest<'a> {
    reason: &'a str,
}

/// Production backend client.
pub struct HttpLeadBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLeadBackend {
    /// Build a client from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout));

        if let Some(token) = &config.bearer_token {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| CrmError::Config(format!("Invalid backend bearer token: {}", e)))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn expect_success(response: reqwest::Response, operation: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(CrmError::backend(format!(
            "{} rejected with {}: {}",
            operation, status, body
        )))
    }
}

#[async_trait]
impl LeadBackend for HttpLeadBackend {
    async fn fetch_leads(&self, team: TeamSlug) -> Result<Vec<LeadRecord>> {
        debug!(team = %team, "fetching leads");
        let response = self
            .client
            .get(self.url(&format!("/teams/{}/leads", team)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_employees(&self, team: TeamSlug) -> Result<Vec<Employee>> {
        debug!(team = %team, "fetching employees");
        let response = self
            .client
            .get(self.url(&format!("/teams/{}/employees", team)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn assign(&self, lead_id: LeadId, assignee: Option<EmployeeId>) -> Result<()> {
        let assignee_value = assignee
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNASSIGNED_SENTINEL.to_string());
        debug!(lead = %lead_id, assignee = %assignee_value, "assigning lead");

        let response = self
            .client
            .post(self.url(&format!("/leads/{}/assign", lead_id)))
            .json(&AssignRequest {
                assignee: &assignee_value,
            })
            .send()
            .await?;
        Self::expect_success(response, "assign").await
    }

    async fn change_stage(&self, lead_id: LeadId, stage: &str, reason: &str) -> Result<()> {
        debug!(lead = %lead_id, stage = %stage, "changing lead stage");
        let response = self
            .client
            .post(self.url(&format!("/leads/{}/stage", lead_id)))
            .json(&StageChangeRequest { stage, reason })
            .send()
            .await?;
        Self::expect_success(response, "changeStage").await
    }

    async fn revert(&self, lead_id: LeadId, reason: &str) -> Result<()> {
        debug!(lead = %lead_id, "reverting lead stage");
        let response = self
            .client
            .post(self.url(&format!("/leads/{}/revert", lead_id)))
            .json(&RevertRequest { reason })
            .send()
            .await?;
        Self::expect_success(response, "revert").await
    }
}
