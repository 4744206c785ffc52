use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use assigner_domain::entities::{Assignment, Participant, Role, StaffTask};
use assigner_domain::ports::{AssignmentSink, RosterFetcher};
use assigner_errors::{AssignerError, AssignerResult};

use crate::dto::{ApiEnvelope, AssignmentPayload, ParticipantDto, TaskDto};

/// 仓库后端的HTTP客户端，负责拉取任务与人员名册
pub struct BackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> AssignerResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AssignerError::Internal(format!("HTTP client build error: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn tasks_url(&self, role: &Role) -> String {
        format!("{}/api/v1/roles/{}/tasks", self.base_url, role.as_slug())
    }

    fn participants_url(&self, role: &Role) -> String {
        format!(
            "{}/api/v1/roles/{}/participants",
            self.base_url,
            role.as_slug()
        )
    }

    fn assignments_url(&self, role: &Role) -> String {
        format!(
            "{}/api/v1/roles/{}/assignments",
            self.base_url,
            role.as_slug()
        )
    }

    async fn get_envelope<T>(&self, url: &str) -> AssignerResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AssignerError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned HTTP {} for {}", status, url);
            return Err(AssignerError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AssignerError::Serialization(format!("decoding {url}: {e}")))?;
        envelope.into_data()
    }

    /// 向后端提交确认的指派，供上层工作流持久化时使用
    pub async fn submit_assignment(
        &self,
        role: &Role,
        assignment: Assignment,
    ) -> AssignerResult<()> {
        let url = self.assignments_url(role);
        let payload = AssignmentPayload::from(assignment);

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AssignerError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssignerError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Assignment submitted to {}", url);
        Ok(())
    }
}

#[async_trait]
impl RosterFetcher for BackendClient {
    async fn fetch_tasks(&self, role: &Role) -> AssignerResult<Vec<StaffTask>> {
        let url = self.tasks_url(role);
        let records: Vec<TaskDto> = self.get_envelope(&url).await?;
        let total = records.len();

        // 逐条校验，时间区间非法的记录跳过而不是让整次拉取失败
        let mut tasks = Vec::with_capacity(total);
        for record in records {
            let record_id = record.id.clone();
            match StaffTask::try_from(record) {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("Dropping task record {} from {}: {}", record_id, url, e),
            }
        }

        debug!("Fetched {}/{} valid tasks for role {}", tasks.len(), total, role);
        Ok(tasks)
    }

    async fn fetch_participants(&self, role: &Role) -> AssignerResult<Vec<Participant>> {
        let url = self.participants_url(role);
        let records: Vec<ParticipantDto> = self.get_envelope(&url).await?;
        let participants: Vec<Participant> =
            records.into_iter().map(Participant::from).collect();

        debug!(
            "Fetched {} participants for role {}",
            participants.len(),
            role
        );
        Ok(participants)
    }
}

/// 通过后端持久化指派结果的 `AssignmentSink` 实现
pub struct BackendAssignmentSink {
    client: std::sync::Arc<BackendClient>,
    role: Role,
}

impl BackendAssignmentSink {
    pub fn new(client: std::sync::Arc<BackendClient>, role: Role) -> Self {
        Self { client, role }
    }
}

#[async_trait]
impl AssignmentSink for BackendAssignmentSink {
    async fn emit(&self, assignment: Assignment) -> AssignerResult<()> {
        self.client.submit_assignment(&self.role, assignment).await
    }
}
