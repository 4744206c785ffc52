use assigner_errors::{AssignerError, AssignerResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assigner_domain::entities::{Assignment, Participant, StaffTask, TaskCategory};
use assigner_domain::value_objects::TimeFrame;

/// 后端统一响应包装
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 解开包装；`success=false` 或缺少 data 均视为后端错误
    pub fn into_data(self) -> AssignerResult<T> {
        if !self.success {
            return Err(AssignerError::Internal(
                self.message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            AssignerError::Serialization("response envelope missing data".to_string())
        })
    }
}

/// 任务的线上格式（camelCase，时间为RFC3339）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub account_id: String,
    pub expected_started_at: DateTime<Utc>,
    pub expected_finished_at: DateTime<Utc>,
    pub title: String,
    pub code: String,
    pub task_type: TaskCategory,
}

impl TryFrom<TaskDto> for StaffTask {
    type Error = AssignerError;

    fn try_from(dto: TaskDto) -> AssignerResult<Self> {
        let time_frame = TimeFrame::new(dto.expected_started_at, dto.expected_finished_at)?;
        Ok(StaffTask {
            id: dto.id,
            resource_id: dto.account_id,
            time_frame,
            title: dto.title,
            code: dto.code,
            category: dto.task_type,
            is_draft: false,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

impl From<ParticipantDto> for Participant {
    fn from(dto: ParticipantDto) -> Self {
        Participant {
            account_id: dto.account_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            avatar_url: dto.avatar_url,
        }
    }
}

/// 指派结果的提交格式
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPayload {
    pub staff_id: String,
    pub time_frame: TimeFramePayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFramePayload {
    pub expected_started_at: DateTime<Utc>,
    pub expected_finished_at: DateTime<Utc>,
}

impl From<Assignment> for AssignmentPayload {
    fn from(assignment: Assignment) -> Self {
        Self {
            staff_id: assignment.staff_id,
            time_frame: TimeFramePayload {
                expected_started_at: assignment.time_frame.start,
                expected_finished_at: assignment.time_frame.end,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_dto_decodes_and_converts() {
        let json = r#"{
            "id": "task-7",
            "accountId": "acc-17",
            "expectedStartedAt": "2026-03-02T09:00:00Z",
            "expectedFinishedAt": "2026-03-02T10:00:00Z",
            "title": "Nguyen Anh - Import",
            "code": "IMP-1A2B3C4D",
            "taskType": "IMPORT"
        }"#;

        let dto: TaskDto = serde_json::from_str(json).unwrap();
        let task = StaffTask::try_from(dto).unwrap();

        assert_eq!(task.id, "task-7");
        assert_eq!(task.resource_id, "acc-17");
        assert_eq!(task.time_frame.duration_minutes(), 60);
        assert_eq!(task.category, TaskCategory::Import);
        assert!(!task.is_draft);
    }

    #[test]
    fn test_task_dto_with_inverted_frame_is_rejected() {
        let json = r#"{
            "id": "task-8",
            "accountId": "acc-17",
            "expectedStartedAt": "2026-03-02T10:00:00Z",
            "expectedFinishedAt": "2026-03-02T09:00:00Z",
            "title": "Nguyen Anh - Import",
            "code": "IMP-1A2B3C4D",
            "taskType": "IMPORT"
        }"#;

        let dto: TaskDto = serde_json::from_str(json).unwrap();
        assert!(StaffTask::try_from(dto).is_err());
    }

    #[test]
    fn test_participant_dto_decodes() {
        let json = r#"{
            "accountId": "acc-17",
            "firstName": "Nguyen",
            "lastName": "Anh",
            "avatarUrl": null
        }"#;

        let dto: ParticipantDto = serde_json::from_str(json).unwrap();
        let participant = Participant::from(dto);
        assert_eq!(participant.display_name(), "Nguyen Anh");
    }

    #[test]
    fn test_envelope_success_unwraps_data() {
        let json = r#"{ "success": true, "data": [1, 2, 3], "message": null }"#;
        let envelope: ApiEnvelope<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_failure_becomes_error() {
        let json = r#"{ "success": false, "data": null, "message": "role not found" }"#;
        let envelope: ApiEnvelope<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(envelope.into_data().is_err());

        let json = r#"{ "success": true, "data": null, "message": null }"#;
        let envelope: ApiEnvelope<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_data(),
            Err(AssignerError::Serialization(_))
        ));
    }

    #[test]
    fn test_assignment_payload_uses_backend_field_names() {
        let assignment = Assignment {
            staff_id: "acc-17".to_string(),
            time_frame: TimeFrame::new(
                "2026-03-02T09:00:00Z".parse().unwrap(),
                "2026-03-02T10:00:00Z".parse().unwrap(),
            )
            .unwrap(),
        };

        let payload = AssignmentPayload::from(assignment);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"staffId\":\"acc-17\""));
        assert!(json.contains("\"expectedStartedAt\""));
        assert!(json.contains("\"expectedFinishedAt\""));
    }
}
