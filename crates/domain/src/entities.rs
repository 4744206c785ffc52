use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::TimeFrame;

/// 日历上的人员任务（已持久化的或本地草稿）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffTask {
    pub id: String,
    /// 任务绑定的人员账号
    pub resource_id: String,
    pub time_frame: TimeFrame,
    pub title: String,
    pub code: String,
    pub category: TaskCategory,
    pub is_draft: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskCategory {
    #[serde(rename = "IMPORT")]
    Import,
    #[serde(rename = "EXPORT")]
    Export,
    #[serde(rename = "STOCKTAKE")]
    Stocktake,
    #[serde(rename = "INSPECTION")]
    Inspection,
}

impl TaskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Import => "Import",
            TaskCategory::Export => "Export",
            TaskCategory::Stocktake => "Stocktaking",
            TaskCategory::Inspection => "Inspection",
        }
    }
    pub fn code_prefix(&self) -> &'static str {
        match self {
            TaskCategory::Import => "IMP",
            TaskCategory::Export => "EXP",
            TaskCategory::Stocktake => "STK",
            TaskCategory::Inspection => "INS",
        }
    }
}

impl StaffTask {
    /// 由选中的时间段创建本地草稿，id 与 code 在本地生成
    pub fn new_draft(
        resource_id: String,
        time_frame: TimeFrame,
        title: String,
        category: TaskCategory,
    ) -> Self {
        Self {
            id: format!("draft-{}", Uuid::new_v4()),
            resource_id,
            time_frame,
            title,
            code: generate_task_code(category),
            category,
            is_draft: true,
        }
    }

    /// 后端确认持久化后，草稿转正
    pub fn promoted(mut self) -> Self {
        self.is_draft = false;
        self
    }

    pub fn entity_description(&self) -> String {
        format!(
            "任务 '{}' (编号: {}, 人员: {})",
            self.title, self.code, self.resource_id
        )
    }
}

/// 生成人类可读的任务编号，例如 IMP-1A2B3C4D
pub fn generate_task_code(category: TaskCategory) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        category.code_prefix(),
        suffix[..8].to_uppercase()
    )
}

/// 可被指派任务的人员
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

impl Participant {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 确认后向上层工作流上报的指派结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub staff_id: String,
    pub time_frame: TimeFrame,
}

/// 人员类别，用于限定任务与名册的拉取范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    WarehouseStaff,
    InspectionDepartment,
    Other(String),
}

impl Role {
    pub fn as_slug(&self) -> &str {
        match self {
            Role::WarehouseStaff => "warehouse-staff",
            Role::InspectionDepartment => "inspection-department",
            Role::Other(slug) => slug,
        }
    }
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "warehouse-staff" => Role::WarehouseStaff,
            "inspection-department" => Role::InspectionDepartment,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(slug: String) -> Self {
        Role::from_slug(&slug)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_slug().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn frame() -> TimeFrame {
        TimeFrame::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_draft_is_marked_and_coded() {
        let draft = StaffTask::new_draft(
            "acc-1".to_string(),
            frame(),
            "Nguyen Anh - Import".to_string(),
            TaskCategory::Import,
        );
        assert!(draft.is_draft);
        assert!(draft.id.starts_with("draft-"));
        assert!(draft.code.starts_with("IMP-"));
        assert_eq!(draft.code.len(), "IMP-".len() + 8);
    }

    #[test]
    fn test_promoted_clears_draft_flag() {
        let draft = StaffTask::new_draft(
            "acc-1".to_string(),
            frame(),
            "Tran Binh - Export".to_string(),
            TaskCategory::Export,
        );
        let persisted = draft.promoted();
        assert!(!persisted.is_draft);
    }

    #[test]
    fn test_entity_description_names_title_code_and_resource() {
        let draft = StaffTask::new_draft(
            "acc-7".to_string(),
            frame(),
            "Le Chi - Stocktaking".to_string(),
            TaskCategory::Stocktake,
        );
        let description = draft.entity_description();
        assert!(description.contains("Le Chi - Stocktaking"));
        assert!(description.contains(&draft.code));
        assert!(description.contains("acc-7"));
    }

    #[test]
    fn test_participant_display_name() {
        let participant = Participant {
            account_id: "acc-1".to_string(),
            first_name: "Nguyen".to_string(),
            last_name: "Anh".to_string(),
            avatar_url: None,
        };
        assert_eq!(participant.display_name(), "Nguyen Anh");
    }

    #[test]
    fn test_role_slug_round_trip() {
        assert_eq!(Role::WarehouseStaff.as_slug(), "warehouse-staff");
        assert_eq!(
            Role::from_slug("inspection-department"),
            Role::InspectionDepartment
        );
        assert_eq!(
            Role::from_slug("quality-control"),
            Role::Other("quality-control".to_string())
        );
    }

    #[test]
    fn test_assignment_serializes_camel_case() {
        let assignment = Assignment {
            staff_id: "acc-1".to_string(),
            time_frame: frame(),
        };
        let json = serde_json::to_string(&assignment).unwrap();
        assert!(json.contains("\"staffId\""));
        assert!(json.contains("\"timeFrame\""));
    }
}
