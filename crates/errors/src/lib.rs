use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignerError {
    #[error("无效的时间区间: 开始 {start} 不早于结束 {end}")]
    InvalidTimeFrame { start: String, end: String },
    #[error("所选时间段早于当前时间")]
    PastDatedSlot,
    #[error("前置任务尚未结束，任务不能早于 {finished_at} 开始")]
    PrerequisiteOrdering { finished_at: String },
    #[error("人员 {resource_id} 在所选时间段已有任务安排")]
    SlotUnavailable { resource_id: String },
    #[error("当前没有待确认的任务草稿")]
    NoActiveDraft,
    #[error("人员名册尚未加载完成")]
    RosterNotLoaded,
    #[error("人员未找到: {account_id}")]
    ParticipantNotFound { account_id: String },
    #[error("网络错误: {0}")]
    Network(String),
    #[error("后端请求失败: HTTP {status} - {body}")]
    Http { status: u16, body: String },
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type AssignerResult<T> = Result<T, AssignerError>;

impl AssignerError {
    pub fn invalid_time_frame<S: ToString>(start: S, end: S) -> Self {
        Self::InvalidTimeFrame {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
    pub fn slot_unavailable<S: Into<String>>(resource_id: S) -> Self {
        Self::SlotUnavailable {
            resource_id: resource_id.into(),
        }
    }
    pub fn participant_not_found<S: Into<String>>(account_id: S) -> Self {
        Self::ParticipantNotFound {
            account_id: account_id.into(),
        }
    }
    pub fn network_error<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// 校验类错误在本地恢复：草稿保持原样，对话框继续可用
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AssignerError::InvalidTimeFrame { .. }
                | AssignerError::PastDatedSlot
                | AssignerError::PrerequisiteOrdering { .. }
                | AssignerError::SlotUnavailable { .. }
                | AssignerError::NoActiveDraft
                | AssignerError::RosterNotLoaded
        )
    }
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssignerError::Network(_) | AssignerError::Http { .. }
        )
    }
    pub fn user_message(&self) -> &str {
        match self {
            AssignerError::PastDatedSlot => "不能安排早于当前时间的任务",
            AssignerError::PrerequisiteOrdering { .. } => "任务必须在前置任务结束之后开始",
            AssignerError::SlotUnavailable { .. } => "该人员在所选时间段已被占用",
            AssignerError::InvalidTimeFrame { .. } => "任务结束时间必须晚于开始时间",
            AssignerError::NoActiveDraft => "没有待确认的任务",
            AssignerError::RosterNotLoaded => "人员名册加载中，请稍后重试",
            AssignerError::ParticipantNotFound { .. } => "所选人员不在当前名册中",
            AssignerError::Network(_) | AssignerError::Http { .. } => "网络繁忙，请稍后重试",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<serde_json::Error> for AssignerError {
    fn from(err: serde_json::Error) -> Self {
        AssignerError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for AssignerError {
    fn from(err: anyhow::Error) -> Self {
        AssignerError::Internal(err.to_string())
    }
}
