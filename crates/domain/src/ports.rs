use async_trait::async_trait;

use assigner_errors::AssignerResult;

use crate::entities::{Assignment, Participant, Role, StaffTask};

/// 按人员类别拉取现有任务与可指派名册的端口，由HTTP客户端实现
#[async_trait]
pub trait RosterFetcher: Send + Sync {
    async fn fetch_tasks(&self, role: &Role) -> AssignerResult<Vec<StaffTask>>;
    async fn fetch_participants(&self, role: &Role) -> AssignerResult<Vec<Participant>>;
}

/// 指派结果的上报端口，每次成功确认恰好调用一次。
/// 持久化及其失败提示由上层工作流负责。
#[async_trait]
pub trait AssignmentSink: Send + Sync {
    async fn emit(&self, assignment: Assignment) -> AssignerResult<()>;
}
