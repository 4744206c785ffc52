//! 仓库人员任务指派调度器
//!
//! 面向服装制造仓库场景的排班组件：经理在按人员划分的日历上框选时间段、
//! 指派人员并在本地完成双重预订校验，确认后的指派结果上报给上层工作流持久化。
//!
//! - `assigner-domain`: 实体、时间区间与可用性检查等纯领域逻辑
//! - `assigner-client`: 仓库后端的HTTP客户端
//! - `assigner-application`: 指派会话状态机与可取消的名册加载

pub mod config;
pub mod logging;

pub use assigner_application::{
    AssignmentSession, RosterLoader, RosterSnapshot, SessionState, SlotSelection,
};
pub use assigner_client::{BackendAssignmentSink, BackendClient};
pub use assigner_domain::{
    Assignment, AvailabilityService, Participant, PrerequisiteConstraint, Role, StaffTask,
    TaskCategory, TimeFrame,
};
pub use assigner_errors::{AssignerError, AssignerResult};

pub use config::{ApiConfig, AppConfig, LogConfig};
pub use logging::init_logging;
