use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use assigner_domain::availability::AvailabilityService;
use assigner_domain::entities::{Assignment, Participant, StaffTask, TaskCategory};
use assigner_domain::ordering::PrerequisiteConstraint;
use assigner_domain::ports::AssignmentSink;
use assigner_domain::value_objects::TimeFrame;
use assigner_errors::{AssignerError, AssignerResult};

/// 用户在日历上框选出的原始时间段
#[derive(Debug, Clone)]
pub struct SlotSelection {
    pub resource_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 对话框打开时整体拉取的一份只读快照，每次打开整体替换
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub tasks: Vec<StaffTask>,
    pub participants: Vec<Participant>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 没有待确认草稿
    Idle,
    /// 用户已框选时间段，确认对话框打开中
    DraftPending,
}

/// 指派会话 - 单个指派对话框实例的状态机。
/// 负责把框选转成任务草稿、校验冲突，并在确认时上报指派结果。
pub struct AssignmentSession {
    category: TaskCategory,
    prerequisite: PrerequisiteConstraint,
    sink: Arc<dyn AssignmentSink>,
    snapshot: Option<RosterSnapshot>,
    /// 至多存在一个草稿，新的框选会替换旧草稿
    draft: Option<StaffTask>,
    /// 已确认、等待后端持久化回执的任务（分段提交）
    pending_commit: Option<StaffTask>,
}

impl AssignmentSession {
    pub fn new(
        category: TaskCategory,
        prerequisite: PrerequisiteConstraint,
        sink: Arc<dyn AssignmentSink>,
    ) -> Self {
        Self {
            category,
            prerequisite,
            sink,
            snapshot: None,
            draft: None,
            pending_commit: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.draft.is_some() {
            SessionState::DraftPending
        } else {
            SessionState::Idle
        }
    }

    pub fn draft(&self) -> Option<&StaffTask> {
        self.draft.as_ref()
    }

    pub fn snapshot(&self) -> Option<&RosterSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn pending_commit(&self) -> Option<&StaffTask> {
        self.pending_commit.as_ref()
    }

    /// 安装新拉取的快照，旧快照整体替换。
    /// 基于旧数据校验过的草稿不再可信，一并丢弃。
    pub fn install_snapshot(&mut self, snapshot: RosterSnapshot) {
        if self.draft.take().is_some() {
            debug!("Discarding stale draft on snapshot refresh");
        }
        info!(
            "Roster snapshot installed: {} tasks, {} participants",
            snapshot.tasks.len(),
            snapshot.participants.len()
        );
        self.snapshot = Some(snapshot);
    }

    /// 把框选转成任务草稿并打开确认对话框（idle -> draftPending）。
    /// 任何一条校验失败都不会改变会话状态。
    pub fn select_slot(
        &mut self,
        selection: SlotSelection,
        now: DateTime<Utc>,
    ) -> AssignerResult<&StaffTask> {
        let snapshot = self.snapshot.as_ref().ok_or(AssignerError::RosterNotLoaded)?;

        AvailabilityService::validate_interval(selection.start, selection.end)?;
        if selection.start < now {
            return Err(AssignerError::PastDatedSlot);
        }
        self.prerequisite.check(selection.start)?;

        let participant = snapshot
            .participants
            .iter()
            .find(|p| p.account_id == selection.resource_id)
            .ok_or_else(|| AssignerError::participant_not_found(&selection.resource_id))?;

        let booked: Vec<StaffTask> = self.booked_tasks().cloned().collect();
        if !AvailabilityService::is_available(
            &selection.resource_id,
            selection.start,
            selection.end,
            &booked,
        )? {
            return Err(AssignerError::slot_unavailable(&selection.resource_id));
        }

        let time_frame = TimeFrame::new(selection.start, selection.end)?;
        let title = format!("{} - {}", participant.display_name(), self.category.label());
        let draft = StaffTask::new_draft(
            selection.resource_id,
            time_frame,
            title,
            self.category,
        );

        if self.draft.is_some() {
            debug!("Replacing previous unconfirmed draft");
        }
        info!(
            "创建草稿：{}，时长 {} 分钟",
            draft.entity_description(),
            draft.time_frame.duration_minutes()
        );
        Ok(self.draft.insert(draft))
    }

    /// 调整草稿时长：重算结束时间并重新校验冲突。
    /// 校验失败时草稿保持原样，调用方提示用户后可以重试。
    pub fn set_duration(&mut self, minutes: i64) -> AssignerResult<&StaffTask> {
        let draft = self.draft.as_ref().ok_or(AssignerError::NoActiveDraft)?;
        let new_frame = draft.time_frame.with_duration_minutes(minutes)?;

        let resource_id = draft.resource_id.clone();
        let booked: Vec<StaffTask> = self.booked_tasks().cloned().collect();
        if !AvailabilityService::is_available(
            &resource_id,
            new_frame.start,
            new_frame.end,
            &booked,
        )? {
            warn!(
                "Duration change to {} minutes rejected: resource {} occupied",
                minutes, resource_id
            );
            return Err(AssignerError::slot_unavailable(resource_id));
        }

        let draft = self.draft.as_mut().ok_or(AssignerError::NoActiveDraft)?;
        draft.time_frame = new_frame;
        Ok(&*draft)
    }

    /// 确认草稿：查出完整的人员记录，恰好一次地上报指派结果，
    /// 然后回到 idle（draftPending -> confirmed -> idle）。
    /// 确认的任务进入待提交位，等待后端回执后才合入快照。
    pub async fn confirm(&mut self) -> AssignerResult<Assignment> {
        let draft = self.draft.as_ref().ok_or(AssignerError::NoActiveDraft)?;
        let snapshot = self.snapshot.as_ref().ok_or(AssignerError::RosterNotLoaded)?;

        let participant = snapshot
            .participants
            .iter()
            .find(|p| p.account_id == draft.resource_id)
            .ok_or_else(|| AssignerError::participant_not_found(&draft.resource_id))?;

        let assignment = Assignment {
            staff_id: participant.account_id.clone(),
            time_frame: draft.time_frame,
        };

        // 上报失败时草稿保留，对话框仍然可用
        self.sink.emit(assignment.clone()).await?;

        let confirmed = self.draft.take().ok_or(AssignerError::NoActiveDraft)?;
        info!("Assignment confirmed for staff {}", assignment.staff_id);
        self.pending_commit = Some(confirmed);
        Ok(assignment)
    }

    /// 丢弃草稿（draftPending -> idle）。没有草稿时是幂等空操作。
    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            debug!("Draft cancelled");
        }
    }

    /// 后端确认持久化后调用：任务转正并合入快照，
    /// 本会话后续的冲突检查会看到它。没有待提交任务时为空操作。
    pub fn commit_persisted(&mut self) {
        match self.pending_commit.take() {
            Some(task) => {
                let task = task.promoted();
                info!("{} 已持久化，合并进名册快照", task.entity_description());
                if let Some(snapshot) = self.snapshot.as_mut() {
                    snapshot.tasks.push(task);
                }
            }
            None => debug!("No pending task to commit"),
        }
    }

    /// 后端拒绝持久化时调用：丢弃待提交任务，本地状态与后端保持一致
    pub fn rollback_pending(&mut self) {
        if let Some(task) = self.pending_commit.take() {
            warn!("Rolling back unpersisted task {}", task.code);
        }
    }

    /// 冲突检查的依据：快照中的任务加上待后端回执的任务，
    /// 同一会话不会与自己在途的确认撞车
    fn booked_tasks(&self) -> impl Iterator<Item = &StaffTask> {
        self.snapshot
            .iter()
            .flat_map(|s| s.tasks.iter())
            .chain(self.pending_commit.iter())
    }
}
