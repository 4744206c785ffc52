use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use assigner_domain::entities::Role;
use assigner_domain::ports::RosterFetcher;
use assigner_errors::AssignerResult;

use crate::session::RosterSnapshot;

/// 名册加载器 - 对话框每次打开触发一次全新拉取（显式的缓存失效点）。
/// 拉取可被取消：对话框在拉取完成前关闭时，迟到的快照被丢弃而不是安装。
pub struct RosterLoader {
    fetcher: Arc<dyn RosterFetcher>,
    close_tx: broadcast::Sender<()>,
}

impl RosterLoader {
    pub fn new(fetcher: Arc<dyn RosterFetcher>) -> Self {
        let (close_tx, _) = broadcast::channel(4);
        Self { fetcher, close_tx }
    }

    /// 通知所有在途的拉取：对话框已关闭
    pub fn close(&self) {
        let receivers = self.close_tx.receiver_count();
        if receivers > 0 {
            debug!("Cancelling {} in-flight roster fetch(es)", receivers);
        }
        let _ = self.close_tx.send(());
    }

    /// 拉取任务列表与人员名册。返回 `Ok(None)` 表示拉取在完成前被取消，
    /// 调用方不应安装任何快照。
    pub async fn load(&self, role: &Role) -> AssignerResult<Option<RosterSnapshot>> {
        let mut close_rx = self.close_tx.subscribe();

        tokio::select! {
            _ = close_rx.recv() => {
                debug!("Roster fetch for role {} cancelled by dialog close", role);
                Ok(None)
            }
            result = self.fetch_snapshot(role) => match result {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    warn!("Roster fetch for role {} failed: {}", role, e);
                    Err(e)
                }
            }
        }
    }

    async fn fetch_snapshot(&self, role: &Role) -> AssignerResult<RosterSnapshot> {
        let (tasks, participants) = tokio::try_join!(
            self.fetcher.fetch_tasks(role),
            self.fetcher.fetch_participants(role)
        )?;

        info!(
            "Fetched roster for role {}: {} tasks, {} participants",
            role,
            tasks.len(),
            participants.len()
        );
        Ok(RosterSnapshot {
            tasks,
            participants,
            fetched_at: Utc::now(),
        })
    }
}
