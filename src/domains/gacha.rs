// 寻访记录领域管理器
//
// 负责从上游分页拉取寻访记录、写入本地数据库，以及读取历史记录
// 拉取与写入并行：每拉到一页就交给写入任务，继续请求下一页

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::event_bus::{AppEvent, EventBus};
use crate::hypergryph::GachaApi;
use crate::models::{Gacha, GachaRecord};
use crate::storage::Database;

/// 写入队列长度（页）
const WRITE_QUEUE_SIZE: usize = 16;

/// 一次同步的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub sync_id: Uuid,
    /// 请求的页数
    pub pages: u32,
    /// 写入的记录条数
    pub written: usize,
}

/// 寻访记录领域管理器
pub struct GachaDomain {
    db: Arc<Database>,
    event_bus: Arc<EventBus>,
}

impl GachaDomain {
    /// 创建新的寻访记录领域管理器
    pub fn new(db: Arc<Database>, event_bus: Arc<EventBus>) -> Self {
        Self { db, event_bus }
    }

    /// 获取数据库
    pub fn get_db(&self) -> &Arc<Database> {
        &self.db
    }

    /// 从上游同步寻访记录
    ///
    /// `incremental` 为 true 时，拉到上次完整同步的水位即停止翻页。
    /// 只有成功完成的同步才会推进水位，中途失败后下次会重新拉取全部页
    pub async fn sync(&self, api: &dyn GachaApi, token: &str, incremental: bool) -> Result<SyncReport> {
        let sync_id = Uuid::new_v4();
        info!("开始同步寻访记录: {}", sync_id);
        self.event_bus.publish(AppEvent::SyncStarted { sync_id });

        match self.run_sync(sync_id, api, token, incremental).await {
            Ok(report) => {
                info!(
                    "同步完成: {} 页, 写入 {} 条记录 ({})",
                    report.pages, report.written, sync_id
                );
                self.event_bus.publish(AppEvent::SyncCompleted {
                    sync_id,
                    written: report.written,
                });
                Ok(report)
            }
            Err(e) => {
                error!("同步失败 ({}): {}", sync_id, e);
                self.event_bus.publish(AppEvent::SyncFailed {
                    sync_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run_sync(
        &self,
        sync_id: Uuid,
        api: &dyn GachaApi,
        token: &str,
        incremental: bool,
    ) -> Result<SyncReport> {
        let stop_at = if incremental {
            self.db.sync_watermark().await?
        } else {
            None
        };

        let (sender, mut receiver) = mpsc::channel::<Vec<GachaRecord>>(WRITE_QUEUE_SIZE);

        let db = self.db.clone();
        let writer = tokio::spawn(async move {
            let mut written = 0;
            while let Some(records) = receiver.recv().await {
                written += db.upsert_records(&records).await?;
            }
            Ok::<usize, anyhow::Error>(written)
        });

        let fetched = self
            .fetch_pages(sync_id, api, token, stop_at, &sender)
            .await;
        drop(sender);

        // 写入错误优先于"通道已关闭"之类的拉取错误
        let written = writer
            .await
            .map_err(|e| anyhow!("写入任务异常退出: {}", e))??;
        let pages = fetched?;

        if let Some(latest) = self.db.latest_timestamp().await? {
            self.db.set_sync_watermark(latest).await?;
        }

        Ok(SyncReport {
            sync_id,
            pages,
            written,
        })
    }

    /// 逐页拉取，返回请求的页数
    async fn fetch_pages(
        &self,
        sync_id: Uuid,
        api: &dyn GachaApi,
        token: &str,
        stop_at: Option<i64>,
        sender: &mpsc::Sender<Vec<GachaRecord>>,
    ) -> Result<u32> {
        let mut page = 1;
        let mut total_pages: Option<u32> = None;

        loop {
            let gacha_page = api.fetch_gacha_page(token, page).await?;
            let total = *total_pages.get_or_insert(gacha_page.pagination.total_pages());
            let current = gacha_page.pagination.current;

            self.event_bus.publish(AppEvent::SyncPageFetched {
                sync_id,
                page,
                total_pages: total,
            });

            let reached_known = stop_at.is_some_and(|latest| {
                gacha_page
                    .list
                    .iter()
                    .any(|record| record.timestamp <= latest)
            });
            let is_empty = gacha_page.list.is_empty();

            if !is_empty {
                sender
                    .send(gacha_page.list)
                    .await
                    .map_err(|_| anyhow!("写入通道已关闭"))?;
            }

            if is_empty || reached_known || current >= total || page >= total {
                return Ok(page);
            }
            page += 1;
        }
    }

    /// 本地保存的全部抽取（记录按时间倒序，十连内保持原顺序）
    pub async fn all_draws(&self) -> Result<Vec<Gacha>> {
        let records = self.db.get_all_records().await?;
        Ok(records.into_iter().flat_map(GachaRecord::into_draws).collect())
    }

    /// 本地保存的某个卡池的抽取
    pub async fn draws_in_pool(&self, pool: &str) -> Result<Vec<Gacha>> {
        let records = self.db.get_records_in_pool(pool).await?;
        Ok(records.into_iter().flat_map(GachaRecord::into_draws).collect())
    }
}
