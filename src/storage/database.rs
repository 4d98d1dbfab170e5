// 数据库操作模块 - 寻访记录的 SQLite 持久化

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::models::{Character, GachaRecord};

/// 数据库文件名
pub const DB_FILE: &str = "gachadb";

const SYNC_WATERMARK_KEY: &str = "completed_sync_ts";

/// 数据库管理器
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 创建新的数据库连接
    pub async fn new(db_path: &Path) -> Result<Self> {
        info!("初始化数据库: {:?}", db_path);

        // 确保数据库文件的目录存在
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .idle_timeout(Duration::from_secs(300)) // 5分钟空闲超时
            .acquire_timeout(Duration::from_secs(30)) // 30秒获取超时
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.initialize_tables().await?;

        Ok(db)
    }

    /// 初始化数据库表
    async fn initialize_tables(&self) -> Result<()> {
        // 以时间戳为主键，重复拉取同一条记录时直接覆盖
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gacha (
                ts INTEGER NOT NULL PRIMARY KEY,
                pool TEXT NOT NULL,
                chars TEXT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_gacha_pool ON gacha(pool)")
            .execute(&self.pool)
            .await?;

        // 同步状态，目前只有上次完整同步的水位
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sync_state (
                key TEXT NOT NULL PRIMARY KEY,
                value INTEGER NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        info!("数据库表初始化完成");
        Ok(())
    }

    /// 批量写入寻访记录（已存在的时间戳会被覆盖）
    pub async fn upsert_records(&self, records: &[GachaRecord]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            let chars = serde_json::to_string(&record.chars)?;
            sqlx::query("REPLACE INTO gacha (ts, pool, chars) VALUES (?1, ?2, ?3)")
                .bind(record.timestamp)
                .bind(&record.pool)
                .bind(chars)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(records.len())
    }

    /// 获取全部记录（时间倒序）
    pub async fn get_all_records(&self) -> Result<Vec<GachaRecord>> {
        let rows = sqlx::query("SELECT ts, pool, chars FROM gacha ORDER BY ts DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_record).collect()
    }

    /// 获取指定卡池的记录（时间倒序）
    pub async fn get_records_in_pool(&self, pool: &str) -> Result<Vec<GachaRecord>> {
        let rows = sqlx::query("SELECT ts, pool, chars FROM gacha WHERE pool = ?1 ORDER BY ts DESC")
            .bind(pool)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_record).collect()
    }

    /// 最新一条记录的时间戳
    pub async fn latest_timestamp(&self) -> Result<Option<i64>> {
        let latest: Option<i64> = sqlx::query_scalar("SELECT MAX(ts) FROM gacha")
            .fetch_one(&self.pool)
            .await?;
        Ok(latest)
    }

    /// 上次成功完成的同步写入时的最新时间戳
    ///
    /// 失败的同步不会更新水位，增量同步只信任这个值
    pub async fn sync_watermark(&self) -> Result<Option<i64>> {
        let watermark: Option<i64> =
            sqlx::query_scalar("SELECT value FROM sync_state WHERE key = ?1")
                .bind(SYNC_WATERMARK_KEY)
                .fetch_optional(&self.pool)
                .await?;
        Ok(watermark)
    }

    pub async fn set_sync_watermark(&self, timestamp: i64) -> Result<()> {
        sqlx::query("REPLACE INTO sync_state (key, value) VALUES (?1, ?2)")
            .bind(SYNC_WATERMARK_KEY)
            .bind(timestamp)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 记录条数（一条记录可能包含十连的多个干员）
    pub async fn count_records(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gacha")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_record(row: &SqliteRow) -> Result<GachaRecord> {
    let timestamp: i64 = row.try_get("ts")?;
    let chars: String = row.try_get("chars")?;
    let chars: Vec<Character> = serde_json::from_str(&chars)
        .with_context(|| format!("解析寻访记录失败 (ts={})", timestamp))?;

    Ok(GachaRecord {
        timestamp,
        pool: row.try_get("pool")?,
        chars,
    })
}
