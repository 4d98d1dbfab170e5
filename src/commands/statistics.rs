//! 统计命令

use tracing::info;

use crate::models::{Gacha, Statistics};
use crate::statistics;

/// 计算统计数据，`pool` 为空时统计全部卡池
pub fn calculate_statistics(gacha: Vec<Gacha>, pool: Option<String>) -> Result<Statistics, String> {
    info!(
        "计算统计: {} 次抽取, 卡池: {}",
        gacha.len(),
        pool.as_deref().unwrap_or("全部")
    );
    let stats =
        statistics::calculate_statistics(&gacha, pool.as_deref()).map_err(|e| e.to_string())?;
    info!("统计完成: 计入 {} 次抽取", stats.total());
    Ok(stats)
}
