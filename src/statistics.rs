// 统计模块 - 按星级、卡池、月份汇总寻访记录，并计算保底水位

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Datelike};

use crate::models::{
    Gacha, PoolStatistics, Statistics, TotalStatistics, MIN_RARITY, STAR_TIERS, TOP_RARITY,
};

/// 单次遍历累积的中间结果
#[derive(Default)]
struct Tally {
    stars_count: [u64; STAR_TIERS],
    /// 参与统计的卡池，按首次出现顺序
    pools: Vec<String>,
    pools_count: HashMap<String, u64>,
    /// 距离上一次最高稀有度的抽数
    water_place: HashMap<String, u64>,
    months_count: BTreeMap<(i32, u32), u64>,
}

impl Tally {
    fn record(&mut self, gacha: &Gacha) -> Result<()> {
        let rarity = gacha.character.rarity;
        if !(MIN_RARITY..=TOP_RARITY).contains(&rarity) {
            bail!(
                "无效的稀有度 {} ({} @ {})",
                rarity,
                gacha.character.name,
                gacha.timestamp
            );
        }
        self.stars_count[(rarity - MIN_RARITY) as usize] += 1;

        if !self.pools_count.contains_key(&gacha.pool) {
            self.pools.push(gacha.pool.clone());
        }
        *self.pools_count.entry(gacha.pool.clone()).or_insert(0) += 1;

        let water = self.water_place.entry(gacha.pool.clone()).or_insert(0);
        if rarity == TOP_RARITY {
            *water = 0;
        } else {
            *water += 1;
        }

        let date = DateTime::from_timestamp(gacha.timestamp, 0)
            .ok_or_else(|| anyhow!("无法解析时间戳: {}", gacha.timestamp))?;
        *self
            .months_count
            .entry((date.year(), date.month()))
            .or_insert(0) += 1;

        Ok(())
    }

    fn total(&self) -> u64 {
        self.stars_count.iter().sum()
    }

    fn stars_percentage(&self) -> [f64; STAR_TIERS] {
        let total = self.total();
        let mut percentage = [0.0; STAR_TIERS];
        if total == 0 {
            return percentage;
        }
        for (slot, count) in percentage.iter_mut().zip(self.stars_count.iter()) {
            *slot = *count as f64 / total as f64 * 100.0;
        }
        percentage
    }

    fn months(&self) -> (Vec<String>, Vec<u64>) {
        self.months_count
            .iter()
            .map(|((year, month), count)| (format!("{}-{}", year, month), *count))
            .unzip()
    }
}

/// 计算统计数据
///
/// `pool` 为 `None` 时返回全部卡池的 [`TotalStatistics`]，
/// 否则只统计该卡池并返回 [`PoolStatistics`]
pub fn calculate_statistics(gacha: &[Gacha], pool: Option<&str>) -> Result<Statistics> {
    let mut sorted: Vec<&Gacha> = gacha.iter().collect();
    // 稳定排序，同一时间戳（十连）保持原有顺序
    sorted.sort_by_key(|g| g.timestamp);

    let mut all_pools: Vec<String> = Vec::new();
    let mut tally = Tally::default();

    for gacha in sorted {
        if !all_pools.contains(&gacha.pool) {
            all_pools.push(gacha.pool.clone());
        }

        if let Some(pool) = pool {
            if gacha.pool != pool {
                continue;
            }
        }

        tally.record(gacha)?;
    }

    let total = tally.total();
    let stars_percentage = tally.stars_percentage();
    let (all_months, months_count) = tally.months();

    let statistics = match pool {
        None => Statistics::Total(TotalStatistics {
            total,
            stars_count: tally.stars_count,
            stars_percentage,
            all_pools,
            pools_count: tally.pools.iter().map(|p| tally.pools_count[p]).collect(),
            water_place: tally.pools.iter().map(|p| tally.water_place[p]).collect(),
            months_count,
            all_months,
        }),
        Some(pool) => Statistics::Pool(PoolStatistics {
            all_pools,
            pool_name: pool.to_string(),
            total,
            stars_count: tally.stars_count,
            stars_percentage,
            water_place: tally.water_place.get(pool).copied().unwrap_or(0),
            months_count,
            all_months,
        }),
    };

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Character;

    // 2023-11-14T22:13:20Z
    const NOV_2023: i64 = 1_700_000_000;
    // 2023-12-19T... 约一个月之后
    const DEC_2023: i64 = NOV_2023 + 35 * 24 * 3600;

    fn draw(timestamp: i64, pool: &str, rarity: u8) -> Gacha {
        Gacha {
            timestamp,
            pool: pool.to_string(),
            character: Character {
                name: format!("char-{}", rarity),
                rarity,
                is_new: false,
            },
        }
    }

    fn total_of(stats: Statistics) -> TotalStatistics {
        match stats {
            Statistics::Total(total) => total,
            Statistics::Pool(_) => panic!("期望全局统计"),
        }
    }

    fn pool_of(stats: Statistics) -> PoolStatistics {
        match stats {
            Statistics::Pool(pool) => pool,
            Statistics::Total(_) => panic!("期望卡池统计"),
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = total_of(calculate_statistics(&[], None).unwrap());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.stars_count, [0; 4]);
        assert_eq!(stats.stars_percentage, [0.0; 4]);
        assert!(stats.all_pools.is_empty());
        assert!(stats.pools_count.is_empty());
        assert!(stats.water_place.is_empty());
        assert!(stats.all_months.is_empty());
    }

    #[test]
    fn test_total_counts_and_percentages() {
        let gacha = vec![
            draw(NOV_2023, "A", 2),
            draw(NOV_2023 + 1, "A", 3),
            draw(NOV_2023 + 2, "B", 4),
            draw(NOV_2023 + 3, "A", 5),
        ];

        let stats = total_of(calculate_statistics(&gacha, None).unwrap());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.stars_count, [1, 1, 1, 1]);
        assert_eq!(stats.stars_percentage, [25.0; 4]);
        assert_eq!(stats.all_pools, vec!["A", "B"]);
        assert_eq!(stats.pools_count, vec![3, 1]);
    }

    #[test]
    fn test_water_place_resets_on_top_rarity() {
        // 输入为倒序，计算前应按时间排序
        let gacha = vec![
            draw(NOV_2023 + 5, "A", 2),
            draw(NOV_2023 + 4, "A", 3),
            draw(NOV_2023 + 3, "A", 5),
            draw(NOV_2023 + 2, "A", 2),
            draw(NOV_2023 + 1, "B", 2),
            draw(NOV_2023, "A", 2),
        ];

        let stats = total_of(calculate_statistics(&gacha, None).unwrap());
        assert_eq!(stats.all_pools, vec!["A", "B"]);
        assert_eq!(stats.water_place, vec![2, 1]);
    }

    #[test]
    fn test_top_rarity_last_gives_zero_water() {
        let gacha = vec![draw(NOV_2023, "A", 2), draw(NOV_2023 + 1, "A", 5)];
        let stats = total_of(calculate_statistics(&gacha, None).unwrap());
        assert_eq!(stats.water_place, vec![0]);
    }

    #[test]
    fn test_months_in_chronological_order() {
        let gacha = vec![
            draw(DEC_2023, "A", 2),
            draw(NOV_2023, "A", 2),
            draw(NOV_2023 + 60, "A", 3),
        ];

        let stats = total_of(calculate_statistics(&gacha, None).unwrap());
        assert_eq!(stats.all_months, vec!["2023-11", "2023-12"]);
        assert_eq!(stats.months_count, vec![2, 1]);
    }

    #[test]
    fn test_pool_statistics_filters_but_lists_all_pools() {
        let gacha = vec![
            draw(NOV_2023, "A", 2),
            draw(NOV_2023 + 1, "B", 5),
            draw(NOV_2023 + 2, "B", 3),
            draw(NOV_2023 + 3, "B", 3),
        ];

        let stats = pool_of(calculate_statistics(&gacha, Some("B")).unwrap());
        assert_eq!(stats.pool_name, "B");
        assert_eq!(stats.all_pools, vec!["A", "B"]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.stars_count, [0, 2, 0, 1]);
        assert_eq!(stats.water_place, 2);
    }

    #[test]
    fn test_unknown_pool_yields_empty_pool_statistics() {
        let gacha = vec![draw(NOV_2023, "A", 2)];

        let stats = pool_of(calculate_statistics(&gacha, Some("不存在")).unwrap());
        assert_eq!(stats.pool_name, "不存在");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.water_place, 0);
        assert_eq!(stats.stars_percentage, [0.0; 4]);
        assert_eq!(stats.all_pools, vec!["A"]);
    }

    #[test]
    fn test_pool_argument_never_yields_total_shape() {
        let stats = calculate_statistics(&[], Some("A")).unwrap();
        assert!(matches!(stats, Statistics::Pool(_)));
    }

    #[test]
    fn test_invalid_rarity_is_rejected() {
        let gacha = vec![draw(NOV_2023, "A", 6)];
        assert!(calculate_statistics(&gacha, None).is_err());

        let gacha = vec![draw(NOV_2023, "A", 1)];
        assert!(calculate_statistics(&gacha, None).is_err());
    }

    #[test]
    fn test_invalid_rarity_outside_filter_is_ignored() {
        let gacha = vec![draw(NOV_2023, "A", 9), draw(NOV_2023 + 1, "B", 2)];
        let stats = pool_of(calculate_statistics(&gacha, Some("B")).unwrap());
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let gacha = vec![draw(i64::MAX, "A", 2)];
        assert!(calculate_statistics(&gacha, None).is_err());
    }
}
