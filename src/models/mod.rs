// 数据模型模块 - 定义前后端共享的数据结构

use serde::{Deserialize, Serialize};

/// 星级档位数量（3★ ~ 6★）
pub const STAR_TIERS: usize = 4;
/// 最低稀有度（3★ 在接口中为 2）
pub const MIN_RARITY: u8 = 2;
/// 最高稀有度（6★ 在接口中为 5），出现即重置保底计数
pub const TOP_RARITY: u8 = 5;

/// 用户登录凭据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    /// 手机号
    pub phone: String,
    /// 密码
    pub password: String,
}

/// 单次抽取得到的干员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// 稀有度，2~5 分别对应 3★~6★
    pub rarity: u8,
    /// 是否首次获得
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

/// 一次抽取事件（前端使用的扁平结构）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gacha {
    /// Unix 时间戳（秒）
    pub timestamp: i64,
    pub pool: String,
    pub character: Character,
}

/// 接口返回的一条寻访记录（单抽或十连）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaRecord {
    #[serde(rename = "ts")]
    pub timestamp: i64,
    pub pool: String,
    pub chars: Vec<Character>,
}

impl GachaRecord {
    /// 将一条记录拆分为逐次抽取，保持记录内顺序
    pub fn into_draws(self) -> Vec<Gacha> {
        let GachaRecord {
            timestamp,
            pool,
            chars,
        } = self;
        chars
            .into_iter()
            .map(|character| Gacha {
                timestamp,
                pool: pool.clone(),
                character,
            })
            .collect()
    }
}

/// 全部卡池的统计结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStatistics {
    pub total: u64,
    pub stars_count: [u64; STAR_TIERS],
    /// 0 ~ 100.00
    pub stars_percentage: [f64; STAR_TIERS],
    pub all_pools: Vec<String>,
    /// 与 `water_place` 一样按卡池首次出现的顺序排列
    pub pools_count: Vec<u64>,
    pub water_place: Vec<u64>,
    pub months_count: Vec<u64>,
    pub all_months: Vec<String>,
}

/// 单个卡池的统计结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
    pub all_pools: Vec<String>,
    pub pool_name: String,
    pub total: u64,
    pub stars_count: [u64; STAR_TIERS],
    pub stars_percentage: [f64; STAR_TIERS],
    pub water_place: u64,
    pub months_count: Vec<u64>,
    pub all_months: Vec<String>,
}

/// 统计结果：未指定卡池时为全局统计，否则为单卡池统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Statistics {
    Total(TotalStatistics),
    Pool(PoolStatistics),
}

impl Statistics {
    pub fn total(&self) -> u64 {
        match self {
            Statistics::Total(stats) => stats.total,
            Statistics::Pool(stats) => stats.total,
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// 是否将日志推送到前端
    pub enable_frontend_logging: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            enable_frontend_logging: true,
        }
    }
}

/// 配置更新请求（所有字段可选，只更新提供的部分）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 登录接口地址
    pub token_url: Option<String>,
    /// 寻访记录接口地址
    pub gacha_url: Option<String>,
    /// 请求超时（秒）
    pub request_timeout_secs: Option<u64>,
    /// 是否增量同步
    pub incremental_sync: Option<bool>,
    /// 日志配置
    pub logger_settings: Option<LoggerSettings>,
}

/// 持久化的应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAppConfig {
    pub token_url: String,
    pub gacha_url: String,
    pub request_timeout_secs: u64,
    /// 遇到本地已有的记录即停止翻页
    pub incremental_sync: bool,
    #[serde(default)]
    pub logger_settings: LoggerSettings,
}

impl Default for PersistedAppConfig {
    fn default() -> Self {
        Self {
            token_url: "https://as.hypergryph.com/user/auth/v1/token_by_phone_password"
                .to_string(),
            gacha_url: "https://ak.hypergryph.com/user/api/inquiry/gacha".to_string(),
            request_timeout_secs: 30,
            incremental_sync: true,
            logger_settings: LoggerSettings::default(),
        }
    }
}
