//! 后端命令模块
//!
//! 前端可调用的全部命令，按功能分组：
//! - auth: 凭据与登录
//! - gacha: 寻访记录
//! - statistics: 统计
//! - config: 配置管理
//! - ui: 路由表与主题
//!
//! 命令处理函数不依赖 Tauri，桌面外壳在 `desktop` 中包装成 `#[tauri::command]`，
//! 进程内调用则经过 [`dispatch`]，两者使用相同的命令名和参数名

pub mod auth;
pub mod config;
#[cfg(feature = "desktop")]
pub mod desktop;
pub mod gacha;
pub mod statistics;
pub mod ui;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AppConfig, Gacha, UserCredential};
use crate::AppState;

// ==================== 命令名 ====================

pub const SAVE_AUTH_CREDENTIALS: &str = "save_auth_credentials";
pub const GET_AUTH_CREDENTIALS: &str = "get_auth_credentials";
pub const LOGIN: &str = "login";
pub const GET_ALL_GACHA: &str = "get_all_gacha";
pub const GET_GACHA_IN_POOL: &str = "get_gacha_in_pool";
pub const CALCULATE_STATISTICS: &str = "calculate_statistics";
pub const GET_APP_CONFIG: &str = "get_app_config";
pub const UPDATE_CONFIG: &str = "update_config";
pub const GET_UI_CONFIG: &str = "get_ui_config";

// ==================== 参数结构 ====================

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialArgs {
    pub credential: UserCredential,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolArgs {
    pub pool: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatisticsArgs {
    pub gacha: Vec<Gacha>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigArgs {
    pub config: AppConfig,
}

// ==================== 分发 ====================

/// 按命令名执行命令，参数和返回值均为 JSON
pub async fn dispatch(state: &AppState, command: &str, args: Value) -> Result<Value, String> {
    match command {
        SAVE_AUTH_CREDENTIALS => {
            let args: CredentialArgs = parse_args(command, args)?;
            to_value(auth::save_auth_credentials(state, args.credential).await?)
        }
        GET_AUTH_CREDENTIALS => to_value(auth::get_auth_credentials(state).await?),
        LOGIN => {
            let args: CredentialArgs = parse_args(command, args)?;
            to_value(auth::login(state, args.credential).await?)
        }
        GET_ALL_GACHA => to_value(gacha::get_all_gacha(state).await?),
        GET_GACHA_IN_POOL => {
            let args: PoolArgs = parse_args(command, args)?;
            to_value(gacha::get_gacha_in_pool(state, args.pool).await?)
        }
        CALCULATE_STATISTICS => {
            let args: StatisticsArgs = parse_args(command, args)?;
            to_value(statistics::calculate_statistics(args.gacha, args.pool)?)
        }
        GET_APP_CONFIG => to_value(config::get_app_config(state).await?),
        UPDATE_CONFIG => {
            let args: ConfigArgs = parse_args(command, args)?;
            to_value(config::update_config(state, args.config).await?)
        }
        GET_UI_CONFIG => to_value(ui::get_ui_config()),
        other => Err(format!("未知命令: {}", other)),
    }
}

fn parse_args<T: DeserializeOwned>(command: &str, args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("命令 {} 参数无效: {}", command, e))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}
