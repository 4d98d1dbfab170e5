//! 命令调用门面
//!
//! 为每个后端命令提供带类型的调用方法：参数序列化为 JSON，经 [`Transport`] 发给后端，
//! 再把结果反序列化为对应类型。门面本身不做重试、缓存或校验，失败原样返回

pub mod in_process;

pub use in_process::InProcessTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::commands::ui::UiConfig;
use crate::commands::{
    CALCULATE_STATISTICS, GET_ALL_GACHA, GET_APP_CONFIG, GET_AUTH_CREDENTIALS, GET_GACHA_IN_POOL,
    GET_UI_CONFIG, LOGIN, SAVE_AUTH_CREDENTIALS, UPDATE_CONFIG,
};
use crate::models::{
    AppConfig, Gacha, PersistedAppConfig, PoolStatistics, Statistics, TotalStatistics,
    UserCredential,
};

/// 调用错误
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// 后端返回的错误信息
    #[error("{0}")]
    Backend(String),

    #[error("Failed to perform json (de)serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("没有保存的登录凭据")]
    CredentialNotFound,

    #[error("返回结果类型不符: 期望 {0}")]
    UnexpectedShape(&'static str),
}

pub type InvokeResult<T> = Result<T, InvokeError>;

/// 命令传输通道（Tauri IPC、进程内调用等）
#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送命令，返回后端的 JSON 结果或错误信息
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String>;
}

/// 带类型的命令调用器
pub struct CommandInvoker<T: Transport> {
    transport: T,
}

impl<T: Transport> CommandInvoker<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call<R: DeserializeOwned>(&self, command: &str, args: Value) -> InvokeResult<R> {
        let value = self
            .transport
            .invoke(command, args)
            .await
            .map_err(InvokeError::Backend)?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn save_credential(&self, credential: &UserCredential) -> InvokeResult<()> {
        self.call(SAVE_AUTH_CREDENTIALS, json!({ "credential": credential }))
            .await
    }

    /// 读取保存的凭据，没有保存时返回 [`InvokeError::CredentialNotFound`]
    pub async fn get_credential(&self) -> InvokeResult<UserCredential> {
        let credential: Option<UserCredential> = self.call(GET_AUTH_CREDENTIALS, json!({})).await?;
        credential.ok_or(InvokeError::CredentialNotFound)
    }

    pub async fn login(&self, credential: &UserCredential) -> InvokeResult<()> {
        self.call(LOGIN, json!({ "credential": credential })).await
    }

    pub async fn get_all_gacha(&self) -> InvokeResult<Vec<Gacha>> {
        self.call(GET_ALL_GACHA, json!({})).await
    }

    pub async fn get_gacha_in_pool(&self, pool: &str) -> InvokeResult<Vec<Gacha>> {
        self.call(GET_GACHA_IN_POOL, json!({ "pool": pool })).await
    }

    /// 未指定卡池时后端返回全局统计，否则返回单卡池统计
    ///
    /// 返回哪种结构由后端结果决定，需要确定结构时使用
    /// [`calculate_total_statistics`](Self::calculate_total_statistics) 或
    /// [`calculate_pool_statistics`](Self::calculate_pool_statistics)
    pub async fn calculate_statistics(
        &self,
        gacha: &[Gacha],
        pool: Option<&str>,
    ) -> InvokeResult<Statistics> {
        let args = match pool {
            Some(pool) => json!({ "gacha": gacha, "pool": pool }),
            None => json!({ "gacha": gacha }),
        };
        self.call(CALCULATE_STATISTICS, args).await
    }

    pub async fn calculate_total_statistics(&self, gacha: &[Gacha]) -> InvokeResult<TotalStatistics> {
        match self.calculate_statistics(gacha, None).await? {
            Statistics::Total(stats) => Ok(stats),
            Statistics::Pool(_) => Err(InvokeError::UnexpectedShape("TotalStatistics")),
        }
    }

    pub async fn calculate_pool_statistics(
        &self,
        gacha: &[Gacha],
        pool: &str,
    ) -> InvokeResult<PoolStatistics> {
        match self.calculate_statistics(gacha, Some(pool)).await? {
            Statistics::Pool(stats) => Ok(stats),
            Statistics::Total(_) => Err(InvokeError::UnexpectedShape("PoolStatistics")),
        }
    }

    pub async fn get_app_config(&self) -> InvokeResult<PersistedAppConfig> {
        self.call(GET_APP_CONFIG, json!({})).await
    }

    pub async fn update_config(&self, config: &AppConfig) -> InvokeResult<PersistedAppConfig> {
        self.call(UPDATE_CONFIG, json!({ "config": config })).await
    }

    pub async fn get_ui_config(&self) -> InvokeResult<UiConfig> {
        self.call(GET_UI_CONFIG, json!({})).await
    }
}
