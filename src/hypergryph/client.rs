// 鹰角网络 API 客户端
// 接口地址与超时在每次请求时从配置读取，修改配置后无需重建客户端

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{GachaApi, GachaPage};
use crate::models::UserCredential;
use crate::settings::SettingsManager;

const USER_AGENT: &str = concat!("gacha-stats/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    phone: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct TokenData {
    #[serde(default)]
    token: Option<String>,
}

/// 登录接口响应，`status == 0` 表示成功
#[derive(Debug, Deserialize)]
struct TokenResponse {
    status: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<TokenData>,
}

impl TokenResponse {
    fn into_token(self) -> Result<String> {
        let token = self.data.and_then(|data| data.token);
        match (self.status, token) {
            (0, Some(token)) if !token.is_empty() => Ok(token),
            (0, _) => Err(anyhow!("登录失败: 响应中缺少令牌")),
            (status, _) => Err(anyhow!(
                "登录失败: {} (status={})",
                self.msg.unwrap_or_else(|| "未知错误".to_string()),
                status
            )),
        }
    }
}

/// 寻访记录接口响应，`code == 0` 表示成功
#[derive(Debug, Deserialize)]
struct GachaResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<GachaPage>,
}

impl GachaResponse {
    fn into_page(self) -> Result<GachaPage> {
        if self.code != 0 {
            bail!(
                "获取寻访记录失败: {} (code={})",
                self.msg.unwrap_or_else(|| "未知错误".to_string()),
                self.code
            );
        }
        self.data.ok_or_else(|| anyhow!("获取寻访记录失败: 响应中缺少数据"))
    }
}

/// 鹰角网络 API 客户端
#[derive(Clone)]
pub struct HypergryphClient {
    client: Client,
    settings: Arc<SettingsManager>,
}

impl HypergryphClient {
    /// 创建新的客户端
    pub fn new(settings: Arc<SettingsManager>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl GachaApi for HypergryphClient {
    async fn fetch_token(&self, credential: &UserCredential) -> Result<String> {
        let config = self.settings.get().await;
        info!("请求登录令牌: {}", config.token_url);

        let response = self
            .client
            .post(&config.token_url)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .json(&TokenRequest {
                phone: &credential.phone,
                password: &credential.password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("登录请求返回错误状态: {}", status);
            bail!("登录请求失败 ({}): {}", status, error_text);
        }

        let body: TokenResponse = response.json().await?;
        body.into_token()
    }

    async fn fetch_gacha_page(&self, token: &str, page: u32) -> Result<GachaPage> {
        let config = self.settings.get().await;
        let page_param = page.to_string();

        let response = self
            .client
            .get(&config.gacha_url)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .query(&[("token", token), ("page", page_param.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("获取寻访记录失败 ({}): {}", status, error_text);
        }

        let body: GachaResponse = response.json().await?;
        body.into_page()
    }
}
