// 账号领域管理器
//
// 负责登录凭据的保存读取、上游登录和会话令牌

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::auth::{CredentialStore, SessionToken};
use crate::event_bus::{AppEvent, EventBus};
use crate::hypergryph::GachaApi;
use crate::models::UserCredential;
use crate::utils::validate_credential;

/// 账号领域管理器 - 负责凭据、登录和令牌
pub struct AccountDomain {
    credentials: CredentialStore,
    token: SessionToken,
    api: Arc<dyn GachaApi>,
    event_bus: Arc<EventBus>,
}

impl AccountDomain {
    /// 创建新的账号领域管理器
    pub fn new(credentials: CredentialStore, api: Arc<dyn GachaApi>, event_bus: Arc<EventBus>) -> Self {
        Self {
            credentials,
            token: SessionToken::new(),
            api,
            event_bus,
        }
    }

    /// 获取上游接口
    pub fn get_api(&self) -> &Arc<dyn GachaApi> {
        &self.api
    }

    /// 获取会话令牌
    pub fn get_token(&self) -> &SessionToken {
        &self.token
    }

    /// 保存凭据
    pub async fn save_credential(&self, credential: &UserCredential) -> Result<()> {
        self.credentials.save(credential).await
    }

    /// 读取已保存的凭据
    pub async fn load_credential(&self) -> Result<Option<UserCredential>> {
        self.credentials.load().await
    }

    /// 登录：换取令牌并保存在内存中
    pub async fn login(&self, credential: &UserCredential) -> Result<()> {
        validate_credential(credential).map_err(|e| anyhow!(e))?;

        match self.api.fetch_token(credential).await {
            Ok(token) => {
                self.token.set(token);
                info!("登录成功");
                self.event_bus.publish(AppEvent::LoggedIn);
                Ok(())
            }
            Err(e) => {
                warn!("登录失败: {}", e);
                Err(e)
            }
        }
    }

    /// 当前令牌，未登录时报错
    pub fn require_token(&self) -> Result<String> {
        self.token.get().ok_or_else(|| anyhow!("尚未登录"))
    }
}
