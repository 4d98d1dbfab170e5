// 认证模块 - 登录凭据的本地持久化与会话令牌管理

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Result;
use tracing::{info, warn};

use crate::models::UserCredential;

/// 凭据文件名
pub const CREDENTIAL_FILE: &str = "auth.cred";

/// 凭据存储 - 以 JSON 形式保存一份登录凭据
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// 在数据目录下创建凭据存储
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CREDENTIAL_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存凭据（覆盖已有文件）
    pub async fn save(&self, credential: &UserCredential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec(credential)?;
        tokio::fs::write(&self.path, json).await?;

        info!("登录凭据已保存: {:?}", self.path);
        Ok(())
    }

    /// 读取凭据
    ///
    /// 文件不存在或内容无法解析时返回 `None`
    pub async fn load(&self) -> Result<Option<UserCredential>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<UserCredential>(&bytes) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!("凭据文件已损坏，忽略: {}", e);
                Ok(None)
            }
        }
    }
}

/// 会话令牌 - 登录成功后由上游返回，仅保存在内存中
#[derive(Default)]
pub struct SessionToken {
    token: RwLock<Option<String>>,
}

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 锁中毒时沿用其中的值，保证登录结果不会被静默丢弃
    pub fn set(&self, token: String) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token);
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.get().is_some()
    }
}
