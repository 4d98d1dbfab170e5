use std::path::PathBuf;

use anyhow::{bail, Result};
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{AppConfig, PersistedAppConfig};

/// 配置文件名
pub const SETTINGS_FILE: &str = "settings.json";

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedAppConfig>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                match serde_json::from_slice::<PersistedAppConfig>(&bytes) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("配置文件已损坏，使用默认配置 ({:?}): {}", path, e);
                        PersistedAppConfig::default()
                    }
                }
            }
            _ => {
                let default = PersistedAppConfig::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedAppConfig {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: AppConfig) -> Result<PersistedAppConfig> {
        if update.request_timeout_secs == Some(0) {
            bail!("请求超时必须大于 0 秒");
        }

        let mut config = self.data.write().await;

        if let Some(url) = update.token_url {
            config.token_url = url;
        }
        if let Some(url) = update.gacha_url {
            config.gacha_url = url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        if let Some(incremental) = update.incremental_sync {
            config.incremental_sync = incremental;
        }
        if let Some(logger) = update.logger_settings {
            config.logger_settings = logger;
        }

        self.save(&config).await?;
        Ok(config.clone())
    }

    async fn save(&self, config: &PersistedAppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{BroadcastLayer, LogBroadcaster};
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[tokio::test]
    async fn test_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join(SETTINGS_FILE);

        let settings = SettingsManager::new(path.clone()).await.unwrap();
        assert_eq!(settings.get().await, PersistedAppConfig::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_update_persists_partial_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let settings = SettingsManager::new(path.clone()).await.unwrap();
        let updated = settings
            .update(AppConfig {
                request_timeout_secs: Some(5),
                incremental_sync: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.request_timeout_secs, 5);
        assert!(!updated.incremental_sync);
        assert_eq!(updated.gacha_url, PersistedAppConfig::default().gacha_url);

        // 重新加载后保持一致
        let reloaded = SettingsManager::new(path).await.unwrap();
        assert_eq!(reloaded.get().await, updated);
    }

    #[tokio::test]
    async fn test_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsManager::new(dir.path().join(SETTINGS_FILE))
            .await
            .unwrap();

        let result = settings
            .update(AppConfig {
                request_timeout_secs: Some(0),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
        assert_eq!(settings.get().await.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        tokio::fs::write(&path, b"{broken").await.unwrap();

        let broadcaster = Arc::new(LogBroadcaster::new());
        let mut logs = broadcaster.subscribe();
        let subscriber = Registry::default().with(BroadcastLayer::new(broadcaster));
        let _guard = tracing::subscriber::set_default(subscriber);

        let settings = SettingsManager::new(path).await.unwrap();
        assert_eq!(settings.get().await, PersistedAppConfig::default());

        let log = logs.try_recv().unwrap();
        assert_eq!(log.level, "WARN");
        assert!(log.message.contains("配置文件已损坏"));
    }
}
