// 寻访记录统计 - 应用主库

// 声明模块
pub mod auth;
pub mod commands;
pub mod domains;
pub mod event_bus;
pub mod hypergryph;
pub mod invoker;
pub mod logger;
pub mod models;
pub mod routes;
pub mod settings;
pub mod statistics;
pub mod storage;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod testing;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use auth::CredentialStore;
use domains::{AccountDomain, GachaDomain, SystemDomain};
use event_bus::EventBus;
use hypergryph::{GachaApi, HypergryphClient};
use logger::LogBroadcaster;
use settings::{SettingsManager, SETTINGS_FILE};
use storage::{Database, DB_FILE};

/// 事件总线容量
const EVENT_BUS_CAPACITY: usize = 100;

/// 应用状态（按领域分组）
///
/// - 账号领域：凭据、登录令牌和上游接口
/// - 寻访记录领域：同步和本地记录
/// - 系统领域：配置和日志推送
/// - 事件总线：同步进度等事件
#[derive(Clone)]
pub struct AppState {
    /// 账号领域管理器
    pub account_domain: Arc<AccountDomain>,
    /// 寻访记录领域管理器
    pub gacha_domain: Arc<GachaDomain>,
    /// 系统领域管理器
    pub system_domain: Arc<SystemDomain>,
    /// 事件总线
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// 在数据目录下初始化全部组件，使用真实的上游接口
    pub async fn initialize(data_dir: &Path, log_broadcaster: Arc<LogBroadcaster>) -> Result<Self> {
        Self::build(data_dir, log_broadcaster, None).await
    }

    /// `api` 为 `None` 时使用 [`HypergryphClient`]
    pub async fn build(
        data_dir: &Path,
        log_broadcaster: Arc<LogBroadcaster>,
        api: Option<Arc<dyn GachaApi>>,
    ) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        info!("数据目录: {:?}", data_dir);

        let settings = Arc::new(SettingsManager::new(data_dir.join(SETTINGS_FILE)).await?);
        let config = settings.get().await;
        log_broadcaster.set_enabled(config.logger_settings.enable_frontend_logging);

        let api: Arc<dyn GachaApi> = match api {
            Some(api) => api,
            None => Arc::new(HypergryphClient::new(settings.clone())?),
        };

        let db = Arc::new(Database::new(&data_dir.join(DB_FILE)).await?);
        let event_bus = Arc::new(EventBus::new(EVENT_BUS_CAPACITY));

        let account_domain = Arc::new(AccountDomain::new(
            CredentialStore::new(data_dir),
            api,
            event_bus.clone(),
        ));
        let gacha_domain = Arc::new(GachaDomain::new(db, event_bus.clone()));
        let system_domain = Arc::new(SystemDomain::new(settings, log_broadcaster));

        Ok(Self {
            account_domain,
            gacha_domain,
            system_domain,
            event_bus,
        })
    }
}

// ==================== 应用入口 ====================

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Emitter, Manager};
    use tokio::sync::broadcast::error::RecvError;
    use tracing::{error, warn};

    // 创建日志广播器
    let log_broadcaster = Arc::new(LogBroadcaster::new());

    if let Err(e) = logger::init_with_broadcaster(log_broadcaster.clone(), &utils::get_log_dir()) {
        eprintln!("初始化日志系统失败: {}", e);
    }

    let result = tauri::Builder::default()
        .setup(move |app| {
            info!("初始化寻访记录统计...");

            let data_dir = match app.path().app_data_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    warn!("无法获取应用数据目录，使用默认目录: {}", e);
                    utils::get_data_dir()
                }
            };

            let state = tauri::async_runtime::block_on(AppState::initialize(
                &data_dir,
                log_broadcaster.clone(),
            ))
            .map_err(|e| e.to_string())?;

            // 日志推送到前端
            let handle = app.handle().clone();
            let mut logs = log_broadcaster.subscribe();
            tauri::async_runtime::spawn(async move {
                loop {
                    match logs.recv().await {
                        Ok(log) => {
                            let _ = handle.emit("log-message", log);
                        }
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            // 同步进度推送到前端
            let handle = app.handle().clone();
            let mut events = state.event_bus.subscribe();
            tauri::async_runtime::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if let Err(e) = handle.emit("sync-progress", event) {
                                error!("推送同步事件失败: {}", e);
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("同步事件积压，丢弃 {} 条", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            app.manage(state);
            info!("初始化完成");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::desktop::save_auth_credentials,
            commands::desktop::get_auth_credentials,
            commands::desktop::login,
            commands::desktop::get_all_gacha,
            commands::desktop::get_gacha_in_pool,
            commands::desktop::calculate_statistics,
            commands::desktop::get_app_config,
            commands::desktop::update_config,
            commands::desktop::get_ui_config,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!("应用运行失败: {}", e);
        std::process::exit(1);
    }
}
