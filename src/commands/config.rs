//! 配置管理命令

use tracing::info;

use crate::event_bus::AppEvent;
use crate::models::{AppConfig, PersistedAppConfig};
use crate::AppState;

/// 获取应用配置
pub async fn get_app_config(state: &AppState) -> Result<PersistedAppConfig, String> {
    Ok(state.system_domain.get_settings().get().await)
}

/// 更新配置
pub async fn update_config(state: &AppState, config: AppConfig) -> Result<PersistedAppConfig, String> {
    let updated = state
        .system_domain
        .get_settings()
        .update(config.clone())
        .await
        .map_err(|e| e.to_string())?;

    // 日志推送开关立即生效
    if let Some(logger_settings) = config.logger_settings {
        state
            .system_domain
            .get_logger()
            .set_enabled(logger_settings.enable_frontend_logging);
        info!(
            "前端日志推送: {}",
            if logger_settings.enable_frontend_logging { "开启" } else { "关闭" }
        );
    }

    state.event_bus.publish(AppEvent::ConfigUpdated);
    Ok(updated)
}
