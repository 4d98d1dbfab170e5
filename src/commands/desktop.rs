//! Tauri 命令包装
//!
//! 每个命令只负责取出托管状态并转发给对应的处理函数

use crate::commands::ui::UiConfig;
use crate::commands::{auth, config, gacha, statistics, ui};
use crate::models::{AppConfig, Gacha, PersistedAppConfig, Statistics, UserCredential};
use crate::AppState;

#[tauri::command]
pub async fn save_auth_credentials(
    state: tauri::State<'_, AppState>,
    credential: UserCredential,
) -> Result<(), String> {
    auth::save_auth_credentials(&state, credential).await
}

#[tauri::command]
pub async fn get_auth_credentials(
    state: tauri::State<'_, AppState>,
) -> Result<Option<UserCredential>, String> {
    auth::get_auth_credentials(&state).await
}

#[tauri::command]
pub async fn login(
    state: tauri::State<'_, AppState>,
    credential: UserCredential,
) -> Result<(), String> {
    auth::login(&state, credential).await
}

#[tauri::command]
pub async fn get_all_gacha(state: tauri::State<'_, AppState>) -> Result<Vec<Gacha>, String> {
    gacha::get_all_gacha(&state).await
}

#[tauri::command]
pub async fn get_gacha_in_pool(
    state: tauri::State<'_, AppState>,
    pool: String,
) -> Result<Vec<Gacha>, String> {
    gacha::get_gacha_in_pool(&state, pool).await
}

#[tauri::command]
pub fn calculate_statistics(gacha: Vec<Gacha>, pool: Option<String>) -> Result<Statistics, String> {
    statistics::calculate_statistics(gacha, pool)
}

#[tauri::command]
pub async fn get_app_config(
    state: tauri::State<'_, AppState>,
) -> Result<PersistedAppConfig, String> {
    config::get_app_config(&state).await
}

#[tauri::command]
pub async fn update_config(
    state: tauri::State<'_, AppState>,
    config: AppConfig,
) -> Result<PersistedAppConfig, String> {
    config::update_config(&state, config).await
}

#[tauri::command]
pub fn get_ui_config() -> UiConfig {
    ui::get_ui_config()
}
