//! 文件系统路径工具
//!
//! 提供跨平台的数据目录、日志目录定位

use std::path::PathBuf;

/// 应用目录名
const APP_DIR_NAME: &str = "gacha-stats";

/// 获取数据目录路径（跨平台，桌面外壳会改用 Tauri 的 app_data_dir）
///
/// - macOS: ~/Library/Application Support/gacha-stats
/// - Windows: %APPDATA%/gacha-stats
/// - Linux: ~/.local/share/gacha-stats
pub fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_DIR_NAME)
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share").join(APP_DIR_NAME)
    }
}

/// 获取日志目录路径（跨平台）
///
/// - macOS: ~/Library/Logs/gacha-stats
/// - Windows: %APPDATA%/gacha-stats/logs
/// - Linux: ~/.local/share/gacha-stats/logs
pub fn get_log_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Logs").join(APP_DIR_NAME)
    } else {
        get_data_dir().join("logs")
    }
}
