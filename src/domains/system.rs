// 系统领域管理器
//
// 负责配置和日志推送

use std::sync::Arc;

use crate::logger::LogBroadcaster;
use crate::settings::SettingsManager;

/// 系统领域管理器 - 负责配置和日志
#[derive(Clone)]
pub struct SystemDomain {
    settings: Arc<SettingsManager>,
    log_broadcaster: Arc<LogBroadcaster>,
}

impl SystemDomain {
    /// 创建新的系统领域管理器
    pub fn new(settings: Arc<SettingsManager>, log_broadcaster: Arc<LogBroadcaster>) -> Self {
        Self {
            settings,
            log_broadcaster,
        }
    }

    /// 获取设置管理器
    pub fn get_settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }

    /// 获取日志广播器
    pub fn get_logger(&self) -> &Arc<LogBroadcaster> {
        &self.log_broadcaster
    }
}
