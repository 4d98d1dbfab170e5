//! 界面配置命令

use serde::{Deserialize, Serialize};

use crate::routes::{RouteInfo, Router};
use crate::theme::UiTheme;

/// 渲染层启动所需的路由表和主题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub routes: Vec<RouteInfo>,
    pub theme: UiTheme,
}

/// 获取界面配置
pub fn get_ui_config() -> UiConfig {
    UiConfig {
        routes: Router::new().describe(),
        theme: UiTheme::default(),
    }
}
