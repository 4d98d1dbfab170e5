// 主题配置 - 前端渲染层使用的图标集与配色（静态数据）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 配色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub error: String,
    pub warning: String,
    pub info: String,
    pub success: String,
}

/// 单个主题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub dark: bool,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOptions {
    pub default_set: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub default_theme: String,
    pub themes: BTreeMap<String, ThemeDefinition>,
}

/// UI 插件配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTheme {
    pub icons: IconOptions,
    pub theme: ThemeOptions,
}

fn light_colors() -> ThemeColors {
    ThemeColors {
        primary: "#FF5722".to_string(),
        secondary: "#FF9800".to_string(),
        accent: "#FFC107".to_string(),
        error: "#F44336".to_string(),
        warning: "#FFEB3B".to_string(),
        info: "#03A9F4".to_string(),
        success: "#4CAF50".to_string(),
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(
            "light".to_string(),
            ThemeDefinition {
                dark: false,
                colors: light_colors(),
            },
        );

        Self {
            icons: IconOptions {
                default_set: "mdi".to_string(),
            },
            theme: ThemeOptions {
                default_theme: "light".to_string(),
                themes,
            },
        }
    }
}
