// 鹰角网络接口模块
// 负责登录换取令牌与分页拉取寻访记录

pub mod client;

pub use client::HypergryphClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{GachaRecord, UserCredential};

/// 每页记录数（由上游固定）
pub const GACHA_PAGE_SIZE: u32 = 10;

/// 分页信息
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// 当前页（从 1 开始）
    pub current: u32,
    /// 记录总数
    pub total: u32,
}

impl Pagination {
    /// 根据记录总数计算总页数
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(GACHA_PAGE_SIZE)
    }
}

/// 一页寻访记录
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GachaPage {
    pub list: Vec<GachaRecord>,
    pub pagination: Pagination,
}

/// 寻访记录数据源接口
///
/// 生产环境由 [`HypergryphClient`] 实现，测试中可替换为内存实现
#[async_trait]
pub trait GachaApi: Send + Sync {
    /// 使用手机号和密码换取令牌
    async fn fetch_token(&self, credential: &UserCredential) -> Result<String>;

    /// 拉取指定页的寻访记录
    async fn fetch_gacha_page(&self, token: &str, page: u32) -> Result<GachaPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let pages = |total| Pagination { current: 1, total }.total_pages();
        assert_eq!(pages(0), 0);
        assert_eq!(pages(1), 1);
        assert_eq!(pages(10), 1);
        assert_eq!(pages(11), 2);
        assert_eq!(pages(95), 10);
    }
}
