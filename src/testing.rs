// 测试辅助：内存中的上游接口实现和测试数据构造

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::hypergryph::{GachaApi, GachaPage, Pagination, GACHA_PAGE_SIZE};
use crate::logger::LogBroadcaster;
use crate::models::{Character, GachaRecord, UserCredential};
use crate::AppState;

/// 按页返回预置数据的上游接口
pub struct FakeGachaApi {
    password: String,
    pages: Vec<GachaPage>,
    fail_on_page: Option<u32>,
    token_calls: Arc<AtomicUsize>,
    page_calls: Arc<AtomicUsize>,
}

impl FakeGachaApi {
    pub const TOKEN: &'static str = "fake-token";

    pub fn new(password: &str, pages: Vec<GachaPage>) -> Self {
        Self {
            password: password.to_string(),
            pages,
            fail_on_page: None,
            token_calls: Arc::new(AtomicUsize::new(0)),
            page_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fail_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn token_calls(&self) -> Arc<AtomicUsize> {
        self.token_calls.clone()
    }

    pub fn page_calls(&self) -> Arc<AtomicUsize> {
        self.page_calls.clone()
    }
}

#[async_trait]
impl GachaApi for FakeGachaApi {
    async fn fetch_token(&self, credential: &UserCredential) -> Result<String> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        if credential.password != self.password {
            bail!("登录失败: 密码错误 (status=100)");
        }
        Ok(Self::TOKEN.to_string())
    }

    async fn fetch_gacha_page(&self, token: &str, page: u32) -> Result<GachaPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if token != Self::TOKEN {
            bail!("获取寻访记录失败: 令牌无效 (code=3000)");
        }
        if self.fail_on_page == Some(page) {
            bail!("获取寻访记录失败: 网络错误");
        }
        self.pages
            .get(page as usize - 1)
            .cloned()
            .ok_or_else(|| anyhow!("页码超出范围: {}", page))
    }
}

/// 构造一条寻访记录
pub fn record(ts: i64, pool: &str, chars: &[(&str, u8)]) -> GachaRecord {
    GachaRecord {
        timestamp: ts,
        pool: pool.to_string(),
        chars: chars
            .iter()
            .map(|(name, rarity)| Character {
                name: name.to_string(),
                rarity: *rarity,
                is_new: false,
            })
            .collect(),
    }
}

/// 将记录按上游的方式分页（输入应为时间倒序）
pub fn paginate(records: Vec<GachaRecord>) -> Vec<GachaPage> {
    let total = records.len() as u32;
    if records.is_empty() {
        return vec![GachaPage {
            list: Vec::new(),
            pagination: Pagination { current: 1, total },
        }];
    }

    records
        .chunks(GACHA_PAGE_SIZE as usize)
        .enumerate()
        .map(|(index, chunk)| GachaPage {
            list: chunk.to_vec(),
            pagination: Pagination {
                current: index as u32 + 1,
                total,
            },
        })
        .collect()
}

/// 在临时目录中构造完整的应用状态
pub async fn test_state(dir: &tempfile::TempDir, api: FakeGachaApi) -> AppState {
    AppState::build(dir.path(), Arc::new(LogBroadcaster::new()), Some(Arc::new(api)))
        .await
        .unwrap()
}

pub fn credential(password: &str) -> UserCredential {
    UserCredential {
        phone: "13800138000".to_string(),
        password: password.to_string(),
    }
}
