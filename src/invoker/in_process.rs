//! 进程内传输通道
//!
//! 直接调用后端命令分发，不经过 webview，用于嵌入和集成测试

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::Transport;
use crate::commands;
use crate::AppState;

pub struct InProcessTransport {
    state: AppState,
}

impl InProcessTransport {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String> {
        debug!("进程内调用命令: {}", command);
        commands::dispatch(&self.state, command, args).await
    }
}
