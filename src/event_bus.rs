// 事件总线 - 用于模块间解耦通信
//
// 实现发布/订阅模式，同步进度等事件由桌面外壳转发给前端
// 使用 tokio::sync::broadcast 实现高效的事件分发

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// 应用事件枚举 - 定义所有可能的系统事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppEvent {
    // --- 账号事件 ---

    /// 登录成功
    LoggedIn,

    // --- 同步事件 ---

    /// 开始同步寻访记录
    #[serde(rename_all = "camelCase")]
    SyncStarted { sync_id: Uuid },

    /// 已拉取一页记录
    #[serde(rename_all = "camelCase")]
    SyncPageFetched {
        sync_id: Uuid,
        page: u32,
        total_pages: u32,
    },

    /// 同步完成
    #[serde(rename_all = "camelCase")]
    SyncCompleted { sync_id: Uuid, written: usize },

    /// 同步失败
    #[serde(rename_all = "camelCase")]
    SyncFailed { sync_id: Uuid, error: String },

    // --- 系统事件 ---

    /// 配置更新
    ConfigUpdated,
}

/// 事件总线 - 用于模块间解耦通信
///
/// 使用 broadcast channel 实现发布/订阅模式
/// 支持多个订阅者同时接收事件
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    ///
    /// # 参数
    /// - `capacity`: 事件缓冲区大小，建议 100-1000
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 发布事件
    ///
    /// 如果没有订阅者，事件会被丢弃（这是正常的）
    pub fn publish(&self, event: AppEvent) {
        match self.sender.send(event) {
            Ok(receiver_count) => {
                tracing::trace!("事件已发布，订阅者数量: {}", receiver_count);
            }
            Err(_) => {
                tracing::trace!("事件已发布但无订阅者");
            }
        }
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// 获取当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_basic() {
        let bus = EventBus::new(100);
        let mut receiver = bus.subscribe();

        bus.publish(AppEvent::LoggedIn);

        match receiver.recv().await {
            Ok(AppEvent::LoggedIn) => {}
            other => panic!("未收到预期事件: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(100);
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(AppEvent::SyncCompleted {
            sync_id: Uuid::new_v4(),
            written: 3,
        });

        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_ok());
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.publish(AppEvent::ConfigUpdated);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = AppEvent::SyncPageFetched {
            sync_id: Uuid::nil(),
            page: 2,
            total_pages: 5,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "syncPageFetched");
        assert_eq!(value["totalPages"], 5);
    }
}
