// 领域模块 - 用于组织应用的业务逻辑
//
// 将 AppState 按业务领域分组
// 包含3个领域:账号、寻访记录、系统

pub mod account;
pub mod gacha;
pub mod system;

pub use account::AccountDomain;
pub use gacha::{GachaDomain, SyncReport};
pub use system::SystemDomain;
