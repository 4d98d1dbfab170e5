//! 账号命令
//!
//! 登录凭据的保存、读取，以及登录换取令牌

use tracing::info;

use crate::models::UserCredential;
use crate::AppState;

/// 保存登录凭据
pub async fn save_auth_credentials(state: &AppState, credential: UserCredential) -> Result<(), String> {
    state
        .account_domain
        .save_credential(&credential)
        .await
        .map_err(|e| e.to_string())
}

/// 读取登录凭据，没有保存过时返回 `None`
pub async fn get_auth_credentials(state: &AppState) -> Result<Option<UserCredential>, String> {
    state
        .account_domain
        .load_credential()
        .await
        .map_err(|e| e.to_string())
}

/// 登录
pub async fn login(state: &AppState, credential: UserCredential) -> Result<(), String> {
    info!("用户登录: {}", mask_phone(&credential.phone));
    state
        .account_domain
        .login(&credential)
        .await
        .map_err(|e| e.to_string())
}

/// 日志中隐藏手机号中间部分
fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}
