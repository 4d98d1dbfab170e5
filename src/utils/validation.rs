//! 输入验证工具函数
//!
//! 提供登录凭据、卡池名称等参数的验证功能，在请求上游接口前拦截无效输入

use crate::models::UserCredential;

/// 手机号最短长度
const PHONE_MIN_LEN: usize = 6;
/// 手机号最长长度（含国际区号）
const PHONE_MAX_LEN: usize = 20;

/// 验证登录凭据
///
/// # 参数
/// - `credential`: 用户输入的凭据
///
/// # 返回
/// - `Ok(())`: 验证通过
/// - `Err(String)`: 错误信息
pub fn validate_credential(credential: &UserCredential) -> Result<(), String> {
    validate_phone(&credential.phone)?;
    if credential.password.trim().is_empty() {
        return Err("密码不能为空".to_string());
    }
    Ok(())
}

/// 验证手机号格式（可带 `+` 前缀的纯数字）
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err("手机号不能为空".to_string());
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("无效的手机号: {}", phone));
    }
    if phone.len() < PHONE_MIN_LEN || phone.len() > PHONE_MAX_LEN {
        return Err(format!("手机号长度无效: {}", phone.len()));
    }
    Ok(())
}

/// 验证卡池名称
pub fn validate_pool_name(pool: &str) -> Result<(), String> {
    if pool.trim().is_empty() {
        return Err("卡池名称不能为空".to_string());
    }
    Ok(())
}
