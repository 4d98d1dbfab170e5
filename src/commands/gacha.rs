//! 寻访记录命令

use tracing::info;

use crate::models::Gacha;
use crate::utils::validate_pool_name;
use crate::AppState;

/// 从上游同步后返回本地保存的全部抽取记录
pub async fn get_all_gacha(state: &AppState) -> Result<Vec<Gacha>, String> {
    let token = state
        .account_domain
        .require_token()
        .map_err(|e| e.to_string())?;
    let incremental = state.system_domain.get_settings().get().await.incremental_sync;

    state
        .gacha_domain
        .sync(state.account_domain.get_api().as_ref(), &token, incremental)
        .await
        .map_err(|e| e.to_string())?;

    let draws = state
        .gacha_domain
        .all_draws()
        .await
        .map_err(|e| e.to_string())?;
    info!("返回 {} 次抽取记录", draws.len());
    Ok(draws)
}

/// 返回本地保存的某个卡池的抽取记录（不访问上游）
pub async fn get_gacha_in_pool(state: &AppState, pool: String) -> Result<Vec<Gacha>, String> {
    validate_pool_name(&pool)?;
    state
        .gacha_domain
        .draws_in_pool(&pool)
        .await
        .map_err(|e| e.to_string())
}
