use crate::api::error::ApiError;
use crate::api::validator::ProductionForm;
use crate::app::state::AppState;
use crate::i18n;

use super::common::{locale_of, map_api_error, run_blocking, to_json};

// ==========================================
// 生产登记相关命令
// ==========================================

/// 登记生产记录
///
/// # 参数
/// - form_json: 表单 JSON（字段均可为字符串或数字）
pub async fn register_production(state: &AppState, form_json: String) -> Result<String, String> {
    let form: ProductionForm = serde_json::from_str(&form_json)
        .map_err(|e| map_api_error(ApiError::InvalidInput(format!("表单格式错误: {}", e))))?;

    let production_api = state.production_api.clone();
    let now = chrono::Local::now().naive_local();
    let locale = locale_of(state);

    let id = run_blocking("ipc.register_production", move || {
        production_api.register(&form, now)
    })
    .await?;

    to_json(&serde_json::json!({
        "id": id,
        "message": i18n::t_in("production.registered", &locale),
    }))
}

/// 删除单条记录（不存在时同样成功，deleted=0）
pub async fn delete_production(state: &AppState, id: i64) -> Result<String, String> {
    let production_api = state.production_api.clone();
    let locale = locale_of(state);

    let deleted = run_blocking("ipc.delete_production", move || production_api.delete(id)).await?;

    let key = if deleted > 0 {
        "production.deleted"
    } else {
        "production.not_found"
    };

    to_json(&serde_json::json!({
        "id": id,
        "deleted": deleted,
        "message": i18n::t_in_with_args(key, &locale, &[("id", &id.to_string())]),
    }))
}

/// 清空全部历史
pub async fn clear_production(state: &AppState) -> Result<String, String> {
    let production_api = state.production_api.clone();
    let locale = locale_of(state);

    let deleted = run_blocking("ipc.clear_production", move || production_api.clear_all()).await?;

    to_json(&serde_json::json!({
        "deleted": deleted,
        "message": i18n::t_in_with_args("production.cleared", &locale, &[("count", &deleted.to_string())]),
    }))
}

/// 登记表单选项（型号、操作员）
pub async fn get_form_options(state: &AppState) -> Result<String, String> {
    let production_api = state.production_api.clone();

    let result = run_blocking("ipc.get_form_options", move || production_api.form_options()).await?;

    to_json(&result)
}
