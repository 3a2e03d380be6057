use std::path::PathBuf;

use crate::app::state::AppState;
use crate::i18n;

use super::common::{locale_of, run_blocking, to_json};

// ==========================================
// 看板与导出命令
// ==========================================

/// 查询看板
///
/// # 参数
/// - period: 周期令牌（可选）
/// - date: 指定日期 YYYY-MM-DD（可选）
pub async fn get_dashboard(
    state: &AppState,
    period: Option<String>,
    date: Option<String>,
) -> Result<String, String> {
    let dashboard_api = state.dashboard_api.clone();
    let today = chrono::Local::now().date_naive();

    let result = run_blocking("ipc.get_dashboard", move || {
        dashboard_api.get_dashboard(period.as_deref(), date.as_deref(), today)
    })
    .await?;

    to_json(&result)
}

/// 导出全部历史为 CSV
///
/// # 参数
/// - dir: 导出目录（缺省为用户下载目录，再缺省为当前目录）
pub async fn export_production(state: &AppState, dir: Option<String>) -> Result<String, String> {
    let dir = dir
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let dashboard_api = state.dashboard_api.clone();
    let today = chrono::Local::now().date_naive();
    let locale = locale_of(state);

    let result = run_blocking("ipc.export_production", move || {
        dashboard_api.export_csv(&dir, today)
    })
    .await?;

    let message = if result.rows == 0 {
        i18n::t_in("export.empty", &locale)
    } else {
        i18n::t_in_with_args(
            "export.done",
            &locale,
            &[("path", &result.path.display().to_string())],
        )
    };

    to_json(&serde_json::json!({
        "path": result.path,
        "rows": result.rows,
        "message": message,
    }))
}
