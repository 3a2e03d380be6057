use crate::api::error::{ApiError, ApiResult};
use crate::app::state::AppState;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、阻塞执行、序列化
// ==========================================

/// 错误响应（返回给调用方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 错误代码
pub(super) fn error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidInput(_) => "INVALID_INPUT",
        ApiError::ValidationError(_) => "VALIDATION_ERROR",
        ApiError::NotFound(_) => "NOT_FOUND",
        ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        ApiError::DatabaseError(_) => "DATABASE_ERROR",
        ApiError::ExportError(_) => "EXPORT_ERROR",
        ApiError::InternalError(_) => "INTERNAL_ERROR",
        ApiError::Other(_) => "OTHER_ERROR",
    }
}

/// 将ApiError转换为JSON字符串
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: error_code(&err).to_string(),
        message: err.to_string(),
        details: match &err {
            // 存储不可用可重试，提示调用方
            ApiError::StoreUnavailable(_) => Some(serde_json::json!({ "retryable": true })),
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 在阻塞线程池执行 API 调用（带性能统计）
pub(super) async fn run_blocking<T, F>(op: &'static str, f: F) -> Result<T, String>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new(op);
        f()
    })
    .await
    .map_err(|e| map_api_error(ApiError::InternalError(format!("任务执行失败: {}", e))))?
    .map_err(map_api_error)
}

/// 序列化返回
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value)
        .map_err(|e| map_api_error(ApiError::InternalError(format!("序列化失败: {}", e))))
}

/// 当前配置语言（读取失败时使用默认语言，不影响命令结果）
pub(super) fn locale_of(state: &AppState) -> String {
    state.config_manager.get_locale().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "读取语言配置失败，使用默认语言");
        crate::config::DEFAULT_LOCALE.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_error_envelope() {
        let json = map_api_error(ApiError::StoreUnavailable("database is locked".to_string()));
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code, "STORE_UNAVAILABLE");
        assert!(parsed.message.contains("database is locked"));
        assert_eq!(parsed.details.unwrap()["retryable"], true);

        let json = map_api_error(ApiError::InvalidInput("bad".to_string()));
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code, "INVALID_INPUT");
        assert!(parsed.details.is_none());
    }
}
