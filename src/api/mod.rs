// ==========================================
// 产线生产登记系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令层调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod production_api;
pub mod validator;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, DashboardResponse, ExportResponse};
pub use error::{ApiError, ApiResult};
pub use production_api::{FormOptions, ProductionApi};
pub use validator::{ProductionForm, ProductionFormValidator};
