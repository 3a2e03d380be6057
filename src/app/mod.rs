// ==========================================
// 产线生产登记系统 - 应用层
// ==========================================
// 职责: 共享状态 + 命令层，连接宿主与后端 API
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
