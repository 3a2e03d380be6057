// ==========================================
// 产线生产登记系统 - 命令层（按域拆分）
// ==========================================
// 职责: JSON 字符串入/出的异步命令，供宿主（CLI / IPC）调用
// 约定: 成功返回 JSON；失败返回 {code, message, details} 的 JSON
// ==========================================

mod common;
mod dashboard;
mod production;

pub use common::ErrorResponse;
pub use dashboard::*;
pub use production::*;
