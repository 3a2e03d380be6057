// ==========================================
// 产线生产登记系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 产线生产登记、周期汇总与看板报表
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 周期解析 / 聚合 / 报表
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能追踪
pub mod perf;

// 国际化
pub mod i18n;

// 历史导出
pub mod export;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态与命令
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregateField, DateRange, NewProductionRecord, PeriodSelector, ProductModel,
    ProductionRecord, ProductionSummary,
};

// 引擎
pub use engine::{PeriodResolver, ProductionAggregator, ReportAssembler};

// API
pub use api::{DashboardApi, ProductionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线生产登记系统";
