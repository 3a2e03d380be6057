// ==========================================
// 产线生产登记系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、报表结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod period;
pub mod production;
pub mod report;
pub mod types;

// 重导出核心类型
pub use period::{DateRange, PeriodSelector};
pub use production::{NewProductionRecord, ProductionRecord, RECORDED_AT_FORMAT};
pub use report::{
    AggregateResult, ChartSeries, DashboardReport, HistoryRow, MetricsView, ModelTotal,
    ProductionSummary,
};
pub use types::{AggregateField, ProductModel};
