// ==========================================
// 产线生产登记系统 - 引擎层
// ==========================================
// 职责: 周期解析、聚合、报表组装
// 红线: Engine 不拼 SQL, 存储访问一律经 ProductionStore
// ==========================================

pub mod aggregator;
pub mod error;
pub mod formatting;
pub mod period_resolver;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心引擎
pub use aggregator::ProductionAggregator;
pub use error::{EngineError, EngineResult};
pub use formatting::MetricsFormatter;
pub use period_resolver::{PeriodResolver, DEFAULT_PERIOD};
pub use report::ReportAssembler;
