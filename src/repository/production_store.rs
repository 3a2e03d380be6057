// ==========================================
// 产线生产登记系统 - 生产记录存储接口
// ==========================================
// 职责: 定义聚合器/报表组装器依赖的存储契约
// 说明: 显式注入（Arc<dyn ProductionStore>），不使用全局句柄
// ==========================================

use chrono::NaiveDateTime;

use crate::domain::period::DateRange;
use crate::domain::production::{NewProductionRecord, ProductionRecord};
use crate::domain::report::{ModelTotal, ProductionSummary};
use crate::domain::types::AggregateField;
use crate::repository::error::RepositoryResult;

/// 生产记录存储
///
/// 实现者: ProductionRecordRepository（SQLite）
pub trait ProductionStore: Send + Sync {
    /// 插入记录，返回新分配的 id
    ///
    /// 型号缺失时返回 ValidationError
    fn insert(
        &self,
        record: &NewProductionRecord,
        recorded_at: NaiveDateTime,
    ) -> RepositoryResult<i64>;

    /// 按 id 删除（幂等：不存在时返回 0）
    fn delete_by_id(&self, id: i64) -> RepositoryResult<usize>;

    /// 删除全部记录，返回删除行数
    fn delete_all(&self) -> RepositoryResult<usize>;

    /// 查询区间内的记录（按时间倒序）
    fn find_in_range(&self, range: &DateRange) -> RepositoryResult<Vec<ProductionRecord>>;

    /// 区间汇总（无记录时全部为 0）
    fn aggregate_sums(&self, range: &DateRange) -> RepositoryResult<ProductionSummary>;

    /// 按型号汇总指定字段（仅保留合计 > 0，按合计倒序）
    fn aggregate_by_model(
        &self,
        range: &DateRange,
        field: AggregateField,
    ) -> RepositoryResult<Vec<ModelTotal>>;
}
