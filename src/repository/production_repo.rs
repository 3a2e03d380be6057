// ==========================================
// 产线生产登记系统 - 生产记录数据仓储
// ==========================================
// 对齐: production_record 表
// 红线: 仅插入 / 删除，不提供更新
// ==========================================

mod core;
mod queries;


pub use self::core::ProductionRecordRepository;

use chrono::NaiveDateTime;

use crate::domain::period::DateRange;
use crate::domain::production::{NewProductionRecord, ProductionRecord};
use crate::domain::report::{ModelTotal, ProductionSummary};
use crate::domain::types::AggregateField;
use crate::repository::error::RepositoryResult;
use crate::repository::production_store::ProductionStore;

impl ProductionStore for ProductionRecordRepository {
    fn insert(
        &self,
        record: &NewProductionRecord,
        recorded_at: NaiveDateTime,
    ) -> RepositoryResult<i64> {
        ProductionRecordRepository::insert(self, record, recorded_at)
    }

    fn delete_by_id(&self, id: i64) -> RepositoryResult<usize> {
        ProductionRecordRepository::delete_by_id(self, id)
    }

    fn delete_all(&self) -> RepositoryResult<usize> {
        ProductionRecordRepository::delete_all(self)
    }

    fn find_in_range(&self, range: &DateRange) -> RepositoryResult<Vec<ProductionRecord>> {
        ProductionRecordRepository::find_in_range(self, range)
    }

    fn aggregate_sums(&self, range: &DateRange) -> RepositoryResult<ProductionSummary> {
        ProductionRecordRepository::aggregate_sums(self, range)
    }

    fn aggregate_by_model(
        &self,
        range: &DateRange,
        field: AggregateField,
    ) -> RepositoryResult<Vec<ModelTotal>> {
        ProductionRecordRepository::aggregate_by_model(self, range, field)
    }
}
