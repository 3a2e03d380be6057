// ==========================================
// 产线生产登记系统 - 生产聚合器
// ==========================================
// 职责: 区间汇总、按型号产量、按型号返工
// 红线: 只读，不修改任何记录
// 说明: 三项聚合相互独立，任一失败即整体失败
// ==========================================

use std::sync::Arc;

use crate::domain::period::DateRange;
use crate::domain::report::{AggregateResult, ModelTotal, ProductionSummary};
use crate::domain::types::AggregateField;
use crate::engine::error::EngineResult;
use crate::repository::production_store::ProductionStore;

// ==========================================
// ProductionAggregator - 生产聚合器
// ==========================================
pub struct ProductionAggregator {
    store: Arc<dyn ProductionStore>,
}

impl ProductionAggregator {
    /// 创建聚合器（显式注入存储）
    pub fn new(store: Arc<dyn ProductionStore>) -> Self {
        Self { store }
    }

    /// 区间汇总（无记录时全部为 0）
    pub fn summary(&self, range: &DateRange) -> EngineResult<ProductionSummary> {
        Ok(self.store.aggregate_sums(range)?)
    }

    /// 按型号产量（测试数量口径）
    pub fn production_by_model(&self, range: &DateRange) -> EngineResult<Vec<ModelTotal>> {
        self.by_model(range, AggregateField::Tested)
    }

    /// 按型号返工
    pub fn rework_by_model(&self, range: &DateRange) -> EngineResult<Vec<ModelTotal>> {
        self.by_model(range, AggregateField::Reworked)
    }

    /// 一次性完成三项聚合
    pub fn aggregate(&self, range: &DateRange) -> EngineResult<AggregateResult> {
        let summary = self.summary(range)?;
        let production_by_model = self.production_by_model(range)?;
        let rework_by_model = self.rework_by_model(range)?;

        tracing::debug!(
            range = ?range,
            tested = summary.tested,
            reworked = summary.reworked,
            models = production_by_model.len(),
            "聚合完成"
        );

        Ok(AggregateResult {
            summary,
            production_by_model,
            rework_by_model,
        })
    }

    fn by_model(&self, range: &DateRange, field: AggregateField) -> EngineResult<Vec<ModelTotal>> {
        let mut totals = self.store.aggregate_by_model(range, field)?;

        // 存储实现已过滤排序；此处再收紧一次，保证调用方拿到的序列满足约定
        totals.retain(|t| t.total > 0);
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.model.label().cmp(b.model.label()))
        });
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductModel;
    use crate::engine::error::EngineError;
    use crate::engine::test_support::{fake_record, ts, FakeProductionStore};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> DateRange {
        DateRange::single_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_summary_only_counts_in_range() {
        let store = FakeProductionStore::with_records(vec![
            fake_record(1, ProductModel::Compressor20Plus, 10, 2, ts(2026, 5, 9, 10, 0)),
            fake_record(2, ProductModel::Compressor15Plus, 5, 1, ts(2026, 5, 10, 10, 0)),
        ]);
        let aggregator = ProductionAggregator::new(Arc::new(store));

        let summary = aggregator.summary(&day(2026, 5, 10)).unwrap();
        assert_eq!(summary.tested, 5);
        assert_eq!(summary.reworked, 1);

        let empty = aggregator.summary(&day(2026, 5, 11)).unwrap();
        assert_eq!(empty, ProductionSummary::default());
    }

    #[test]
    fn test_by_model_excludes_zero_and_sorts_desc() {
        let store = FakeProductionStore::with_records(vec![
            fake_record(1, ProductModel::Compressor10Red, 3, 0, ts(2026, 5, 10, 8, 0)),
            fake_record(2, ProductModel::Compressor20Plus, 8, 0, ts(2026, 5, 10, 9, 0)),
            fake_record(3, ProductModel::Compressor15Plus, 0, 0, ts(2026, 5, 10, 9, 30)),
        ]);
        let aggregator = ProductionAggregator::new(Arc::new(store));

        let result = aggregator.aggregate(&DateRange::Unbounded).unwrap();
        let models: Vec<ProductModel> = result.production_by_model.iter().map(|t| t.model).collect();
        assert_eq!(models, vec![ProductModel::Compressor20Plus, ProductModel::Compressor10Red]);
        assert!(result.rework_by_model.is_empty());
    }

    #[test]
    fn test_store_failure_aborts_aggregate() {
        let store = FakeProductionStore::default().failing_on_call(2);
        let aggregator = ProductionAggregator::new(Arc::new(store));

        let result = aggregator.aggregate(&DateRange::Unbounded);
        match result {
            Err(EngineError::Store(e)) => assert!(e.is_unavailable()),
            other => panic!("预期存储错误, 实际: {:?}", other),
        }
    }
}
