// ==========================================
// 产线生产登记系统 - 报表组装器
// ==========================================
// 职责: 聚合结果 + 明细 → 指标卡片 / 图表序列 / 历史行 / ID 列表 / 导出行
// 红线: 任一存储调用失败则整体失败，不返回部分报表
// ==========================================

use std::sync::Arc;

use crate::domain::period::DateRange;
use crate::domain::production::ProductionRecord;
use crate::domain::report::{ChartSeries, DashboardReport, HistoryRow};
use crate::engine::aggregator::ProductionAggregator;
use crate::engine::error::EngineResult;
use crate::engine::formatting::MetricsFormatter;
use crate::repository::production_store::ProductionStore;

/// 历史行时间显示格式
pub const HISTORY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

// ==========================================
// ReportAssembler - 报表组装器
// ==========================================
pub struct ReportAssembler {
    store: Arc<dyn ProductionStore>,
    aggregator: ProductionAggregator,
    formatter: MetricsFormatter,
}

impl ReportAssembler {
    pub fn new(store: Arc<dyn ProductionStore>, formatter: MetricsFormatter) -> Self {
        Self {
            aggregator: ProductionAggregator::new(store.clone()),
            store,
            formatter,
        }
    }

    /// 组装看板报表
    pub fn assemble(&self, range: &DateRange) -> EngineResult<DashboardReport> {
        let aggregated = self.aggregator.aggregate(range)?;
        let history = self.history(range)?;
        let record_ids = history.iter().map(|row| row.id).collect();

        tracing::debug!(range = ?range, rows = history.len(), "看板报表组装完成");

        Ok(DashboardReport {
            range: *range,
            metrics: self.formatter.metrics(&aggregated.summary),
            summary: aggregated.summary,
            production_by_model: ChartSeries::new(aggregated.production_by_model),
            rework_by_model: ChartSeries::new(aggregated.rework_by_model),
            history,
            record_ids,
        })
    }

    /// 区间历史行（时间倒序，同一时刻按 id 倒序）
    pub fn history(&self, range: &DateRange) -> EngineResult<Vec<HistoryRow>> {
        let mut records = self.store.find_in_range(range)?;
        records.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records.iter().map(to_history_row).collect())
    }

    /// 导出行（始终为全部历史）
    pub fn export_rows(&self) -> EngineResult<Vec<HistoryRow>> {
        self.history(&DateRange::Unbounded)
    }
}

/// 记录 → 历史行
pub fn to_history_row(record: &ProductionRecord) -> HistoryRow {
    HistoryRow {
        id: record.id,
        model: record.model.label().to_string(),
        assembly_operator: record.assembly_operator.clone(),
        assembly_qty: record.assembly_qty,
        painting_operator: record.painting_operator.clone(),
        painting_qty: record.painting_qty,
        testing_operator: record.testing_operator.clone(),
        testing_qty: record.testing_qty,
        rework_operator: record.rework_operator.clone(),
        rework_qty: record.rework_qty,
        note: record.note.clone(),
        recorded_at: record.recorded_at.format(HISTORY_TIME_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductModel;
    use crate::engine::error::EngineError;
    use crate::engine::test_support::{fake_record, ts, FakeProductionStore};
    use chrono::NaiveDate;

    fn assembler(store: FakeProductionStore) -> ReportAssembler {
        ReportAssembler::new(Arc::new(store), MetricsFormatter::default())
    }

    #[test]
    fn test_assemble_today_scenario() {
        // 昨天 20+ 测试 10 返工 2；今天 15+ 测试 5 返工 1
        let store = FakeProductionStore::with_records(vec![
            fake_record(1, ProductModel::Compressor20Plus, 10, 2, ts(2026, 5, 9, 14, 0)),
            fake_record(2, ProductModel::Compressor15Plus, 5, 1, ts(2026, 5, 10, 9, 15)),
        ]);
        let today = DateRange::single_day(NaiveDate::from_ymd_opt(2026, 5, 10).unwrap());

        let report = assembler(store).assemble(&today).unwrap();
        assert_eq!(report.summary.tested, 5);
        assert_eq!(report.metrics.rework_rate, "20.0%");
        assert_eq!(report.production_by_model.labels, vec!["Unidade Compressora 15+"]);
        assert_eq!(report.rework_by_model.values, vec![1]);
        assert_eq!(report.record_ids, vec![2]);
        assert_eq!(report.history[0].recorded_at, "10/05/2026 09:15");
    }

    #[test]
    fn test_assemble_all_time_scenario() {
        let store = FakeProductionStore::with_records(vec![
            fake_record(1, ProductModel::Compressor20Plus, 10, 2, ts(2026, 5, 9, 14, 0)),
            fake_record(2, ProductModel::Compressor15Plus, 5, 1, ts(2026, 5, 10, 9, 15)),
        ]);

        let report = assembler(store).assemble(&DateRange::Unbounded).unwrap();
        assert_eq!(report.summary.tested, 15);
        assert_eq!(report.summary.reworked, 3);
        assert_eq!(report.metrics.rework_rate, "20.0%");
        assert_eq!(report.production_by_model.values, vec![10, 5]);
        assert_eq!(report.record_ids, vec![2, 1]);
    }

    #[test]
    fn test_history_ties_broken_by_id_desc() {
        let same = ts(2026, 5, 10, 9, 0);
        let store = FakeProductionStore::with_records(vec![
            fake_record(4, ProductModel::Compressor10Red, 1, 0, same),
            fake_record(7, ProductModel::Compressor10Red, 1, 0, same),
            fake_record(5, ProductModel::Compressor10Red, 1, 0, ts(2026, 5, 10, 10, 0)),
        ]);

        let report = assembler(store).assemble(&DateRange::Unbounded).unwrap();
        assert_eq!(report.record_ids, vec![5, 7, 4]);
    }

    #[test]
    fn test_assemble_empty_store() {
        let report = assembler(FakeProductionStore::default())
            .assemble(&DateRange::Unbounded)
            .unwrap();
        assert_eq!(report.metrics.total_tested, "0");
        assert_eq!(report.metrics.rework_rate, "0.0%");
        assert!(report.production_by_model.is_empty());
        assert!(report.rework_by_model.is_empty());
        assert!(report.history.is_empty());
        assert!(report.record_ids.is_empty());
    }

    #[test]
    fn test_history_failure_yields_no_partial_report() {
        // 前三次聚合成功，第四次（明细查询）失败
        let store = FakeProductionStore::with_records(vec![fake_record(
            1,
            ProductModel::Compressor20Plus,
            3,
            0,
            ts(2026, 5, 10, 9, 0),
        )])
        .failing_on_call(4);

        let result = assembler(store).assemble(&DateRange::Unbounded);
        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[test]
    fn test_export_rows_ignore_period() {
        let store = FakeProductionStore::with_records(vec![
            fake_record(1, ProductModel::Compressor20Plus, 10, 2, ts(2020, 1, 1, 8, 0)),
            fake_record(2, ProductModel::Compressor15Plus, 5, 1, ts(2026, 5, 10, 9, 15)),
        ]);

        let rows = assembler(store).export_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].model, "Unidade Compressora 20+");
        assert_eq!(rows[1].recorded_at, "01/01/2020 08:00");
    }
}
