// ==========================================
// 引擎层单元测试用的内存存储
// ==========================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::period::DateRange;
use crate::domain::production::{NewProductionRecord, ProductionRecord};
use crate::domain::report::{ModelTotal, ProductionSummary};
use crate::domain::types::{AggregateField, ProductModel};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::production_store::ProductionStore;

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn fake_record(
    id: i64,
    model: ProductModel,
    tested: u32,
    reworked: u32,
    recorded_at: NaiveDateTime,
) -> ProductionRecord {
    ProductionRecord {
        id,
        model,
        assembly_operator: Some("GILSON".to_string()),
        assembly_qty: tested,
        painting_operator: None,
        painting_qty: tested,
        testing_operator: Some("FELIPE".to_string()),
        testing_qty: tested,
        rework_operator: None,
        rework_qty: reworked,
        note: None,
        recorded_at,
    }
}

pub struct FakeProductionStore {
    pub records: Mutex<Vec<ProductionRecord>>,
    pub calls: AtomicU64,
    /// 第 N 次调用（从 1 开始）返回 LockError
    pub fail_on_call: Option<u64>,
}

impl Default for FakeProductionStore {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            calls: AtomicU64::new(0),
            fail_on_call: None,
        }
    }
}

impl FakeProductionStore {
    pub fn with_records(records: Vec<ProductionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn failing_on_call(mut self, n: u64) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    fn tick(&self) -> RepositoryResult<()> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if self.fail_on_call == Some(n) {
            return Err(RepositoryError::LockError("fake store offline".to_string()));
        }
        Ok(())
    }

    fn in_range(&self, range: &DateRange) -> Vec<ProductionRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| range.contains(&r.recorded_at))
            .cloned()
            .collect()
    }
}

impl ProductionStore for FakeProductionStore {
    fn insert(&self, record: &NewProductionRecord, recorded_at: NaiveDateTime) -> RepositoryResult<i64> {
        self.tick()?;
        let model = record
            .model
            .ok_or_else(|| RepositoryError::ValidationError("model missing".to_string()))?;
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(ProductionRecord {
            id,
            model,
            assembly_operator: record.assembly_operator.clone(),
            assembly_qty: record.assembly_qty,
            painting_operator: record.painting_operator.clone(),
            painting_qty: record.painting_qty,
            testing_operator: record.testing_operator.clone(),
            testing_qty: record.testing_qty,
            rework_operator: record.rework_operator.clone(),
            rework_qty: record.rework_qty,
            note: record.note.clone(),
            recorded_at,
        });
        Ok(id)
    }

    fn delete_by_id(&self, id: i64) -> RepositoryResult<usize> {
        self.tick()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(before - records.len())
    }

    fn delete_all(&self) -> RepositoryResult<usize> {
        self.tick()?;
        let mut records = self.records.lock().unwrap();
        let n = records.len();
        records.clear();
        Ok(n)
    }

    fn find_in_range(&self, range: &DateRange) -> RepositoryResult<Vec<ProductionRecord>> {
        self.tick()?;
        Ok(self.in_range(range))
    }

    fn aggregate_sums(&self, range: &DateRange) -> RepositoryResult<ProductionSummary> {
        self.tick()?;
        let mut summary = ProductionSummary::default();
        for r in self.in_range(range) {
            summary.assembled += u64::from(r.assembly_qty);
            summary.painted += u64::from(r.painting_qty);
            summary.tested += u64::from(r.testing_qty);
            summary.reworked += u64::from(r.rework_qty);
        }
        Ok(summary)
    }

    fn aggregate_by_model(
        &self,
        range: &DateRange,
        field: AggregateField,
    ) -> RepositoryResult<Vec<ModelTotal>> {
        self.tick()?;
        // 故意不排序，由聚合器负责
        let mut totals: Vec<ModelTotal> = Vec::new();
        for r in self.in_range(range) {
            let qty = match field {
                AggregateField::Tested => r.testing_qty,
                AggregateField::Reworked => r.rework_qty,
            };
            if qty == 0 {
                continue;
            }
            match totals.iter_mut().find(|t| t.model == r.model) {
                Some(t) => t.total += u64::from(qty),
                None => totals.push(ModelTotal {
                    model: r.model,
                    total: u64::from(qty),
                }),
            }
        }
        Ok(totals)
    }
}
