use super::core::ProductionRecordRepository;
use crate::domain::period::DateRange;
use crate::domain::production::{ProductionRecord, RECORDED_AT_FORMAT};
use crate::domain::report::{ModelTotal, ProductionSummary};
use crate::domain::types::{AggregateField, ProductModel};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Result as SqliteResult, Row};

const SELECT_COLUMNS: &str = r#"
    SELECT id, model, assembly_operator, assembly_qty,
           painting_operator, painting_qty,
           testing_operator, testing_qty,
           rework_operator, rework_qty,
           note, recorded_at
    FROM production_record
"#;

/// 区间过滤条件
///
/// # 返回
/// - (条件片段, 参数): Unbounded 时条件为空
fn range_filter(range: &DateRange) -> (&'static str, Vec<String>) {
    match range.timestamp_bounds() {
        Some((from, to)) => (
            "recorded_at BETWEEN ? AND ?",
            vec![
                from.format(RECORDED_AT_FORMAT).to_string(),
                to.format(RECORDED_AT_FORMAT).to_string(),
            ],
        ),
        None => ("", Vec::new()),
    }
}

/// SUM 结果转换（负数视为数据异常，按 0 处理）
fn to_total(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

fn conversion_error(idx: usize, field: &str, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(RepositoryError::FieldValueError {
            field: field.to_string(),
            message,
        }),
    )
}

fn parse_model(idx: usize, raw: &str) -> SqliteResult<ProductModel> {
    ProductModel::from_label(raw)
        .ok_or_else(|| conversion_error(idx, "model", format!("未知型号: {}", raw)))
}

impl ProductionRecordRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 id 查询单条记录
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProductionRecord>> {
        let conn = self.get_conn()?;

        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![id], |row| self.map_row(row)) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询区间内的全部记录
    ///
    /// 排序: recorded_at 倒序，同一秒内按 id 倒序
    pub fn find_in_range(&self, range: &DateRange) -> RepositoryResult<Vec<ProductionRecord>> {
        let conn = self.get_conn()?;
        let (filter, args) = range_filter(range);

        let mut sql = SELECT_COLUMNS.to_string();
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        sql.push_str(" ORDER BY recorded_at DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(args.iter()), |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 统计区间内的记录数
    pub fn count_in_range(&self, range: &DateRange) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let (filter, args) = range_filter(range);

        let mut sql = "SELECT COUNT(*) FROM production_record".to_string();
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }

        let count: i64 = conn.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))?;
        Ok(count)
    }

    // ==========================================
    // 聚合操作
    // ==========================================

    /// 区间汇总
    ///
    /// COALESCE 保证无匹配记录时返回 0
    pub fn aggregate_sums(&self, range: &DateRange) -> RepositoryResult<ProductionSummary> {
        let conn = self.get_conn()?;
        let (filter, args) = range_filter(range);

        let mut sql = r#"
            SELECT COALESCE(SUM(assembly_qty), 0),
                   COALESCE(SUM(painting_qty), 0),
                   COALESCE(SUM(testing_qty), 0),
                   COALESCE(SUM(rework_qty), 0)
            FROM production_record
        "#
        .to_string();
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }

        let summary = conn.query_row(&sql, params_from_iter(args.iter()), |row| {
            Ok(ProductionSummary {
                assembled: to_total(row.get(0)?),
                painted: to_total(row.get(1)?),
                tested: to_total(row.get(2)?),
                reworked: to_total(row.get(3)?),
            })
        })?;

        Ok(summary)
    }

    /// 按型号汇总
    ///
    /// - 仅统计该字段 > 0 的记录
    /// - 结果按合计倒序，合计相同按型号名升序
    pub fn aggregate_by_model(
        &self,
        range: &DateRange,
        field: AggregateField,
    ) -> RepositoryResult<Vec<ModelTotal>> {
        let conn = self.get_conn()?;
        let (filter, args) = range_filter(range);
        let column = field.column();

        let mut sql = format!(
            "SELECT model, SUM({col}) AS total FROM production_record WHERE {col} > 0",
            col = column
        );
        if !filter.is_empty() {
            sql.push_str(" AND ");
            sql.push_str(filter);
        }
        sql.push_str(" GROUP BY model HAVING total > 0 ORDER BY total DESC, model ASC");

        let mut stmt = conn.prepare(&sql)?;
        let totals = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                let raw_model: String = row.get(0)?;
                Ok(ModelTotal {
                    model: parse_model(0, &raw_model)?,
                    total: to_total(row.get(1)?),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(totals)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 将数据库行映射为 ProductionRecord 实体
    fn map_row(&self, row: &Row) -> SqliteResult<ProductionRecord> {
        let id: i64 = row.get(0)?;
        let model_str: String = row.get(1)?;
        let recorded_at_str: String = row.get(11)?;

        let model = parse_model(1, &model_str)?;

        // 解析时间戳
        let recorded_at = NaiveDateTime::parse_from_str(&recorded_at_str, RECORDED_AT_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(e)))?;

        // 历史数据中数量可能为 NULL，按 0 处理
        let qty = |idx: usize| -> SqliteResult<u32> {
            Ok(row.get::<_, Option<u32>>(idx)?.unwrap_or(0))
        };

        Ok(ProductionRecord {
            id,
            model,
            assembly_operator: row.get(2)?,
            assembly_qty: qty(3)?,
            painting_operator: row.get(4)?,
            painting_qty: qty(5)?,
            testing_operator: row.get(6)?,
            testing_qty: qty(7)?,
            rework_operator: row.get(8)?,
            rework_qty: qty(9)?,
            note: row.get(10)?,
            recorded_at,
        })
    }
}
