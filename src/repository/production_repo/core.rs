use crate::domain::production::{NewProductionRecord, RECORDED_AT_FORMAT};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ProductionRecordRepository - 生产记录仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct ProductionRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRecordRepository {
    /// 创建新的生产记录仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入生产记录
    ///
    /// # 参数
    /// - `record`: 已校验的待插入记录
    /// - `recorded_at`: 登记时间（写入后不可变）
    ///
    /// # 返回
    /// - `Ok(id)`: 新分配的自增 id
    /// - `Err(ValidationError)`: 型号缺失
    pub fn insert(
        &self,
        record: &NewProductionRecord,
        recorded_at: NaiveDateTime,
    ) -> RepositoryResult<i64> {
        let model = record
            .model
            .ok_or_else(|| RepositoryError::ValidationError("型号不能为空".to_string()))?;

        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO production_record (
                model, assembly_operator, assembly_qty,
                painting_operator, painting_qty,
                testing_operator, testing_qty,
                rework_operator, rework_qty,
                note, recorded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                model.to_db_str(),
                record.assembly_operator,
                record.assembly_qty,
                record.painting_operator,
                record.painting_qty,
                record.testing_operator,
                record.testing_qty,
                record.rework_operator,
                record.rework_qty,
                record.note,
                recorded_at.format(RECORDED_AT_FORMAT).to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, model = %model, "生产记录已登记");
        Ok(id)
    }

    /// 按 id 删除生产记录
    ///
    /// # 返回
    /// - Ok(rows): 被删除的行数（id 不存在时为 0，不报错）
    pub fn delete_by_id(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM production_record WHERE id = ?1", params![id])?;
        tracing::info!(id, rows, "删除生产记录");
        Ok(rows)
    }

    /// 清空全部生产记录
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM production_record", [])?;
        tracing::warn!(rows, "已清空全部生产记录");
        Ok(rows)
    }
}
