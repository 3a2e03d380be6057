// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

use production_tracker::api::{DashboardApi, ProductionApi};
use production_tracker::config::ConfigManager;
use production_tracker::domain::ProductModel;
use production_tracker::repository::{ProductionRecordRepository, ProductionStore};

use super::super::test_helpers;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub dashboard_api: Arc<DashboardApi>,
    pub production_api: Arc<ProductionApi>,

    // Repository层（用于测试数据准备）
    pub production_repo: Arc<ProductionRecordRepository>,
    pub config_manager: Arc<ConfigManager>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的测试环境
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_busy_timeout(Duration::from_millis(
            production_tracker::db::DEFAULT_BUSY_TIMEOUT_MS,
        ))
    }

    /// 创建测试环境并覆盖 busy_timeout（用于锁冲突测试）
    pub fn with_busy_timeout(timeout: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;

        let conn = production_tracker::db::open_sqlite_connection(&db_path)?;
        conn.busy_timeout(timeout)?;
        let conn = Arc::new(Mutex::new(conn));

        let production_repo = Arc::new(ProductionRecordRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone())?);
        // from_connection 会重新应用默认 PRAGMA，这里再覆盖一次
        conn.lock().map_err(|e| e.to_string())?.busy_timeout(timeout)?;

        let store: Arc<dyn ProductionStore> = production_repo.clone();

        Ok(Self {
            db_path,
            dashboard_api: Arc::new(DashboardApi::new(store.clone(), config_manager.clone())),
            production_api: Arc::new(ProductionApi::new(store, config_manager.clone())),
            production_repo,
            config_manager,
            _temp_file: temp_file,
        })
    }

    /// 直接插入一条记录（绕过表单校验）
    pub fn insert_at(
        &self,
        model: ProductModel,
        tested: u32,
        reworked: u32,
        recorded_at: NaiveDateTime,
    ) -> i64 {
        self.production_repo
            .insert(&test_helpers::new_record(model, tested, reworked), recorded_at)
            .expect("插入测试记录失败")
    }

    /// 打开同一数据库的另一条连接（模拟外部写入者）
    pub fn open_second_connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("无法打开第二条连接")
    }
}
