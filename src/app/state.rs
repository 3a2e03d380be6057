// ==========================================
// 产线生产登记系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, ProductionApi};
use crate::config::config_manager::ConfigManager;
use crate::repository::production_repo::ProductionRecordRepository;
use crate::repository::production_store::ProductionStore;

/// 指定数据库路径的环境变量
pub const ENV_DB_PATH: &str = "PRODUCTION_TRACKER_DB_PATH";

const DB_FILE_NAME: &str = "production_tracker.db";

/// 应用状态
///
/// 包含所有API实例和共享资源（单一共享连接）
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生产记录仓储
    pub production_repo: Arc<ProductionRecordRepository>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,

    /// 生产登记API
    pub production_api: Arc<ProductionApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动创建并建表）
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let mut conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::perf::install_sqlite_tracing(&mut conn);
        crate::db::init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层 / 配置
        // ==========================================
        let production_repo = Arc::new(ProductionRecordRepository::new(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let store: Arc<dyn ProductionStore> = production_repo.clone();
        let dashboard_api = Arc::new(DashboardApi::new(store.clone(), config_manager.clone()));
        let production_api = Arc::new(ProductionApi::new(store, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            production_repo,
            config_manager,
            dashboard_api,
            production_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级：环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        let app_dir = if cfg!(debug_assertions) {
            data_dir.join("production-tracker-dev")
        } else {
            data_dir.join("production-tracker")
        };

        match std::fs::create_dir_all(&app_dir) {
            Ok(()) => path = app_dir.join(DB_FILE_NAME),
            Err(e) => tracing::warn!(
                dir = %app_dir.display(),
                error = %e,
                "无法创建数据目录，使用当前目录"
            ),
        }
    }

    path.to_string_lossy().to_string()
}
