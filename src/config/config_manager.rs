// ==========================================
// 产线生产登记系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::open_sqlite_connection;
use crate::domain::period::PeriodSelector;
use crate::engine::formatting::{MetricsFormatter, DEFAULT_THOUSANDS_SEPARATOR, DEFAULT_UNIT_SUFFIX};
use crate::engine::period_resolver::DEFAULT_PERIOD;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 产线默认操作员
pub const DEFAULT_OPERATORS: [&str; 7] = [
    "GILSON ROBERTO DE OLIVEIRA",
    "JÚLIO BONANCIM SILVA",
    "FELIPE DOMINGOS MOREIRA",
    "LUIZ HENRIQUE DE JESUS MARQUES",
    "RAFAEL BARROSO MARQUES",
    "JOÃO VITOR DA SILVA",
    "KEOLIN MIRELA FERRERA",
];

pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 已提供翻译的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["pt-BR", "en", "zh-CN"];

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值（空白值视为未配置）
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(RepositoryError::ValidationError("配置键不能为空".to_string()));
        }

        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式，键有序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(format!("配置快照序列化失败: {}", e)))
    }

    // ===== 显示配置 =====

    /// 界面/导出语言（未提供翻译的语言回落到默认）
    pub fn get_locale(&self) -> RepositoryResult<String> {
        let value = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)?;
        let value = value.trim();
        if SUPPORTED_LOCALES.contains(&value) {
            return Ok(value.to_string());
        }

        tracing::warn!(
            config_key = config_keys::LOCALE,
            raw_value = %value,
            "不支持的语言配置，使用默认语言"
        );
        Ok(DEFAULT_LOCALE.to_string())
    }

    /// 千分位分隔符（允许单个空格）
    pub fn get_thousands_separator(&self) -> RepositoryResult<String> {
        let value = self.get_config_value(config_keys::THOUSANDS_SEPARATOR)?;
        Ok(match value {
            Some(v) if !v.is_empty() && v.chars().count() <= 1 => v,
            Some(v) => {
                tracing::warn!(
                    config_key = config_keys::THOUSANDS_SEPARATOR,
                    raw_value = %v,
                    "千分位分隔符配置格式错误，使用默认值"
                );
                DEFAULT_THOUSANDS_SEPARATOR.to_string()
            }
            None => DEFAULT_THOUSANDS_SEPARATOR.to_string(),
        })
    }

    /// 件数单位后缀
    pub fn get_unit_suffix(&self) -> RepositoryResult<String> {
        let value = self.get_config_or_default(config_keys::UNIT_SUFFIX, DEFAULT_UNIT_SUFFIX)?;
        Ok(value.trim().to_string())
    }

    /// 指标格式化器（按当前配置）
    pub fn metrics_formatter(&self) -> RepositoryResult<MetricsFormatter> {
        Ok(MetricsFormatter::new(
            &self.get_thousands_separator()?,
            &self.get_unit_suffix()?,
        ))
    }

    // ===== 登记表单配置 =====

    /// 操作员列表（逗号分隔）
    pub fn get_operators(&self) -> RepositoryResult<Vec<String>> {
        let value = self.get_config_value(config_keys::OPERATORS)?;

        let operators: Vec<String> = value
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if operators.is_empty() {
            Ok(DEFAULT_OPERATORS.iter().map(|s| s.to_string()).collect())
        } else {
            Ok(operators)
        }
    }

    /// 看板默认周期
    pub fn get_default_period(&self) -> RepositoryResult<PeriodSelector> {
        let value = self.get_config_value(config_keys::DEFAULT_PERIOD)?;
        let Some(raw) = value else {
            return Ok(DEFAULT_PERIOD);
        };

        Ok(PeriodSelector::from_token(&raw).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_PERIOD,
                raw_value = %raw,
                "默认周期配置无法识别，使用今天"
            );
            DEFAULT_PERIOD
        }))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 显示
    pub const LOCALE: &str = "locale";
    pub const THOUSANDS_SEPARATOR: &str = "thousands_separator";
    pub const UNIT_SUFFIX: &str = "unit_suffix";

    // 登记表单
    pub const OPERATORS: &str = "operators";

    // 看板
    pub const DEFAULT_PERIOD: &str = "default_period";
}
