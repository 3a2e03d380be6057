// ==========================================
// 产线生产登记系统 - 生产登记 API
// ==========================================
// 职责: 登记、按 ID 删除、清空、表单选项
// 说明: 记录无更新路径
// ==========================================

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator::{ProductionForm, ProductionFormValidator};
use crate::config::ConfigManager;
use crate::domain::types::ProductModel;
use crate::repository::production_store::ProductionStore;

/// 登记表单选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOptions {
    pub models: Vec<String>,
    pub operators: Vec<String>,
}

// ==========================================
// ProductionApi - 生产登记 API
// ==========================================
pub struct ProductionApi {
    store: Arc<dyn ProductionStore>,
    config: Arc<ConfigManager>,
}

impl ProductionApi {
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<ConfigManager>) -> Self {
        Self { store, config }
    }

    /// 登记一条生产记录
    ///
    /// # 参数
    /// - form: 原始表单
    /// - now: 登记时间（截断到秒）
    ///
    /// # 返回
    /// - Ok(id): 新记录 ID
    /// - Err(ValidationError): 型号缺失/未知、三道工序数量全为 0
    /// - Err(InvalidInput): 数量格式错误
    pub fn register(&self, form: &ProductionForm, now: NaiveDateTime) -> ApiResult<i64> {
        let record = ProductionFormValidator::validate(form)?;
        let recorded_at = now.with_nanosecond(0).unwrap_or(now);

        let id = self.store.insert(&record, recorded_at)?;
        Ok(id)
    }

    /// 按 ID 删除（幂等，返回删除行数）
    pub fn delete(&self, id: i64) -> ApiResult<usize> {
        let affected = self.store.delete_by_id(id)?;
        if affected == 0 {
            tracing::debug!(id, "待删除记录不存在");
        }
        Ok(affected)
    }

    /// 清空全部记录
    pub fn clear_all(&self) -> ApiResult<usize> {
        Ok(self.store.delete_all()?)
    }

    /// 表单选项：型号 + 配置的操作员
    pub fn form_options(&self) -> ApiResult<FormOptions> {
        Ok(FormOptions {
            models: ProductModel::ALL.iter().map(|m| m.label().to_string()).collect(),
            operators: self.config.get_operators()?,
        })
    }
}
