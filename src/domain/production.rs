// ==========================================
// 产线生产登记系统 - 生产记录领域模型
// ==========================================
// 对齐: production_record 表
// 生命周期: 仅插入 / 按ID删除 / 全部删除，无更新路径
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ProductModel;

/// 数据库时间戳格式（秒精度，本地时间）
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
// 红线: id 与 recorded_at 写入后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: i64,                   // 自增主键
    pub model: ProductModel,       // 产品型号

    // ===== 三道工序 =====
    pub assembly_operator: Option<String>,
    pub assembly_qty: u32,
    pub painting_operator: Option<String>,
    pub painting_qty: u32,
    pub testing_operator: Option<String>,
    pub testing_qty: u32,

    // ===== 返工 =====
    pub rework_operator: Option<String>,
    pub rework_qty: u32,

    pub note: Option<String>,      // 备注
    pub recorded_at: NaiveDateTime, // 登记时间（本地时间）
}

// ==========================================
// NewProductionRecord - 待插入的生产记录
// ==========================================
// 说明: 已通过校验的载荷，不含 id / 时间戳（由仓储在插入时生成）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProductionRecord {
    pub model: Option<ProductModel>,
    pub assembly_operator: Option<String>,
    pub assembly_qty: u32,
    pub painting_operator: Option<String>,
    pub painting_qty: u32,
    pub testing_operator: Option<String>,
    pub testing_qty: u32,
    pub rework_operator: Option<String>,
    pub rework_qty: u32,
    pub note: Option<String>,
}

impl NewProductionRecord {
    /// 以指定型号创建空记录（数量全部为 0）
    pub fn for_model(model: ProductModel) -> Self {
        Self {
            model: Some(model),
            ..Default::default()
        }
    }

    /// 三道工序是否至少有一道填写了数量
    pub fn has_stage_quantity(&self) -> bool {
        self.assembly_qty > 0 || self.painting_qty > 0 || self.testing_qty > 0
    }
}
