// ==========================================
// 产线生产登记系统 - 领域类型定义
// ==========================================
// 职责: 产品型号枚举、聚合字段枚举
// 红线: 型号为固定枚举集合，不允许自由文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 产品型号 (Product Model)
// ==========================================
// 存储格式: 显示名称（与历史数据、导出表格一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductModel {
    Compressor20Plus, // 压缩机组 20+
    Compressor15Plus, // 压缩机组 15+
    Compressor10Red,  // 压缩机组 10 RED
}

impl ProductModel {
    /// 全部型号（表单下拉顺序）
    pub const ALL: [ProductModel; 3] = [
        ProductModel::Compressor20Plus,
        ProductModel::Compressor15Plus,
        ProductModel::Compressor10Red,
    ];

    /// 显示名称（同时也是数据库存储值）
    pub fn label(&self) -> &'static str {
        match self {
            ProductModel::Compressor20Plus => "Unidade Compressora 20+",
            ProductModel::Compressor15Plus => "Unidade Compressora 15+",
            ProductModel::Compressor10Red => "Unidade Compressora 10 RED",
        }
    }

    /// 从显示名称或枚举代码解析
    ///
    /// 未知型号返回 None（由调用方决定报错方式）
    pub fn from_label(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if let Some(model) = Self::ALL.iter().find(|m| m.label() == trimmed) {
            return Some(*model);
        }
        match trimmed.to_uppercase().as_str() {
            "COMPRESSOR20_PLUS" => Some(ProductModel::Compressor20Plus),
            "COMPRESSOR15_PLUS" => Some(ProductModel::Compressor15Plus),
            "COMPRESSOR10_RED" => Some(ProductModel::Compressor10Red),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }
}

impl fmt::Display for ProductModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 按型号聚合的字段 (Aggregate Field)
// ==========================================
// 用途: aggregate_by_model 的被汇总列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateField {
    Tested,  // 测试数量 → 产量口径
    Reworked, // 返工数量
}

impl AggregateField {
    /// 对应的数据库列名（白名单，仅此两列可拼入 SQL）
    pub fn column(&self) -> &'static str {
        match self {
            AggregateField::Tested => "testing_qty",
            AggregateField::Reworked => "rework_qty",
        }
    }
}

impl fmt::Display for AggregateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateField::Tested => write!(f, "TESTED"),
            AggregateField::Reworked => write!(f, "REWORKED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_label_roundtrip() {
        for model in ProductModel::ALL {
            assert_eq!(ProductModel::from_label(model.label()), Some(model));
        }
    }

    #[test]
    fn test_model_from_code_and_unknown() {
        assert_eq!(
            ProductModel::from_label("compressor10_red"),
            Some(ProductModel::Compressor10Red)
        );
        assert_eq!(ProductModel::from_label("  Unidade Compressora 15+ "), Some(ProductModel::Compressor15Plus));
        assert_eq!(ProductModel::from_label("Unidade Compressora 99"), None);
        assert_eq!(ProductModel::from_label(""), None);
    }

    #[test]
    fn test_aggregate_field_columns() {
        assert_eq!(AggregateField::Tested.column(), "testing_qty");
        assert_eq!(AggregateField::Reworked.column(), "rework_qty");
    }
}
