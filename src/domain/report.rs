// ==========================================
// 产线生产登记系统 - 报表结构
// ==========================================
// 职责: 汇总结果、按型号合计、指标视图、图表序列、历史行
// 说明: 全部为强类型结构，替代字典形式的查询结果
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::period::DateRange;
use crate::domain::types::ProductModel;

// ==========================================
// ProductionSummary - 周期汇总
// ==========================================
// 无匹配记录时全部为 0（不是 null）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub assembled: u64, // 装配合计
    pub painted: u64,   // 喷涂合计
    pub tested: u64,    // 测试合计（产量口径）
    pub reworked: u64,  // 返工合计
}

impl ProductionSummary {
    /// 返工率（百分比）
    ///
    /// tested = 0 时定义为 0，避免除零
    pub fn rework_rate(&self) -> f64 {
        if self.tested == 0 {
            0.0
        } else {
            self.reworked as f64 / self.tested as f64 * 100.0
        }
    }
}

// ==========================================
// ModelTotal - 按型号合计
// ==========================================
// 对外序列化为型号显示名，与历史行一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTotal {
    #[serde(serialize_with = "serialize_model_label", deserialize_with = "deserialize_model_label")]
    pub model: ProductModel,
    pub total: u64,
}

fn serialize_model_label<S: Serializer>(model: &ProductModel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(model.label())
}

fn deserialize_model_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ProductModel, D::Error> {
    let raw = String::deserialize(deserializer)?;
    ProductModel::from_label(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("未知型号: {}", raw)))
}

// ==========================================
// AggregateResult - 聚合器输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub summary: ProductionSummary,
    pub production_by_model: Vec<ModelTotal>,
    pub rework_by_model: Vec<ModelTotal>,
}

// ==========================================
// MetricsView - 指标卡片
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsView {
    pub total_assembled: String,  // 千分位分组
    pub total_painted: String,
    pub total_tested: String,
    pub rework_rate: String,      // 一位小数百分比
    pub rework_units: String,     // 带单位的返工件数
    pub rework_rate_value: f64,   // 未格式化的返工率
}

// ==========================================
// ChartSeries - 图表序列
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<ModelTotal>,
    pub labels: Vec<String>, // 横轴标签（型号显示名）
    pub values: Vec<u64>,
    pub shares: Vec<f64>,    // 各型号占比（百分比，饼图用）
}

impl ChartSeries {
    pub fn new(points: Vec<ModelTotal>) -> Self {
        let labels = points.iter().map(|p| p.model.label().to_string()).collect();
        let values: Vec<u64> = points.iter().map(|p| p.total).collect();
        let sum: u64 = values.iter().sum();
        let shares = values
            .iter()
            .map(|v| {
                if sum == 0 {
                    0.0
                } else {
                    *v as f64 / sum as f64 * 100.0
                }
            })
            .collect();

        Self {
            points,
            labels,
            values,
            shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ==========================================
// HistoryRow - 历史明细行（同时用于导出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: i64,
    pub model: String,
    pub assembly_operator: Option<String>,
    pub assembly_qty: u32,
    pub painting_operator: Option<String>,
    pub painting_qty: u32,
    pub testing_operator: Option<String>,
    pub testing_qty: u32,
    pub rework_operator: Option<String>,
    pub rework_qty: u32,
    pub note: Option<String>,
    pub recorded_at: String, // dd/mm/YYYY HH:MM
}

// ==========================================
// DashboardReport - 看板报表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub range: DateRange,
    pub summary: ProductionSummary,
    pub metrics: MetricsView,
    pub production_by_model: ChartSeries,
    pub rework_by_model: ChartSeries,
    pub history: Vec<HistoryRow>,
    pub record_ids: Vec<i64>,
}
