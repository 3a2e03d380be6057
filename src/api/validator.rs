// ==========================================
// 产线生产登记系统 - 登记表单校验器
// ==========================================
// 职责: 表单字段存在性检查与类型转换
// 说明: 只做存在性/类型校验，不做业务合理性校验（如返工 ≤ 测试）
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::production::NewProductionRecord;
use crate::domain::types::ProductModel;

// ==========================================
// ProductionForm - 登记表单（原始输入）
// ==========================================
// 字段均为可选字符串；数字形式的 JSON 值也接受
// 别名兼容旧版表单字段名
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionForm {
    #[serde(default, alias = "modelo", deserialize_with = "lenient_string")]
    pub model: Option<String>,

    #[serde(default, alias = "op_montagem", deserialize_with = "lenient_string")]
    pub assembly_operator: Option<String>,
    #[serde(default, alias = "qty_montado", deserialize_with = "lenient_string")]
    pub assembly_qty: Option<String>,

    #[serde(default, alias = "op_pintura", deserialize_with = "lenient_string")]
    pub painting_operator: Option<String>,
    #[serde(default, alias = "qty_pintado", deserialize_with = "lenient_string")]
    pub painting_qty: Option<String>,

    #[serde(default, alias = "op_teste", deserialize_with = "lenient_string")]
    pub testing_operator: Option<String>,
    #[serde(default, alias = "qty_testado", deserialize_with = "lenient_string")]
    pub testing_qty: Option<String>,

    #[serde(default, alias = "op_retrabalho", deserialize_with = "lenient_string")]
    pub rework_operator: Option<String>,
    #[serde(default, alias = "retrabalho", deserialize_with = "lenient_string")]
    pub rework_qty: Option<String>,

    #[serde(default, alias = "observacao", deserialize_with = "lenient_string")]
    pub note: Option<String>,
}

/// 接受字符串 / 数字 / null
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ==========================================
// ProductionFormValidator - 表单校验器
// ==========================================
pub struct ProductionFormValidator;

impl ProductionFormValidator {
    /// 校验并转换表单
    ///
    /// # 规则
    /// - 型号缺失/未知 → ValidationError
    /// - 数量缺失或空白 → 0；非整数或负数 → InvalidInput
    /// - 操作员/备注空白 → None
    /// - 三道工序数量全为 0 → ValidationError
    pub fn validate(form: &ProductionForm) -> ApiResult<NewProductionRecord> {
        let model = Self::parse_model(form.model.as_deref())?;

        let record = NewProductionRecord {
            model: Some(model),
            assembly_operator: normalize_text(form.assembly_operator.as_deref()),
            assembly_qty: parse_quantity("assembly_qty", form.assembly_qty.as_deref())?,
            painting_operator: normalize_text(form.painting_operator.as_deref()),
            painting_qty: parse_quantity("painting_qty", form.painting_qty.as_deref())?,
            testing_operator: normalize_text(form.testing_operator.as_deref()),
            testing_qty: parse_quantity("testing_qty", form.testing_qty.as_deref())?,
            rework_operator: normalize_text(form.rework_operator.as_deref()),
            rework_qty: parse_quantity("rework_qty", form.rework_qty.as_deref())?,
            note: normalize_text(form.note.as_deref()),
        };

        if !record.has_stage_quantity() {
            return Err(ApiError::ValidationError(
                "请至少填写一道工序的数量".to_string(),
            ));
        }

        Ok(record)
    }

    fn parse_model(raw: Option<&str>) -> ApiResult<ProductModel> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::ValidationError("请选择产品型号".to_string()))?;

        ProductModel::from_label(raw)
            .ok_or_else(|| ApiError::ValidationError(format!("未知产品型号: {}", raw)))
    }
}

/// 数量转换: 缺失/空白 → 0
pub fn parse_quantity(field: &str, raw: Option<&str>) -> ApiResult<u32> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(s) => s,
    };

    let value: i64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("{}不是整数: {}", field, raw)))?;

    if value < 0 {
        return Err(ApiError::InvalidInput(format!("{}不能为负数: {}", field, value)));
    }

    u32::try_from(value)
        .map_err(|_| ApiError::InvalidInput(format!("{}超出范围: {}", field, value)))
}

/// 文本规整: 空白 → None
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
