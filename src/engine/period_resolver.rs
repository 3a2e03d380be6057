// ==========================================
// 产线生产登记系统 - 周期解析器
// ==========================================
// 职责: 周期选择器 → 日期区间
// 说明: 纯函数（选择器 + 当前日期），无副作用
// ==========================================

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::period::{DateRange, PeriodSelector};
use crate::engine::error::{EngineError, EngineResult};

/// 指定日期的输入格式
pub const EXPLICIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// 选择器缺失或无法识别时采用的默认周期
pub const DEFAULT_PERIOD: PeriodSelector = PeriodSelector::Today;

impl PeriodSelector {
    /// 识别周期令牌（大小写不敏感，兼容旧版表单取值）
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "today" | "hoje" => Some(PeriodSelector::Today),
            "last-7-days" | "last_7_days" | "7dias" => Some(PeriodSelector::Last7Days),
            "this-month" | "this_month" | "mes" => Some(PeriodSelector::ThisMonth),
            "all-time" | "all_time" | "completo" => Some(PeriodSelector::AllTime),
            _ => None,
        }
    }

    /// 解析表单提交的周期
    ///
    /// # 规则
    /// 1. 可识别的周期令牌优先
    /// 2. 令牌本身是 YYYY-MM-DD 日期时按指定日期处理
    /// 3. 否则若提供了指定日期，按 YYYY-MM-DD 解析（失败返回 InvalidInput）
    /// 4. 否则回落到 DEFAULT_PERIOD
    ///
    /// # 参数
    /// - token: 周期令牌（可选）
    /// - explicit_date: 指定日期（可选）
    pub fn parse(token: Option<&str>, explicit_date: Option<&str>) -> EngineResult<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());

        if let Some(selector) = token.and_then(Self::from_token) {
            return Ok(selector);
        }

        if let Some(date) = token.and_then(|t| NaiveDate::parse_from_str(t, EXPLICIT_DATE_FORMAT).ok()) {
            return Ok(PeriodSelector::Date(date));
        }

        if let Some(raw) = explicit_date.map(str::trim).filter(|d| !d.is_empty()) {
            let date = NaiveDate::parse_from_str(raw, EXPLICIT_DATE_FORMAT).map_err(|e| {
                EngineError::InvalidInput(format!("日期格式错误（应为YYYY-MM-DD）: {} ({})", raw, e))
            })?;
            return Ok(PeriodSelector::Date(date));
        }

        if let Some(unknown) = token {
            tracing::warn!(token = unknown, default = %DEFAULT_PERIOD, "无法识别的周期令牌，使用默认周期");
        }

        Ok(DEFAULT_PERIOD)
    }
}

// ==========================================
// PeriodResolver - 周期解析器
// ==========================================
pub struct PeriodResolver;

impl PeriodResolver {
    /// 将选择器解析为日期区间
    ///
    /// # 参数
    /// - selector: 周期选择器
    /// - today: 当前本地日期
    pub fn resolve(selector: PeriodSelector, today: NaiveDate) -> DateRange {
        match selector {
            PeriodSelector::Today => DateRange::single_day(today),
            PeriodSelector::Last7Days => DateRange::Bounded {
                start: today - Duration::days(6),
                end: today,
            },
            PeriodSelector::ThisMonth => DateRange::Bounded {
                start: today.with_day(1).unwrap_or(today),
                end: today,
            },
            PeriodSelector::AllTime => DateRange::Unbounded,
            PeriodSelector::Date(date) => DateRange::single_day(date),
        }
    }
}
