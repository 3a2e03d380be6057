// ==========================================
// 产线生产登记系统 - 指标格式化
// ==========================================
// 职责: 千分位分组、一位小数百分比、带单位件数
// ==========================================

use crate::domain::report::{MetricsView, ProductionSummary};

pub const DEFAULT_THOUSANDS_SEPARATOR: &str = ".";
pub const DEFAULT_UNIT_SUFFIX: &str = "pçs";

/// 指标格式化器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsFormatter {
    thousands_separator: String,
    unit_suffix: String,
}

impl Default for MetricsFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_THOUSANDS_SEPARATOR, DEFAULT_UNIT_SUFFIX)
    }
}

impl MetricsFormatter {
    pub fn new(thousands_separator: &str, unit_suffix: &str) -> Self {
        Self {
            thousands_separator: thousands_separator.to_string(),
            unit_suffix: unit_suffix.to_string(),
        }
    }

    /// 千分位分组: 12345 → "12.345"
    pub fn group_thousands(&self, value: u64) -> String {
        let digits = value.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * self.thousands_separator.len());

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        out
    }

    /// 百分比: 13.333 → "13.3%"
    pub fn format_rate(&self, rate: f64) -> String {
        format!("{:.1}%", rate)
    }

    /// 带单位件数: 3 → "3 pçs"（不分组）
    pub fn format_units(&self, count: u64) -> String {
        format!("{} {}", count, self.unit_suffix)
    }

    /// 汇总 → 指标卡片
    pub fn metrics(&self, summary: &ProductionSummary) -> MetricsView {
        let rate = summary.rework_rate();
        MetricsView {
            total_assembled: self.group_thousands(summary.assembled),
            total_painted: self.group_thousands(summary.painted),
            total_tested: self.group_thousands(summary.tested),
            rework_rate: self.format_rate(rate),
            rework_units: self.format_units(summary.reworked),
            rework_rate_value: rate,
        }
    }
}
