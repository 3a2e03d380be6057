// ==========================================
// 产线生产登记系统 - 统计周期模型
// ==========================================
// 职责: 周期选择器、日期区间
// 说明: 均为请求级临时对象，不落库
// ==========================================

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PeriodSelector - 周期选择器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodSelector {
    Today,           // 今天
    Last7Days,       // 最近 7 天（含今天）
    ThisMonth,       // 本月 1 日至今天
    AllTime,         // 全部历史
    Date(NaiveDate), // 指定某一天
}

impl PeriodSelector {
    /// 对应的国际化标签键
    pub fn label_key(&self) -> &'static str {
        match self {
            PeriodSelector::Today => "period.today",
            PeriodSelector::Last7Days => "period.last_7_days",
            PeriodSelector::ThisMonth => "period.this_month",
            PeriodSelector::AllTime => "period.all_time",
            PeriodSelector::Date(_) => "period.day",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSelector::Today => write!(f, "today"),
            PeriodSelector::Last7Days => write!(f, "last-7-days"),
            PeriodSelector::ThisMonth => write!(f, "this-month"),
            PeriodSelector::AllTime => write!(f, "all-time"),
            PeriodSelector::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

// ==========================================
// DateRange - 日期区间
// ==========================================
// Bounded: 闭区间 [start 00:00:00, end 23:59:59]
// Unbounded: 不过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRange {
    Bounded { start: NaiveDate, end: NaiveDate },
    Unbounded,
}

impl DateRange {
    /// 单日区间
    pub fn single_day(date: NaiveDate) -> Self {
        DateRange::Bounded {
            start: date,
            end: date,
        }
    }

    /// 区间对应的时间戳边界（含两端）
    ///
    /// # 返回
    /// - Some((起始 00:00:00, 结束 23:59:59))
    /// - None: 不限区间
    pub fn timestamp_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self {
            DateRange::Bounded { start, end } => {
                let day_end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
                Some((start.and_time(NaiveTime::MIN), end.and_time(day_end)))
            }
            DateRange::Unbounded => None,
        }
    }

    /// 时间戳是否落在区间内
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        match self.timestamp_bounds() {
            Some((from, to)) => *ts >= from && *ts <= to,
            None => true,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, DateRange::Unbounded)
    }
}
