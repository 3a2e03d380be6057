// ==========================================
// 产线生产登记系统 - 看板 API
// ==========================================
// 职责: 周期解析 → 聚合 → 报表组装；导出全部历史
// 架构: API 层 → Engine 层 (ReportAssembler) → ProductionStore
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::period::PeriodSelector;
use crate::domain::report::{DashboardReport, HistoryRow};
use crate::engine::period_resolver::PeriodResolver;
use crate::engine::report::ReportAssembler;
use crate::export;
use crate::i18n;
use crate::repository::production_store::ProductionStore;

/// 看板响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// 生效的周期（规范化令牌或 YYYY-MM-DD）
    pub period: String,
    /// 周期显示名（按配置语言）
    pub period_label: String,
    #[serde(flatten)]
    pub report: DashboardReport,
}

/// 导出结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub path: PathBuf,
    pub rows: usize,
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn ProductionStore>,
    config: Arc<ConfigManager>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<ConfigManager>) -> Self {
        Self { store, config }
    }

    fn assembler(&self) -> ApiResult<ReportAssembler> {
        Ok(ReportAssembler::new(
            self.store.clone(),
            self.config.metrics_formatter()?,
        ))
    }

    /// 解析周期选择
    ///
    /// 两者都未提供时使用配置的默认周期；其余情况按令牌优先、日期次之
    pub fn resolve_selector(
        &self,
        period: Option<&str>,
        date: Option<&str>,
    ) -> ApiResult<PeriodSelector> {
        let blank = |v: Option<&str>| v.map_or(true, |s| s.trim().is_empty());
        if blank(period) && blank(date) {
            return Ok(self.config.get_default_period()?);
        }
        Ok(PeriodSelector::parse(period, date)?)
    }

    /// 查询看板
    ///
    /// # 参数
    /// - period: 周期令牌（today / last-7-days / this-month / all-time）
    /// - date: 指定日期（YYYY-MM-DD）
    /// - today: 当前本地日期
    ///
    /// # 返回
    /// - Err(InvalidInput): 日期无法解析
    /// - Err(StoreUnavailable): 存储不可用（不返回部分结果）
    pub fn get_dashboard(
        &self,
        period: Option<&str>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> ApiResult<DashboardResponse> {
        let selector = self.resolve_selector(period, date)?;
        let range = PeriodResolver::resolve(selector, today);
        let locale = self.config.get_locale()?;

        let report = self.assembler()?.assemble(&range)?;

        tracing::info!(
            period = %selector,
            records = report.record_ids.len(),
            tested = report.summary.tested,
            "看板查询完成"
        );

        Ok(DashboardResponse {
            period: selector.to_string(),
            period_label: period_label(selector, &locale),
            report,
        })
    }

    /// 导出行（全部历史，与当前周期无关）
    pub fn export_rows(&self) -> ApiResult<Vec<HistoryRow>> {
        Ok(self.assembler()?.export_rows()?)
    }

    /// 导出 CSV 到目录
    pub fn export_csv(&self, dir: &Path, today: NaiveDate) -> ApiResult<ExportResponse> {
        let rows = self.export_rows()?;
        if rows.is_empty() {
            tracing::info!("没有可导出的记录，仅写出表头");
        }

        let headers = export::export_headers(&self.config.get_locale()?);
        let path = export::write_csv_file(dir, today, &rows, &headers)
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        Ok(ExportResponse {
            path,
            rows: rows.len(),
        })
    }
}

/// 周期显示名
pub fn period_label(selector: PeriodSelector, locale: &str) -> String {
    match selector {
        PeriodSelector::Date(d) => i18n::t_in_with_args(
            selector.label_key(),
            locale,
            &[("date", &d.format("%d/%m/%Y").to_string())],
        ),
        _ => i18n::t_in(selector.label_key(), locale),
    }
}
