// ==========================================
// 产线生产登记系统 - 性能追踪
// ==========================================
// 职责: SQLite 语句计数 + 慢查询告警 + 命令耗时
// 开关: Debug 默认开启；Release 默认关闭（可通过环境变量开启）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 强制开关（1/true/yes/on）
pub const ENV_PERF_SQL: &str = "PRODUCTION_TRACKER_PERF_SQL";
/// 慢 SQL 阈值（毫秒）
pub const ENV_SLOW_SQL_MS: &str = "PRODUCTION_TRACKER_SLOW_SQL_MS";

const SQL_LOG_MAX_CHARS: usize = 420;

static PERF_SQL_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = const { Cell::new(0) };
    static SQL_COUNT: Cell<u64> = const { Cell::new(0) };
    static SLOW_SQL_COUNT: Cell<u64> = const { Cell::new(0) };
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 按字符截断（SQL 中可能含非 ASCII 字面量）
fn truncate_sql(sql: &str, max_chars: usize) -> String {
    let s = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s,
    }
}

/// 从环境变量解析追踪开关与阈值
fn read_env_settings() -> (bool, u64) {
    let enabled = match std::env::var(ENV_PERF_SQL) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };

    let slow_ms = std::env::var(ENV_SLOW_SQL_MS)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });

    (enabled, slow_ms)
}

/// 安装 SQLite 语句 trace/profile
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let (enabled, slow_ms) = read_env_settings();
    PERF_SQL_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        // 复用连接时清理残留 callback
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_SQL_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
    conn.trace(Some(sql_trace_callback));
    conn.profile(Some(sql_profile_callback));

    tracing::debug!(slow_sql_ms = slow_ms, "SQL 追踪已开启");
}

fn guard_active() -> bool {
    PERF_DEPTH.with(|d| d.get() > 0)
}

fn sql_trace_callback(_sql: &str) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) || !guard_active() {
        return;
    }
    SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %truncate_sql(sql, SQL_LOG_MAX_CHARS),
        "slow sql"
    );
    if guard_active() {
        SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 命令耗时 Guard：drop 时记录 elapsed_ms + SQL 语句数 + 慢 SQL 数
///
/// 计数为线程局部，需在执行 SQL 的线程上创建（命令层在 spawn_blocking 闭包内创建）。
///
/// ```ignore
/// let _perf = production_tracker::perf::PerfGuard::new("get_dashboard");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
    slow_sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            slow_sql_start: SLOW_SQL_COUNT.with(|c| c.get()),
        }
    }

    /// 创建以来本线程执行的 SQL 语句数
    pub fn sql_count(&self) -> u64 {
        SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let slow_sql_count = SLOW_SQL_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_sql_start);

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count = self.sql_count(),
            slow_sql_count,
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_sql_respects_char_boundaries() {
        let sql = "SELECT *\n  FROM production_record WHERE model = 'Unidade Compressora 20+' AND note = 'Observação'";
        let short = truncate_sql(sql, 20);
        assert_eq!(short, "SELECT * FROM produc…");

        let accented = truncate_sql("SELECT 'çççç'", 10);
        assert!(accented.ends_with('…'));

        assert_eq!(truncate_sql("SELECT 1", 100), "SELECT 1");
    }

    #[test]
    fn test_is_true() {
        assert!(is_true(" ON "));
        assert!(is_true("1"));
        assert!(!is_true("0"));
        assert!(!is_true(""));
    }

    #[test]
    fn test_guard_counts_statements_on_current_thread() {
        // 直接调用回调，不依赖环境变量
        PERF_SQL_ENABLED.store(true, Ordering::Relaxed);
        let guard = PerfGuard::new("test");
        sql_trace_callback("SELECT 1");
        sql_trace_callback("SELECT 2");
        assert_eq!(guard.sql_count(), 2);
        drop(guard);
        assert!(!guard_active());
    }
}
