// ==========================================
// 产线生产登记系统 - 历史导出
// ==========================================
// 职责: 历史行 → CSV（表头 + 每条记录一行）
// 说明: 无记录时只输出表头
// ==========================================

use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::report::HistoryRow;
use crate::i18n;

/// 导出列（按顺序），对应 i18n 键 export.columns.*
pub const EXPORT_COLUMNS: [&str; 12] = [
    "id",
    "model",
    "assembly_operator",
    "assembly_qty",
    "painting_operator",
    "painting_qty",
    "testing_operator",
    "testing_qty",
    "rework_operator",
    "rework_qty",
    "note",
    "recorded_at",
];

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出目录不存在: {0}")]
    DirectoryNotFound(String),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 导出文件名: producao_YYYYMMDD.csv
pub fn export_file_name(date: NaiveDate) -> String {
    format!("producao_{}.csv", date.format("%Y%m%d"))
}

/// 按语言生成表头
pub fn export_headers(locale: &str) -> Vec<String> {
    EXPORT_COLUMNS
        .iter()
        .map(|col| i18n::t_in(&format!("export.columns.{}", col), locale))
        .collect()
}

/// 写出 CSV
pub fn write_csv<W: Write>(rows: &[HistoryRow], headers: &[String], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers)?;

    for row in rows {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        wtr.write_record([
            row.id.to_string(),
            row.model.clone(),
            opt(&row.assembly_operator),
            row.assembly_qty.to_string(),
            opt(&row.painting_operator),
            row.painting_qty.to_string(),
            opt(&row.testing_operator),
            row.testing_qty.to_string(),
            opt(&row.rework_operator),
            row.rework_qty.to_string(),
            opt(&row.note),
            row.recorded_at.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// 写出 CSV 文件到指定目录
///
/// # 返回
/// - 生成的文件路径
pub fn write_csv_file(
    dir: &Path,
    date: NaiveDate,
    rows: &[HistoryRow],
    headers: &[String],
) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::DirectoryNotFound(dir.display().to_string()));
    }

    let path = dir.join(export_file_name(date));
    let file = File::create(&path)?;
    write_csv(rows, headers, file)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "历史记录已导出");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, note: Option<&str>) -> HistoryRow {
        HistoryRow {
            id,
            model: "Unidade Compressora 15+".to_string(),
            assembly_operator: Some("GILSON ROBERTO DE OLIVEIRA".to_string()),
            assembly_qty: 5,
            painting_operator: None,
            painting_qty: 0,
            testing_operator: None,
            testing_qty: 5,
            rework_operator: None,
            rework_qty: 1,
            note: note.map(str::to_string),
            recorded_at: "10/05/2026 09:15".to_string(),
        }
    }

    fn to_string(rows: &[HistoryRow], headers: &[String]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, headers, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(export_file_name(date), "producao_20260105.csv");
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let headers = export_headers("en");
        let out = to_string(&[], &headers);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("ID,Model,Assembly operator"));
    }

    #[test]
    fn test_rows_are_quoted_when_needed() {
        let headers = export_headers("pt-BR");
        let out = to_string(&[row(2, Some("lote, A")), row(1, None)], &headers);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Observação,Data/Hora"));
        assert_eq!(
            lines[1],
            "2,Unidade Compressora 15+,GILSON ROBERTO DE OLIVEIRA,5,,0,,5,,1,\"lote, A\",10/05/2026 09:15"
        );
        assert!(lines[2].starts_with("1,"));
    }

    #[test]
    fn test_missing_directory() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let result = write_csv_file(Path::new("/nonexistent/dir/xyz"), date, &[], &[]);
        assert!(matches!(result, Err(ExportError::DirectoryNotFound(_))));
    }
}
