use crate::errors::{AppError, AppResult};
use crate::models::EmployeeRecord;
use crate::ui::messages::{info, success, warning};
use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `employees_YYYYMMDD.<ext>` in the current directory.
pub fn default_file_name(format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "employees_{}.{}",
        Local::now().format("%Y%m%d"),
        format.as_str()
    ))
}

/// Check whether a file can be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` → Ok
/// - file exists otherwise → ask the user
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}

/// Flat row for CSV: every column present on every line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeExport<'a> {
    employee_id: i64,
    name: &'a str,
    title: &'a str,
    last_updated: &'a str,
}

impl<'a> From<&'a EmployeeRecord> for EmployeeExport<'a> {
    fn from(r: &'a EmployeeRecord) -> Self {
        Self {
            employee_id: r.employee_id,
            name: &r.name,
            title: &r.title,
            last_updated: r.last_updated.as_deref().unwrap_or(""),
        }
    }
}

fn export_csv(rows: &[EmployeeRecord], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    // header comes from the serde field names
    for row in rows {
        wtr.serialize(EmployeeExport::from(row))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_json(rows: &[EmployeeRecord], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(rows)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        rows: &[EmployeeRecord],
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        if rows.is_empty() {
            return Err(AppError::Export("no employee data to export".into()));
        }
        ensure_writable(path, force)?;

        info(format!(
            "Exporting {} employees to {}: {}",
            rows.len(),
            format.as_str().to_uppercase(),
            path.display()
        ));

        match format {
            ExportFormat::Csv => export_csv(rows, path)?,
            ExportFormat::Json => export_json(rows, path)?,
        }

        success(format!(
            "{} export completed: {}",
            format.as_str().to_uppercase(),
            path.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rows() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new(1, "Ana Ruiz", "Analyst"),
            EmployeeRecord::new(2, "Luis, Jr.", "Manager"),
        ]
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.csv");
        ExportLogic::export(&rows(), ExportFormat::Csv, &path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "employeeId,name,title,lastUpdated");
        assert!(content.contains("\"Luis, Jr.\""));
    }

    #[test]
    fn json_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.json");
        ExportLogic::export(&rows(), ExportFormat::Json, &path, false).unwrap();

        let back: Vec<EmployeeRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, rows());
    }

    #[test]
    fn empty_snapshot_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.csv");
        assert!(ExportLogic::export(&[], ExportFormat::Csv, &path, true).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn default_name_carries_the_date() {
        let name = default_file_name(ExportFormat::Csv);
        let s = name.to_string_lossy();
        assert!(s.starts_with("employees_"));
        assert!(s.ends_with(".csv"));
        assert_eq!(s.len(), "employees_YYYYMMDD.csv".len());
    }
}
