//! Local audit trail of what this client submitted or failed to submit.
//!
//! One tab-separated line per event: date, operation, target, message.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use ansi_term::Colour;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct AuditLog {
    path: PathBuf,
}

fn clean(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line to the audit file.
    pub fn append(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(
            f,
            "{}\t{}\t{}\t{}",
            Local::now().to_rfc3339(),
            clean(operation),
            clean(target),
            clean(message)
        )?;
        Ok(())
    }

    /// Like `append`, but a failure only produces a warning.
    pub fn record(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.append(operation, target, message) {
            warning(format!("Failed to write audit log: {}", e));
        }
    }

    pub fn entries(&self) -> AppResult<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;

        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut parts = line.splitn(4, '\t');
                AuditEntry {
                    date: parts.next().unwrap_or_default().to_string(),
                    operation: parts.next().unwrap_or_default().to_string(),
                    target: parts.next().unwrap_or_default().to_string(),
                    message: parts.next().unwrap_or_default().to_string(),
                }
            })
            .collect())
    }
}

fn strip_ansi(s: &str) -> String {
    match regex::Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "insert" => Colour::Green,
        "delete" => Colour::Red,
        "update" => Colour::Yellow,
        "rejected" | "failed" => Colour::Purple,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const OP_MAX: usize = 60;

/// Render entries as aligned, coloured lines.
pub fn render(entries: &[AuditEntry]) -> Vec<String> {
    let id_w = entries.len().to_string().len();
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

    let op_targets: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            }
        })
        .collect();
    let op_w = op_targets
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(10)
        .min(OP_MAX);

    entries
        .iter()
        .zip(op_targets)
        .enumerate()
        .map(|(i, (e, op_target))| {
            let color = color_for_operation(&e.operation);

            let visible = if op_target.chars().count() > OP_MAX {
                let mut s: String = op_target.chars().take(OP_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                i + 1,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("sub").join("audit.log"));

        log.append("insert", "employee 5", "request #1").unwrap();
        log.append("delete", "employee\t3", "request #2").unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "insert");
        assert_eq!(entries[1].target, "employee 3");
        assert_eq!(entries[1].message, "request #2");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("none.log"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn render_truncates_long_targets() {
        let entries = vec![AuditEntry {
            date: "2025-01-01T00:00:00+00:00".into(),
            operation: "update".into(),
            target: "x".repeat(100),
            message: "ok".into(),
        }];
        let lines = render(&entries);
        let plain = strip_ansi(&lines[0]);
        assert!(plain.contains("..."));
        assert!(plain.ends_with("=> ok"));
    }
}
