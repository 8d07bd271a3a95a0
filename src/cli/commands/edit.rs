use crate::cli::commands::submit_request;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::errors::AppResult;
use crate::models::{EmployeePatch, RequestKind};

fn trimmed(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, name, title } = cmd {
        let ws = Workspace::open(cfg)?;
        let payload = EmployeePatch {
            employee_id: *id,
            name: trimmed(name),
            title: trimmed(title),
        };
        submit_request(&ws, RequestKind::Update, payload)?;
    }
    Ok(())
}
