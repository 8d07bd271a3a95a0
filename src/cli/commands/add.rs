use crate::cli::commands::submit_request;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::errors::AppResult;
use crate::models::{EmployeePatch, RequestKind};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { id, name, title } = cmd {
        let ws = Workspace::open(cfg)?;
        let payload = EmployeePatch::full(*id, name.trim(), title.trim());
        submit_request(&ws, RequestKind::Insert, payload)?;
    }
    Ok(())
}
