use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Workspace, is_id_available};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::CheckId { id } = cmd {
        let ws = Workspace::open(cfg)?;
        let snapshot = ws.reader().fetch_checked()?;
        let pending = ws.ledger().list_pending();

        if is_id_available(&snapshot, &pending, *id) {
            success(format!("Employee id {} is available.", id));
        } else {
            warning(format!(
                "Employee id {} is taken (in the snapshot or a pending insert).",
                id
            ));
        }
    }
    Ok(())
}
