use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pending = cmd {
        let ws = Workspace::open(cfg)?;
        let pending = ws.ledger().list_pending();

        header("⏳ Pending requests");
        if pending.is_empty() {
            info("No pending requests.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("#", 6),
            Column::new("Kind", 6),
            Column::new("Employee", 10),
            Column::new("Name", 30),
            Column::new("Title", 24),
            Column::new("Submitted", 19),
        ]);
        for r in &pending {
            table.add_row(vec![
                r.sequence_id.to_string(),
                r.kind.to_string(),
                r.payload.employee_id.to_string(),
                r.payload.name.clone().unwrap_or_default(),
                r.payload.title.clone().unwrap_or_default(),
                r.submitted_at.chars().take(19).collect(),
            ]);
        }
        print!("{}", table.render());
        info(format!("{} request(s) waiting for reconciliation.", pending.len()));
    }
    Ok(())
}
