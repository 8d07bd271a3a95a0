use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::audit::{self, AuditLog};
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Log = cmd {
        let log = AuditLog::new(Config::audit_file());
        let entries = log.entries()?;

        if entries.is_empty() {
            info(format!("Audit log is empty ({}).", log.path().display()));
            return Ok(());
        }

        println!("📜 Audit log:\n");
        for line in audit::render(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}
