use crate::cli::commands::submit_request;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::errors::AppResult;
use crate::models::{EmployeePatch, RequestKind};
use crate::ui::messages::{info, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let prompt = format!(
            "Request deletion of employee {}? The reconciler applies it without further review.",
            id
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let ws = Workspace::open(cfg)?;
        submit_request(&ws, RequestKind::Delete, EmployeePatch::id_only(*id))?;
    }

    Ok(())
}
