use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Workspace;
use crate::core::export::{ExportLogic, default_file_name};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let ws = Workspace::open(cfg)?;
        let rows = ws.reader().fetch_employees();
        let path = file.clone().unwrap_or_else(|| default_file_name(*format));

        ExportLogic::export(&rows, *format, &path, *force)?;
        ws.audit().record(
            "export",
            &path.display().to_string(),
            &format!("{} employees as {}", rows.len(), format.as_str()),
        );
    }
    Ok(())
}
