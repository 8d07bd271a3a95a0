use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::audit::AuditLog;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the local store directory, when `--store-dir` is given
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Commands::Init { store_dir } = &cli.command {
        println!("⚙️  Initializing staffledger…");

        let path = Config::init_all(cli.config.as_deref(), store_dir.as_deref())?;
        let cfg = Config::load(Some(path.as_path()))?;

        println!("📄 Config file : {}", path.display());
        match &cfg.store_dir {
            Some(dir) => println!("🗄️  Store       : {} (filesystem)", dir),
            None => println!("🗄️  Store       : {} ({})", cfg.github_repo, cfg.github_branch),
        }

        AuditLog::new(Config::audit_file()).record(
            "init",
            &path.display().to_string(),
            "configuration written",
        );

        success("staffledger initialization completed!");
    }
    Ok(())
}
