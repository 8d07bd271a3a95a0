use crate::config::Config;
use crate::errors::{AppError, AppResult};

pub const PASSPHRASE_ENV: &str = "STAFFLEDGER_PASSPHRASE";

/// Gate on the optional static passphrase. No passphrase configured → open.
pub fn check(cfg: &Config, supplied: Option<&str>) -> AppResult<()> {
    let Some(expected) = cfg.access_passphrase.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let from_env = std::env::var(PASSPHRASE_ENV).ok();
    let given = supplied.or(from_env.as_deref());

    match given {
        Some(p) if p == expected => Ok(()),
        _ => Err(AppError::AccessDenied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_without_passphrase() {
        assert!(check(&Config::default(), None).is_ok());
    }

    #[test]
    fn wrong_passphrase_is_denied() {
        let cfg = Config {
            access_passphrase: Some("rrhh-2025".into()),
            ..Config::default()
        };
        assert!(matches!(
            check(&cfg, Some("guess")),
            Err(AppError::AccessDenied)
        ));
        assert!(check(&cfg, Some("rrhh-2025")).is_ok());
    }
}
