pub mod add;
pub mod check_id;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod pending;

use crate::core::Workspace;
use crate::errors::{AppError, AppResult};
use crate::models::{ChangeRequest, EmployeePatch, RequestKind};
use crate::ui::messages::success;

/// Submit one request through the ledger and leave a trace in the audit log.
pub(crate) fn submit_request(
    ws: &Workspace,
    kind: RequestKind,
    payload: EmployeePatch,
) -> AppResult<ChangeRequest> {
    let audit = ws.audit();
    let target = format!("employee {}", payload.employee_id);

    // only inserts consult the snapshot, and only a snapshot that was read
    let outcome = if kind == RequestKind::Insert {
        ws.reader()
            .fetch_checked()
            .and_then(|snapshot| ws.ledger().submit(kind, payload, &snapshot))
    } else {
        ws.ledger().submit(kind, payload, &[])
    };

    match outcome {
        Ok(req) => {
            audit.record(
                &kind.as_str().to_lowercase(),
                &target,
                &format!("request #{} filed as PENDING", req.sequence_id),
            );
            success(format!(
                "{} request #{} for employee {} filed; it will apply after the next reconciliation.",
                kind, req.sequence_id, req.payload.employee_id
            ));
            Ok(req)
        }
        Err(e) => {
            let op = match e {
                AppError::Validation(_) => "rejected",
                _ => "failed",
            };
            audit.record(op, &target, &format!("{kind}: {e}"));
            Err(e)
        }
    }
}
