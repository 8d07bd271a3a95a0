//! Admission rules applied before a change request is written.
//!
//! The duplicate-id check is advisory: two submitters can both pass it for the
//! same id. The reconciler re-validates before applying anything.

use crate::errors::ValidationError;
use crate::models::{ChangeRequest, EmployeePatch, EmployeeRecord, RequestKind};

/// `false` if `employee_id` is in the snapshot or in a pending INSERT.
pub fn is_id_available(
    snapshot: &[EmployeeRecord],
    pending: &[ChangeRequest],
    employee_id: i64,
) -> bool {
    let in_snapshot = snapshot.iter().any(|e| e.employee_id == employee_id);
    let in_pending = pending
        .iter()
        .any(|r| r.is_pending_insert() && r.payload.employee_id == employee_id);
    !(in_snapshot || in_pending)
}

fn is_blank(v: &Option<String>) -> bool {
    v.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Field checks that need no remote state.
pub fn validate_payload(kind: RequestKind, payload: &EmployeePatch) -> Result<(), ValidationError> {
    if payload.employee_id <= 0 {
        return Err(ValidationError::InvalidId(payload.employee_id));
    }

    match kind {
        RequestKind::Insert => {
            if is_blank(&payload.name) {
                return Err(ValidationError::MissingField("name"));
            }
            if is_blank(&payload.title) {
                return Err(ValidationError::MissingField("title"));
            }
        }
        RequestKind::Update => {
            if is_blank(&payload.name) && is_blank(&payload.title) {
                return Err(ValidationError::EmptyUpdate);
            }
        }
        // no existence check for DELETE (nor UPDATE): the reconciler decides
        RequestKind::Delete => {}
    }
    Ok(())
}

/// Full admission: field checks plus, for INSERT, the duplicate-id check.
pub fn admit(
    kind: RequestKind,
    payload: &EmployeePatch,
    snapshot: &[EmployeeRecord],
    pending: &[ChangeRequest],
) -> Result<(), ValidationError> {
    validate_payload(kind, payload)?;

    if kind == RequestKind::Insert && !is_id_available(snapshot, pending, payload.employee_id) {
        return Err(ValidationError::DuplicateId(payload.employee_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;

    fn req(seq: u64, kind: RequestKind, id: i64, status: RequestStatus) -> ChangeRequest {
        let mut r = ChangeRequest::pending(seq, kind, EmployeePatch::id_only(id));
        r.status = status;
        r
    }

    #[test]
    fn empty_everything_is_available() {
        assert!(is_id_available(&[], &[], 5));
    }

    #[test]
    fn snapshot_id_is_taken() {
        let snap = vec![EmployeeRecord::new(5, "Ana", "Analyst")];
        assert!(!is_id_available(&snap, &[], 5));
        assert!(is_id_available(&snap, &[], 6));
    }

    #[test]
    fn pending_insert_takes_the_id() {
        let pending = vec![req(1, RequestKind::Insert, 7, RequestStatus::Pending)];
        assert!(!is_id_available(&[], &pending, 7));
    }

    #[test]
    fn only_pending_inserts_count() {
        let pending = vec![
            req(1, RequestKind::Update, 8, RequestStatus::Pending),
            req(2, RequestKind::Delete, 8, RequestStatus::Pending),
            req(3, RequestKind::Insert, 8, RequestStatus::Applied),
            req(4, RequestKind::Insert, 8, RequestStatus::Rejected),
        ];
        assert!(is_id_available(&[], &pending, 8));
    }

    #[test]
    fn availability_matches_definition_exhaustively() {
        let snap = vec![EmployeeRecord::new(1, "A", "T"), EmployeeRecord::new(4, "B", "T")];
        let statuses = [
            RequestStatus::Pending,
            RequestStatus::Applied,
            RequestStatus::Other("HELD".into()),
        ];
        let kinds = [RequestKind::Insert, RequestKind::Update, RequestKind::Delete];

        let mut pending = Vec::new();
        let mut seq = 0;
        for (i, k) in kinds.iter().enumerate() {
            for (j, s) in statuses.iter().enumerate() {
                seq += 1;
                pending.push(req(seq, *k, (i * 3 + j) as i64 + 1, s.clone()));
            }
        }

        for id in 0..12 {
            let expected = !(snap.iter().any(|e| e.employee_id == id)
                || pending.iter().any(|r| {
                    r.kind == RequestKind::Insert
                        && r.status == RequestStatus::Pending
                        && r.payload.employee_id == id
                }));
            assert_eq!(is_id_available(&snap, &pending, id), expected, "id {id}");
        }
    }

    #[test]
    fn insert_requires_name_and_title() {
        let p = EmployeePatch {
            employee_id: 3,
            name: Some("  ".into()),
            title: Some("Dev".into()),
        };
        assert_eq!(
            validate_payload(RequestKind::Insert, &p),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn update_needs_a_change() {
        assert_eq!(
            validate_payload(RequestKind::Update, &EmployeePatch::id_only(3)),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(
            validate_payload(RequestKind::Delete, &EmployeePatch::id_only(0)),
            Err(ValidationError::InvalidId(0))
        );
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let snap = vec![EmployeeRecord::new(5, "Ana", "Analyst")];
        let err = admit(
            RequestKind::Insert,
            &EmployeePatch::full(5, "Bob", "Clerk"),
            &snap,
            &[],
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId(5));
    }

    #[test]
    fn delete_of_unknown_id_is_admitted() {
        assert!(admit(RequestKind::Delete, &EmployeePatch::id_only(99), &[], &[]).is_ok());
    }
}
