use super::employee::EmployeePatch;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestKind {
    Insert,
    Update,
    Delete,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Insert => "INSERT",
            RequestKind::Update => "UPDATE",
            RequestKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a request. Only `Pending` is ever written here; the other
/// states belong to the reconciler and are kept verbatim when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Applied,
    Rejected,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Applied => "APPLIED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => RequestStatus::Pending,
            "APPLIED" => RequestStatus::Applied,
            "REJECTED" => RequestStatus::Rejected,
            _ => RequestStatus::Other(s),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(s: RequestStatus) -> Self {
        s.as_str().to_string()
    }
}

/// One entry of the pending-request ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub sequence_id: u64,
    pub kind: RequestKind,
    pub payload: EmployeePatch,
    pub submitted_at: String, // RFC-3339
    pub status: RequestStatus,
}

impl ChangeRequest {
    /// Build a fresh PENDING request stamped with the current time.
    pub fn pending(sequence_id: u64, kind: RequestKind, payload: EmployeePatch) -> Self {
        Self {
            sequence_id,
            kind,
            payload,
            submitted_at: Local::now().to_rfc3339(),
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending_insert(&self) -> bool {
        self.kind == RequestKind::Insert && self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_preserved() {
        let raw = r#"{"sequenceId":4,"kind":"DELETE","payload":{"employeeId":9},
                      "submittedAt":"2025-01-01T00:00:00Z","status":"ON_HOLD"}"#;
        let req: ChangeRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.status, RequestStatus::Other("ON_HOLD".into()));

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["status"], "ON_HOLD");
    }

    #[test]
    fn kind_serializes_uppercase() {
        let req = ChangeRequest::pending(1, RequestKind::Insert, EmployeePatch::id_only(1));
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["kind"], "INSERT");
        assert_eq!(v["status"], "PENDING");
        assert_eq!(v["sequenceId"], 1);
    }
}
