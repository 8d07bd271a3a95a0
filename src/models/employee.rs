use serde::{Deserialize, Deserializer, Serialize};

/// Exporters write NaN cells as `null`; read them as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the employee snapshot.
///
/// Older snapshots were produced with Spanish column names; they are accepted
/// as aliases so both generations of the file read the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(alias = "empleadoId")]
    pub employee_id: i64,
    #[serde(alias = "Nombre", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(alias = "Cargo", default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(
        alias = "FechaActualizacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>, // ISO-8601 as written by the reconciler
}

impl EmployeeRecord {
    pub fn new(employee_id: i64, name: &str, title: &str) -> Self {
        Self {
            employee_id,
            name: name.to_string(),
            title: title.to_string(),
            last_updated: None,
        }
    }

    /// `YYYY-MM-DD` part of `last_updated`, if any.
    pub fn updated_on(&self) -> Option<&str> {
        self.last_updated
            .as_deref()
            .map(|s| s.get(..10).unwrap_or(s))
    }
}

/// Partial record carried by a change request.
/// Only `employee_id` is mandatory; absent fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(alias = "empleadoId")]
    pub employee_id: i64,
    #[serde(alias = "Nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "Cargo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EmployeePatch {
    pub fn id_only(employee_id: i64) -> Self {
        Self {
            employee_id,
            name: None,
            title: None,
        }
    }

    pub fn full(employee_id: i64, name: &str, title: &str) -> Self {
        Self {
            employee_id,
            name: Some(name.to_string()),
            title: Some(title.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_legacy_column_names() {
        let raw = r#"[
            {"Cargo": "Analyst", "empleadoId": 12, "Nombre": "Ana Ruiz",
             "FechaActualizacion": "2025-03-04T10:00:00"}
        ]"#;
        let rows: Vec<EmployeeRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(rows[0].employee_id, 12);
        assert_eq!(rows[0].name, "Ana Ruiz");
        assert_eq!(rows[0].title, "Analyst");
        assert_eq!(rows[0].updated_on(), Some("2025-03-04"));
    }

    #[test]
    fn key_order_does_not_matter() {
        let a: EmployeeRecord =
            serde_json::from_str(r#"{"employeeId":1,"name":"A","title":"T"}"#).unwrap();
        let b: EmployeeRecord =
            serde_json::from_str(r#"{"title":"T","name":"A","employeeId":1}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn null_cells_read_as_empty() {
        let raw = r#"[
            {"empleadoId": 5, "Nombre": "Ana Ruiz", "Cargo": null},
            {"empleadoId": 6, "Nombre": null},
            {"employeeId": 7, "name": "Eva Sanz", "title": "Clerk", "lastUpdated": null}
        ]"#;
        let rows: Vec<EmployeeRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "");
        assert_eq!(rows[1].name, "");
        assert_eq!(rows[1].title, "");
        assert_eq!(rows[2].last_updated, None);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let json = serde_json::to_string(&EmployeePatch::id_only(3)).unwrap();
        assert_eq!(json, r#"{"employeeId":3}"#);
    }
}
