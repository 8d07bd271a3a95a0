pub mod employee;
pub mod request;

pub use employee::{EmployeePatch, EmployeeRecord};
pub use request::{ChangeRequest, RequestKind, RequestStatus};
