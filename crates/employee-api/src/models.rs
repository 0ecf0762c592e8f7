use serde::{Deserialize, Serialize};

/// A persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, generated identifier.
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub department: String,
}

/// Fields accepted when creating or updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: u32,
    pub department: String,
}
