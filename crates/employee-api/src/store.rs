//! In-memory employee table.
//!
//! The service keeps persistence behind a thin interface: a single table of
//! employee records with generated unique ids, held in shared state behind
//! an async lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Employee, EmployeeDraft};

/// Shared handle used as router state.
pub type SharedStore = Arc<EmployeeStore>;

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    employees: BTreeMap<u64, Employee>,
}

/// A single in-memory table of employee records.
#[derive(Debug, Default)]
pub struct EmployeeStore {
    inner: RwLock<StoreInner>,
}

impl EmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record, assigning the next id (ids start at 1 and are
    /// never reused).
    pub async fn create(&self, draft: EmployeeDraft) -> Employee {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let employee = Employee {
            id: inner.next_id,
            name: draft.name,
            age: draft.age,
            department: draft.department,
        };
        inner.employees.insert(employee.id, employee.clone());
        employee
    }

    /// All records, ordered by id.
    pub async fn list(&self) -> Vec<Employee> {
        self.inner.read().await.employees.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Employee> {
        self.inner.read().await.employees.get(&id).cloned()
    }

    /// Replace the record's fields, returning the updated record. Returns
    /// `None` when `id` does not exist; no record is created.
    pub async fn update(&self, id: u64, draft: EmployeeDraft) -> Option<Employee> {
        let mut inner = self.inner.write().await;
        let employee = inner.employees.get_mut(&id)?;
        employee.name = draft.name;
        employee.age = draft.age;
        employee.department = draft.department;
        Some(employee.clone())
    }

    /// Remove the record, returning it. Returns `None` when `id` does not
    /// exist, leaving the table untouched.
    pub async fn delete(&self, id: u64) -> Option<Employee> {
        self.inner.write().await.employees.remove(&id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            age: 30,
            department: "Engineering".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = EmployeeStore::new();
        let first = store.create(draft("Ada")).await;
        let second = store.create(draft("Grace")).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_returns_created_record() {
        let store = EmployeeStore::new();
        let created = store.create(draft("Ada")).await;
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = EmployeeStore::new();
        assert!(store.get(99).await.is_none());
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let store = EmployeeStore::new();
        store.create(draft("Ada")).await;
        store.create(draft("Grace")).await;
        store.create(draft("Edsger")).await;

        let all = store.list().await;
        let ids: Vec<u64> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = EmployeeStore::new();
        let created = store.create(draft("Ada")).await;

        let updated = store
            .update(
                created.id,
                EmployeeDraft {
                    name: "Ada L.".to_string(),
                    age: 37,
                    department: "Research".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.age, 37);
        assert_eq!(store.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let store = EmployeeStore::new();
        assert!(store.update(42, draft("Ghost")).await.is_none());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = EmployeeStore::new();
        let created = store.create(draft("Ada")).await;

        let removed = store.delete(created.id).await.unwrap();
        assert_eq!(removed, created);
        assert!(store.get(created.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_idempotent() {
        let store = EmployeeStore::new();
        assert!(store.delete(42).await.is_none());
        assert!(store.delete(42).await.is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = EmployeeStore::new();
        let first = store.create(draft("Ada")).await;
        store.delete(first.id).await;
        let second = store.create(draft("Grace")).await;
        assert_eq!(second.id, 2);
    }
}
