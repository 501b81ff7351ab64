//! In-process [`EmployeeRepository`] for tests and database-less runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use roster_core::types::DbId;
use tokio::sync::RwLock;

use super::employee_repo::EmployeeRepository;
use crate::models::employee::{CreateEmployee, Employee};
use crate::seed::{seed_employee, SEED_EMPLOYEE_ID};

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<DbId, Employee>,
    last_id: DbId,
}

/// Employees kept in a `BTreeMap` keyed by id, so iteration is id order.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepo {
    inner: RwLock<Inner>,
}

impl InMemoryEmployeeRepo {
    /// An empty repository; the first assigned id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding the same seed record as a freshly migrated database.
    pub fn seeded() -> Self {
        let seed = seed_employee();
        let now = Utc::now();
        let row = Employee {
            id: SEED_EMPLOYEE_ID,
            name: seed.name,
            email: seed.email,
            department: seed.department,
            photo_path: seed.photo_path,
            created_at: now,
            updated_at: now,
        };
        let mut rows = BTreeMap::new();
        rows.insert(row.id, row);
        Self {
            inner: RwLock::new(Inner {
                rows,
                last_id: SEED_EMPLOYEE_ID,
            }),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepo {
    async fn list_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let employee = Employee {
            id: inner.last_id,
            name: input.name.clone(),
            email: input.email.clone(),
            department: input.department,
            photo_path: input.photo_path.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&employee.id) else {
            return Ok(None);
        };
        row.name = employee.name.clone();
        row.email = employee.email.clone();
        row.department = employee.department;
        row.photo_path = employee.photo_path.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        Ok(self.inner.write().await.rows.remove(&id))
    }
}
