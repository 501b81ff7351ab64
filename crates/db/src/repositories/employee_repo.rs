//! The employee repository contract and its PostgreSQL implementation.

use async_trait::async_trait;
use roster_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, department, photo_path, created_at, updated_at";

/// Narrow persistence interface over employee records.
///
/// Absence is reported as `Ok(None)`, never as an error; callers decide how
/// to surface it.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Every employee, in insertion (id) order.
    async fn list_all(&self) -> Result<Vec<Employee>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error>;

    /// Insert a new employee, returning it with the store-assigned id.
    async fn create(&self, input: &CreateEmployee) -> Result<Employee, sqlx::Error>;

    /// Replace every mutable field of the record with `employee.id`.
    ///
    /// Returns `None` if no such record exists. The id itself is never changed.
    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error>;

    /// Remove a record, returning what was removed.
    async fn delete(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error>;
}

/// [`EmployeeRepository`] backed by the `employees` table.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepo {
    pool: PgPool,
}

impl PgEmployeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepo {
    async fn list_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY id");
        sqlx::query_as::<_, Employee>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, email, department, photo_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.department.as_str())
            .bind(&input.photo_path)
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = $2,
                email = $3,
                department = $4,
                photo_path = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(employee.id)
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(employee.department.as_str())
            .bind(&employee.photo_path)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("DELETE FROM employees WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
