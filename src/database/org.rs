use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::{Department, Designation};

impl Database {
    // Department operations

    pub async fn create_department(&self, department: &Department) -> ApiResult<()> {
        sqlx::query("INSERT INTO departments (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&department.id)
            .bind(&department.name)
            .bind(&department.created_at)
            .execute(&self.pool)
            .await?;

        tracing::info!("Department created: {}", department.name);
        Ok(())
    }

    pub async fn list_departments(&self) -> ApiResult<Vec<Department>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let mut departments = Vec::new();
        for row in rows {
            departments.push(Department {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(departments)
    }

    pub async fn get_department_by_id(&self, id: &str) -> ApiResult<Option<Department>> {
        let row = sqlx::query("SELECT id, name, created_at FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Department {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete_department(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Designation operations

    pub async fn create_designation(&self, designation: &Designation) -> ApiResult<()> {
        sqlx::query("INSERT INTO designations (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&designation.id)
            .bind(&designation.name)
            .bind(&designation.created_at)
            .execute(&self.pool)
            .await?;

        tracing::info!("Designation created: {}", designation.name);
        Ok(())
    }

    pub async fn list_designations(&self) -> ApiResult<Vec<Designation>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM designations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let mut designations = Vec::new();
        for row in rows {
            designations.push(Designation {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(designations)
    }

    pub async fn get_designation_by_id(&self, id: &str) -> ApiResult<Option<Designation>> {
        let row = sqlx::query("SELECT id, name, created_at FROM designations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Designation {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete_designation(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM designations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
