use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::{Employee, EmployeeGrant, GrantPair, ModuleCode, RoleCode};

impl Database {
    // Grant operations

    pub async fn get_employee_grants(&self, employee_id: &str) -> ApiResult<Vec<EmployeeGrant>> {
        let rows = sqlx::query(
            "SELECT employee_id, module_code, role_code, created_at
             FROM employee_grants
             WHERE employee_id = ?
             ORDER BY module_code, role_code",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grants = Vec::new();
        for row in rows {
            grants.push(Self::grant_from_row(&row)?);
        }

        Ok(grants)
    }

    pub async fn get_grants_by_location(&self, plant_location: &str) -> ApiResult<Vec<EmployeeGrant>> {
        let rows = sqlx::query(
            "SELECT g.employee_id, g.module_code, g.role_code, g.created_at
             FROM employee_grants g
             INNER JOIN employees e ON e.id = g.employee_id
             WHERE e.plant_location = ?
             ORDER BY g.employee_id, g.module_code, g.role_code",
        )
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut grants = Vec::new();
        for row in rows {
            grants.push(Self::grant_from_row(&row)?);
        }

        Ok(grants)
    }

    /// Create employee with access grants in a single transaction.
    /// Either the employee row and every grant land together, or nothing does.
    pub async fn create_employee_with_grants(
        &self,
        employee: &Employee,
        grants: &[GrantPair],
    ) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO employees (id, employee_no, full_name, email, plant_location,
                                    department_id, designation_id, password_hash, is_active,
                                    profile_image, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&employee.id)
        .bind(&employee.employee_no)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.plant_location)
        .bind(employee.department_id.as_deref())
        .bind(employee.designation_id.as_deref())
        .bind(&employee.password_hash)
        .bind(employee.is_active)
        .bind(employee.profile_image.as_deref())
        .bind(&employee.created_at)
        .bind(&employee.updated_at)
        .execute(&mut *tx)
        .await?;

        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();
        for pair in grants {
            sqlx::query(
                "INSERT INTO employee_grants (employee_id, module_code, role_code, created_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&employee.id)
            .bind(pair.module_code.as_str())
            .bind(pair.role_code.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Employee created with {} grant(s): id={}, employee_no={}",
            grants.len(),
            employee.id,
            employee.employee_no
        );
        Ok(())
    }

    /// Replace all grants for an employee atomically (delete existing, insert new set).
    pub async fn replace_employee_grants(
        &self,
        employee_id: &str,
        grants: &[GrantPair],
    ) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM employee_grants WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();
        for pair in grants {
            sqlx::query(
                "INSERT INTO employee_grants (employee_id, module_code, role_code, created_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(employee_id)
            .bind(pair.module_code.as_str())
            .bind(pair.role_code.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Grants replaced for employee {}: {} grant(s)",
            employee_id,
            grants.len()
        );
        Ok(())
    }

    fn grant_from_row(row: &sqlx::any::AnyRow) -> ApiResult<EmployeeGrant> {
        let module_str: String = row.try_get("module_code")?;
        let role_str: String = row.try_get("role_code")?;

        Ok(EmployeeGrant {
            employee_id: row.try_get("employee_id")?,
            module_code: module_str.parse().unwrap_or(ModuleCode::Facility),
            role_code: role_str.parse().unwrap_or(RoleCode::Requester),
            created_at: row.try_get("created_at")?,
        })
    }
}
