use sqlx::{
    any::{AnyConnectOptions, AnyPoolOptions},
    AnyPool, ConnectOptions, Row,
};
use std::str::FromStr;
use tracing::log::LevelFilter;

use crate::{api::middleware::error::ApiResult, models::Employee};

mod access_rules;
mod grants;
mod locations;
mod org;
mod sessions;
pub mod tickets;

pub struct Database {
    pub(crate) pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        // Ensure drivers are installed for AnyPool
        sqlx::any::install_default_drivers();

        let mut connect_options = AnyConnectOptions::from_str(database_url)?;
        connect_options = connect_options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, std::time::Duration::from_secs(1));

        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .connect_with(connect_options)
            .await?;

        // Enable optimizations for SQLite
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA busy_timeout = 5000")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    // Employee operations

    pub async fn get_employee_by_id(&self, id: &str) -> ApiResult<Option<Employee>> {
        let row = sqlx::query(
            "SELECT id, employee_no, full_name, email, plant_location, department_id,
                    designation_id, password_hash, is_active, profile_image, created_at, updated_at
             FROM employees
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::employee_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_employee_by_no(&self, employee_no: &str) -> ApiResult<Option<Employee>> {
        let row = sqlx::query(
            "SELECT id, employee_no, full_name, email, plant_location, department_id,
                    designation_id, password_hash, is_active, profile_image, created_at, updated_at
             FROM employees
             WHERE employee_no = ?",
        )
        .bind(employee_no.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::employee_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_employees_by_location(
        &self,
        plant_location: &str,
    ) -> ApiResult<Vec<Employee>> {
        let rows = sqlx::query(
            "SELECT id, employee_no, full_name, email, plant_location, department_id,
                    designation_id, password_hash, is_active, profile_image, created_at, updated_at
             FROM employees
             WHERE plant_location = ?
             ORDER BY employee_no",
        )
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut employees = Vec::new();
        for row in rows {
            employees.push(Self::employee_from_row(&row)?);
        }

        Ok(employees)
    }

    pub async fn count_employees(&self) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    pub async fn activate_employee(&self, employee_id: &str, password_hash: &str) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        sqlx::query(
            "UPDATE employees
             SET password_hash = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(password_hash)
        .bind(true)
        .bind(&now)
        .bind(employee_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("Employee activated: id={}", employee_id);
        Ok(())
    }

    pub async fn update_profile_image(&self, employee_id: &str, image: &str) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        sqlx::query(
            "UPDATE employees
             SET profile_image = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(image)
        .bind(&now)
        .bind(employee_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count_employees_in_department(&self, department_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employees WHERE department_id = ?")
            .bind(department_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    pub async fn count_employees_with_designation(&self, designation_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employees WHERE designation_id = ?")
            .bind(designation_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    fn employee_from_row(row: &sqlx::any::AnyRow) -> ApiResult<Employee> {
        Ok(Employee {
            id: row.try_get("id")?,
            employee_no: row.try_get("employee_no")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            plant_location: row.try_get("plant_location")?,
            department_id: row.try_get("department_id").ok(),
            designation_id: row.try_get("designation_id").ok(),
            password_hash: row.try_get("password_hash")?,
            // AnyPool surfaces SQLite INTEGER columns as integers, never Bool
            is_active: row.try_get::<i64, _>("is_active")? != 0,
            profile_image: row.try_get("profile_image").ok(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
