use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::{AccessRule, GrantPair, ModuleCode, RoleCode};

impl Database {
    // Access rule operations

    /// Insert a batch of rules for one department/designation profile atomically.
    pub async fn create_access_rules(&self, rules: &[AccessRule]) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        for rule in rules {
            sqlx::query(
                "INSERT INTO access_rules (id, department_id, designation_id, module_code,
                                           role_code, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&rule.id)
            .bind(&rule.department_id)
            .bind(&rule.designation_id)
            .bind(rule.module_code.as_str())
            .bind(rule.role_code.as_str())
            .bind(&rule.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("Access rules created: {} rule(s)", rules.len());
        Ok(())
    }

    /// List all rules joined with department and designation names.
    pub async fn list_access_rules(&self) -> ApiResult<Vec<(AccessRule, String, String)>> {
        let rows = sqlx::query(
            "SELECT r.id, r.department_id, r.designation_id, r.module_code, r.role_code,
                    r.created_at, d.name as department_name, g.name as designation_name
             FROM access_rules r
             INNER JOIN departments d ON d.id = r.department_id
             INNER JOIN designations g ON g.id = r.designation_id
             ORDER BY d.name, g.name, r.module_code, r.role_code",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::new();
        for row in rows {
            let rule = Self::rule_from_row(&row)?;
            let department_name: String = row.try_get("department_name")?;
            let designation_name: String = row.try_get("designation_name")?;
            results.push((rule, department_name, designation_name));
        }

        Ok(results)
    }

    /// Rules matching one department/designation profile, used to seed new employees.
    pub async fn get_rules_for_profile(
        &self,
        department_id: &str,
        designation_id: &str,
    ) -> ApiResult<Vec<GrantPair>> {
        let rows = sqlx::query(
            "SELECT module_code, role_code
             FROM access_rules
             WHERE department_id = ? AND designation_id = ?
             ORDER BY module_code, role_code",
        )
        .bind(department_id)
        .bind(designation_id)
        .fetch_all(&self.pool)
        .await?;

        let mut pairs = Vec::new();
        for row in rows {
            let module_str: String = row.try_get("module_code")?;
            let role_str: String = row.try_get("role_code")?;
            pairs.push(GrantPair {
                module_code: module_str.parse().unwrap_or(ModuleCode::Facility),
                role_code: role_str.parse().unwrap_or(RoleCode::Requester),
            });
        }

        Ok(pairs)
    }

    pub async fn delete_access_rule(&self, rule_id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM access_rules WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_rules_for_department(&self, department_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM access_rules WHERE department_id = ?")
            .bind(department_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    pub async fn count_rules_for_designation(&self, designation_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM access_rules WHERE designation_id = ?")
            .bind(designation_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    fn rule_from_row(row: &sqlx::any::AnyRow) -> ApiResult<AccessRule> {
        let module_str: String = row.try_get("module_code")?;
        let role_str: String = row.try_get("role_code")?;

        Ok(AccessRule {
            id: row.try_get("id")?,
            department_id: row.try_get("department_id")?,
            designation_id: row.try_get("designation_id")?,
            module_code: module_str.parse().unwrap_or(ModuleCode::Facility),
            role_code: role_str.parse().unwrap_or(RoleCode::Requester),
            created_at: row.try_get("created_at")?,
        })
    }
}
