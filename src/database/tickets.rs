use async_trait::async_trait;
use sqlx::Row;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{Employee, ModuleCode, Ticket, TicketStatus};

fn ticket_table(module: ModuleCode) -> &'static str {
    match module {
        ModuleCode::Facility => "facility_tickets",
        ModuleCode::Safety => "safety_tickets",
    }
}

// Safety tickets additionally carry image_data; facility rows map it to None.
fn ticket_columns(module: ModuleCode) -> &'static str {
    match module {
        ModuleCode::Facility => {
            "id, ticket_number, raiser_id, raiser_name, plant_location, building_name,
             area_name, sub_area_name, keyword, description, status,
             assigned_to_id, assigned_to_name, planned_by, created_at, updated_at"
        }
        ModuleCode::Safety => {
            "id, ticket_number, raiser_id, raiser_name, plant_location, building_name,
             area_name, sub_area_name, keyword, description, image_data, status,
             assigned_to_id, assigned_to_name, planned_by, created_at, updated_at"
        }
    }
}

#[async_trait]
impl TicketRepository for Database {
    async fn create_ticket(&self, module: ModuleCode, ticket: &Ticket) -> ApiResult<Ticket> {
        let table = ticket_table(module);

        // Ticket numbers start at 1001 and grow monotonically per module
        let sql = match module {
            ModuleCode::Facility => format!(
                "INSERT INTO {table} (id, ticket_number, raiser_id, raiser_name, plant_location,
                                      building_name, area_name, sub_area_name, keyword,
                                      description, status, created_at, updated_at)
                 VALUES (?, (SELECT COALESCE(MAX(ticket_number), 1000) + 1 FROM {table}),
                         ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            ModuleCode::Safety => format!(
                "INSERT INTO {table} (id, ticket_number, raiser_id, raiser_name, plant_location,
                                      building_name, area_name, sub_area_name, keyword,
                                      description, image_data, status, created_at, updated_at)
                 VALUES (?, (SELECT COALESCE(MAX(ticket_number), 1000) + 1 FROM {table}),
                         ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
        };

        let mut query = sqlx::query(&sql)
            .bind(&ticket.id)
            .bind(&ticket.raiser_id)
            .bind(&ticket.raiser_name)
            .bind(&ticket.plant_location)
            .bind(&ticket.building_name)
            .bind(ticket.area_name.as_deref())
            .bind(ticket.sub_area_name.as_deref())
            .bind(&ticket.keyword)
            .bind(ticket.description.as_deref());
        if module == ModuleCode::Safety {
            query = query.bind(ticket.image_data.as_deref());
        }
        query
            .bind(ticket.status.to_string())
            .bind(&ticket.created_at)
            .bind(&ticket.updated_at)
            .execute(&self.pool)
            .await?;

        // Fetch back to pick up the allocated ticket number
        let created = self
            .get_ticket_by_id(module, &ticket.id)
            .await?
            .ok_or_else(|| ApiError::Internal("Ticket vanished after insert".to_string()))?;

        tracing::info!(
            "Ticket created: module={}, id={}, ticket_number={}",
            module,
            created.id,
            created.ticket_number
        );

        Ok(created)
    }

    async fn get_ticket_by_id(&self, module: ModuleCode, id: &str) -> ApiResult<Option<Ticket>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            ticket_columns(module),
            ticket_table(module)
        );

        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok(Some(Self::ticket_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_tickets_by_location(
        &self,
        module: ModuleCode,
        plant_location: &str,
    ) -> ApiResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE plant_location = ? ORDER BY ticket_number DESC",
            ticket_columns(module),
            ticket_table(module)
        );

        let rows = sqlx::query(&sql)
            .bind(plant_location)
            .fetch_all(&self.pool)
            .await?;

        let mut tickets = Vec::new();
        for row in rows {
            tickets.push(Self::ticket_from_row(&row)?);
        }

        Ok(tickets)
    }

    async fn assign_ticket(
        &self,
        module: ModuleCode,
        ticket_id: &str,
        technician_id: &str,
        technician_name: &str,
        planned_by: &str,
    ) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let sql = format!(
            "UPDATE {}
             SET assigned_to_id = ?, assigned_to_name = ?, planned_by = ?, status = ?, updated_at = ?
             WHERE id = ?",
            ticket_table(module)
        );

        let result = sqlx::query(&sql)
            .bind(technician_id)
            .bind(technician_name)
            .bind(planned_by)
            .bind(TicketStatus::Assigned.to_string())
            .bind(&now)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Ticket {} not found", ticket_id)));
        }

        tracing::info!(
            "Ticket assigned: module={}, id={}, technician={}",
            module,
            ticket_id,
            technician_id
        );
        Ok(())
    }

    async fn update_ticket_status(
        &self,
        module: ModuleCode,
        ticket_id: &str,
        status: TicketStatus,
    ) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let sql = format!(
            "UPDATE {} SET status = ?, updated_at = ? WHERE id = ?",
            ticket_table(module)
        );

        let result = sqlx::query(&sql)
            .bind(status.to_string())
            .bind(&now)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Ticket {} not found", ticket_id)));
        }

        tracing::info!(
            "Ticket status updated: module={}, id={}, status={}",
            module,
            ticket_id,
            status
        );
        Ok(())
    }

    async fn delete_ticket(&self, module: ModuleCode, ticket_id: &str) -> ApiResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", ticket_table(module));

        let result = sqlx::query(&sql).bind(ticket_id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create_ticket(&self, module: ModuleCode, ticket: &Ticket) -> ApiResult<Ticket>;
    async fn get_ticket_by_id(&self, module: ModuleCode, id: &str) -> ApiResult<Option<Ticket>>;
    async fn list_tickets_by_location(
        &self,
        module: ModuleCode,
        plant_location: &str,
    ) -> ApiResult<Vec<Ticket>>;
    async fn assign_ticket(
        &self,
        module: ModuleCode,
        ticket_id: &str,
        technician_id: &str,
        technician_name: &str,
        planned_by: &str,
    ) -> ApiResult<()>;
    async fn update_ticket_status(
        &self,
        module: ModuleCode,
        ticket_id: &str,
        status: TicketStatus,
    ) -> ApiResult<()>;
    async fn delete_ticket(&self, module: ModuleCode, ticket_id: &str) -> ApiResult<bool>;
}

impl Database {
    /// Employees holding the technician role for a module at a plant location.
    pub async fn get_technicians(
        &self,
        module: ModuleCode,
        plant_location: &str,
    ) -> ApiResult<Vec<Employee>> {
        let rows = sqlx::query(
            "SELECT DISTINCT e.id, e.employee_no, e.full_name, e.email, e.plant_location,
                    e.department_id, e.designation_id, e.password_hash, e.is_active,
                    e.profile_image, e.created_at, e.updated_at
             FROM employees e
             INNER JOIN employee_grants g ON g.employee_id = e.id
             WHERE g.module_code = ? AND g.role_code = ? AND e.plant_location = ?
             ORDER BY e.full_name",
        )
        .bind(module.as_str())
        .bind("TEC")
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut technicians = Vec::new();
        for row in rows {
            technicians.push(Employee {
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
            });
        }

        Ok(technicians)
    }

    fn ticket_from_row(row: &sqlx::any::AnyRow) -> ApiResult<Ticket> {
        let status_str: String = row.try_get("status")?;

        Ok(Ticket {
            id: row.try_get("id")?,
            ticket_number: row.try_get("ticket_number")?,
            raiser_id: row.try_get("raiser_id")?,
            raiser_name: row.try_get("raiser_name")?,
            plant_location: row.try_get("plant_location")?,
            building_name: row.try_get("building_name")?,
            area_name: row.try_get("area_name").ok(),
            sub_area_name: row.try_get("sub_area_name").ok(),
            keyword: row.try_get("keyword")?,
            description: row.try_get("description").ok(),
            image_data: row.try_get("image_data").ok(),
            status: TicketStatus::from(status_str),
            assigned_to_id: row.try_get("assigned_to_id").ok(),
            assigned_to_name: row.try_get("assigned_to_name").ok(),
            planned_by: row.try_get("planned_by").ok(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
