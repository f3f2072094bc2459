use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::{Area, Building, Keyword, ModuleCode, SubArea};

fn keyword_table(module: ModuleCode) -> &'static str {
    match module {
        ModuleCode::Facility => "issue_keywords",
        ModuleCode::Safety => "hazard_keywords",
    }
}

impl Database {
    // Building operations

    pub async fn create_building(&self, building: &Building) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO buildings (id, name, plant_location, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&building.id)
        .bind(&building.name)
        .bind(&building.plant_location)
        .bind(&building.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "Building created: {} at {}",
            building.name,
            building.plant_location
        );
        Ok(())
    }

    pub async fn list_buildings_by_location(
        &self,
        plant_location: &str,
    ) -> ApiResult<Vec<Building>> {
        let rows = sqlx::query(
            "SELECT id, name, plant_location, created_at
             FROM buildings
             WHERE plant_location = ?
             ORDER BY name",
        )
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut buildings = Vec::new();
        for row in rows {
            buildings.push(Building {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                plant_location: row.try_get("plant_location")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(buildings)
    }

    pub async fn get_building_by_id(&self, id: &str) -> ApiResult<Option<Building>> {
        let row = sqlx::query(
            "SELECT id, name, plant_location, created_at FROM buildings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Building {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                plant_location: row.try_get("plant_location")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete_building(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM buildings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Area operations

    pub async fn create_area(&self, area: &Area) -> ApiResult<()> {
        sqlx::query("INSERT INTO areas (id, building_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&area.id)
            .bind(&area.building_id)
            .bind(&area.name)
            .bind(&area.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All areas under buildings at one plant location, for assembling the dropdown tree.
    pub async fn list_areas_by_location(&self, plant_location: &str) -> ApiResult<Vec<Area>> {
        let rows = sqlx::query(
            "SELECT a.id, a.building_id, a.name, a.created_at
             FROM areas a
             INNER JOIN buildings b ON b.id = a.building_id
             WHERE b.plant_location = ?
             ORDER BY a.name",
        )
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut areas = Vec::new();
        for row in rows {
            areas.push(Area {
                id: row.try_get("id")?,
                building_id: row.try_get("building_id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(areas)
    }

    pub async fn get_area_by_id(&self, id: &str) -> ApiResult<Option<Area>> {
        let row = sqlx::query("SELECT id, building_id, name, created_at FROM areas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Area {
                id: row.try_get("id")?,
                building_id: row.try_get("building_id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete_area(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM areas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Sub-area operations

    pub async fn create_sub_area(&self, sub_area: &SubArea) -> ApiResult<()> {
        sqlx::query("INSERT INTO sub_areas (id, area_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&sub_area.id)
            .bind(&sub_area.area_id)
            .bind(&sub_area.name)
            .bind(&sub_area.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list_sub_areas_by_location(
        &self,
        plant_location: &str,
    ) -> ApiResult<Vec<SubArea>> {
        let rows = sqlx::query(
            "SELECT s.id, s.area_id, s.name, s.created_at
             FROM sub_areas s
             INNER JOIN areas a ON a.id = s.area_id
             INNER JOIN buildings b ON b.id = a.building_id
             WHERE b.plant_location = ?
             ORDER BY s.name",
        )
        .bind(plant_location)
        .fetch_all(&self.pool)
        .await?;

        let mut sub_areas = Vec::new();
        for row in rows {
            sub_areas.push(SubArea {
                id: row.try_get("id")?,
                area_id: row.try_get("area_id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(sub_areas)
    }

    pub async fn get_sub_area_by_id(&self, id: &str) -> ApiResult<Option<SubArea>> {
        let row = sqlx::query("SELECT id, area_id, name, created_at FROM sub_areas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(SubArea {
                id: row.try_get("id")?,
                area_id: row.try_get("area_id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete_sub_area(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM sub_areas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Keyword operations, one table per module

    pub async fn create_keyword(&self, module: ModuleCode, keyword: &Keyword) -> ApiResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, name, created_at) VALUES (?, ?, ?)",
            keyword_table(module)
        );

        sqlx::query(&sql)
            .bind(&keyword.id)
            .bind(&keyword.name)
            .bind(&keyword.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list_keywords(&self, module: ModuleCode) -> ApiResult<Vec<Keyword>> {
        let sql = format!(
            "SELECT id, name, created_at FROM {} ORDER BY name",
            keyword_table(module)
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut keywords = Vec::new();
        for row in rows {
            keywords.push(Keyword {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(keywords)
    }

    pub async fn delete_keyword(&self, module: ModuleCode, id: &str) -> ApiResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", keyword_table(module));

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
