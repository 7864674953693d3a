// ==========================================
// 无人机作业排班系统 - 无人机数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::types::{assignment_to_db, join_tag_list, parse_assignment, parse_tag_list};
use crate::domain::{Drone, DroneStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

struct DroneRow {
    drone_id: String,
    model: Option<String>,
    capabilities: String,
    status: String,
    location: String,
    current_assignment: String,
    maintenance_due: String,
    weather_resistance: String,
}

impl DroneRow {
    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            drone_id: row.get(0)?,
            model: row.get(1)?,
            capabilities: row.get(2)?,
            status: row.get(3)?,
            location: row.get(4)?,
            current_assignment: row.get(5)?,
            maintenance_due: row.get(6)?,
            weather_resistance: row.get(7)?,
        })
    }
}

impl TryFrom<DroneRow> for Drone {
    type Error = RepositoryError;

    fn try_from(row: DroneRow) -> Result<Self, Self::Error> {
        let status = DroneStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::field(
                "status",
                format!("drone {} has unknown status '{}'", row.drone_id, row.status),
            )
        })?;
        let maintenance_due = NaiveDate::parse_from_str(row.maintenance_due.trim(), "%Y-%m-%d")
            .map_err(|e| {
                RepositoryError::field(
                    "maintenance_due",
                    format!("drone {}: '{}' ({})", row.drone_id, row.maintenance_due, e),
                )
            })?;

        Ok(Drone {
            drone_id: row.drone_id,
            model: row.model.filter(|m| !m.trim().is_empty()),
            status,
            location: row.location,
            capabilities: parse_tag_list(&row.capabilities),
            weather_resistance: row.weather_resistance,
            maintenance_due,
            current_assignment: parse_assignment(&row.current_assignment),
        })
    }
}

// ==========================================
// DroneRepository - 机队仓储
// ==========================================
/// 职责: 管理 drone_fleet 表的读写
pub struct DroneRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DroneRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部无人机 (按插入顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Drone>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT drone_id, model, capabilities, status, location,
                   current_assignment, maintenance_due, weather_resistance
            FROM drone_fleet
            ORDER BY rowid ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], DroneRow::from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(Drone::try_from).collect()
    }

    pub fn upsert(&self, drone: &Drone) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert_with(&conn, drone)
    }

    /// 按编号更新状态
    pub fn update_status(&self, drone_id: &str, status: DroneStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE drone_fleet SET status = ?1 WHERE drone_id = ?2",
            params![status.as_db_str(), drone_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Drone".to_string(),
                id: drone_id.to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn upsert_with(conn: &Connection, drone: &Drone) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO drone_fleet (
            drone_id, model, capabilities, status, location,
            current_assignment, maintenance_due, weather_resistance
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(drone_id) DO UPDATE SET
            model = excluded.model,
            capabilities = excluded.capabilities,
            status = excluded.status,
            location = excluded.location,
            current_assignment = excluded.current_assignment,
            maintenance_due = excluded.maintenance_due,
            weather_resistance = excluded.weather_resistance
        "#,
        params![
            drone.drone_id,
            drone.model,
            join_tag_list(&drone.capabilities),
            drone.status.as_db_str(),
            drone.location,
            assignment_to_db(drone.current_assignment.as_deref()),
            drone.maintenance_due.format("%Y-%m-%d").to_string(),
            drone.weather_resistance,
        ],
    )?;
    Ok(())
}
