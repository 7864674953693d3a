// ==========================================
// 无人机作业排班系统 - 任务数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: required_skills 列保存单个技能标签 (列名沿用数据源)
// ==========================================

use crate::domain::types::{join_tag_list, parse_tag_list};
use crate::domain::{Mission, MissionPriority, WeatherForecast};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

struct MissionRow {
    project_id: String,
    client: Option<String>,
    location: String,
    required_skills: String,
    required_certs: String,
    start_date: String,
    end_date: String,
    priority: String,
    mission_budget_inr: f64,
    weather_forecast: String,
}

impl MissionRow {
    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            project_id: row.get(0)?,
            client: row.get(1)?,
            location: row.get(2)?,
            required_skills: row.get(3)?,
            required_certs: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            priority: row.get(7)?,
            mission_budget_inr: row.get(8)?,
            weather_forecast: row.get(9)?,
        })
    }
}

fn parse_date(field: &str, project_id: &str, raw: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        RepositoryError::field(field, format!("mission {}: '{}' ({})", project_id, raw, e))
    })
}

impl TryFrom<MissionRow> for Mission {
    type Error = RepositoryError;

    fn try_from(row: MissionRow) -> Result<Self, Self::Error> {
        let priority = MissionPriority::parse(&row.priority).ok_or_else(|| {
            RepositoryError::field(
                "priority",
                format!("mission {} has unknown priority '{}'", row.project_id, row.priority),
            )
        })?;
        let weather_forecast = WeatherForecast::parse(&row.weather_forecast);
        let start_date = parse_date("start_date", &row.project_id, &row.start_date)?;
        let end_date = parse_date("end_date", &row.project_id, &row.end_date)?;

        Ok(Mission {
            project_id: row.project_id,
            client: row.client.filter(|c| !c.trim().is_empty()),
            location: row.location,
            start_date,
            end_date,
            required_skill: row.required_skills.trim().to_string(),
            required_certs: parse_tag_list(&row.required_certs),
            mission_budget_inr: row.mission_budget_inr,
            weather_forecast,
            priority,
        })
    }
}

// ==========================================
// MissionRepository - 任务仓储
// ==========================================
/// 职责: 管理 missions 表的读写
pub struct MissionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MissionRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部任务 (按插入顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Mission>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT project_id, client, location, required_skills, required_certs,
                   start_date, end_date, priority, mission_budget_inr, weather_forecast
            FROM missions
            ORDER BY rowid ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], MissionRow::from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(Mission::try_from).collect()
    }

    pub fn upsert(&self, mission: &Mission) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert_with(&conn, mission)
    }
}

pub(crate) fn upsert_with(conn: &Connection, mission: &Mission) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO missions (
            project_id, client, location, required_skills, required_certs,
            start_date, end_date, priority, mission_budget_inr, weather_forecast
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(project_id) DO UPDATE SET
            client = excluded.client,
            location = excluded.location,
            required_skills = excluded.required_skills,
            required_certs = excluded.required_certs,
            start_date = excluded.start_date,
            end_date = excluded.end_date,
            priority = excluded.priority,
            mission_budget_inr = excluded.mission_budget_inr,
            weather_forecast = excluded.weather_forecast
        "#,
        params![
            mission.project_id,
            mission.client,
            mission.location,
            mission.required_skill,
            join_tag_list(&mission.required_certs),
            mission.start_date.format("%Y-%m-%d").to_string(),
            mission.end_date.format("%Y-%m-%d").to_string(),
            mission.priority.as_db_str(),
            mission.mission_budget_inr,
            mission.weather_forecast.as_db_str(),
        ],
    )?;
    Ok(())
}
