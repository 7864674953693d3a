// ==========================================
// 无人机作业排班系统 - 飞手数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 边界: 文本分类字段在此转换为封闭枚举, 非法值直接拒绝
// ==========================================

use crate::domain::types::{assignment_to_db, join_tag_list, parse_assignment, parse_tag_list};
use crate::domain::{Pilot, PilotStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT pilot_id, name, skills, certifications, location, status,
           current_assignment, daily_rate_inr
    FROM pilot_roster
"#;

// ==========================================
// PilotRow - 表行原始值
// ==========================================
struct PilotRow {
    pilot_id: String,
    name: String,
    skills: String,
    certifications: String,
    location: String,
    status: String,
    current_assignment: String,
    daily_rate_inr: f64,
}

impl PilotRow {
    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            pilot_id: row.get(0)?,
            name: row.get(1)?,
            skills: row.get(2)?,
            certifications: row.get(3)?,
            location: row.get(4)?,
            status: row.get(5)?,
            current_assignment: row.get(6)?,
            daily_rate_inr: row.get(7)?,
        })
    }
}

impl TryFrom<PilotRow> for Pilot {
    type Error = RepositoryError;

    fn try_from(row: PilotRow) -> Result<Self, Self::Error> {
        let status = PilotStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::field(
                "status",
                format!("pilot {} has unknown status '{}'", row.pilot_id, row.status),
            )
        })?;

        Ok(Pilot {
            pilot_id: row.pilot_id,
            name: row.name,
            status,
            location: row.location,
            skills: parse_tag_list(&row.skills),
            certifications: parse_tag_list(&row.certifications),
            daily_rate_inr: row.daily_rate_inr,
            current_assignment: parse_assignment(&row.current_assignment),
        })
    }
}

// ==========================================
// PilotRepository - 飞手名册仓储
// ==========================================
/// 职责: 管理 pilot_roster 表的读写
pub struct PilotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PilotRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部飞手 (按插入顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Pilot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))?;

        let rows = stmt
            .query_map([], PilotRow::from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(Pilot::try_from).collect()
    }

    /// 按姓名查询 (精确匹配, 取第一条)
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Pilot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE name = ?1 ORDER BY rowid ASC LIMIT 1",
            SELECT_COLUMNS
        ))?;

        let result = stmt.query_row(params![name], PilotRow::from_row);
        match result {
            Ok(row) => Ok(Some(Pilot::try_from(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入或覆盖 (主键 pilot_id)
    pub fn upsert(&self, pilot: &Pilot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert_with(&conn, pilot)
    }

    /// 按姓名更新状态
    pub fn update_status_by_name(&self, name: &str, status: PilotStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE pilot_roster SET status = ?1 WHERE name = ?2",
            params![status.as_db_str(), name],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Pilot".to_string(),
                id: name.to_string(),
            });
        }
        Ok(())
    }
}

/// 在给定连接 (或事务) 上写入一条飞手记录
pub(crate) fn upsert_with(conn: &Connection, pilot: &Pilot) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO pilot_roster (
            pilot_id, name, skills, certifications, location, status,
            current_assignment, daily_rate_inr
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(pilot_id) DO UPDATE SET
            name = excluded.name,
            skills = excluded.skills,
            certifications = excluded.certifications,
            location = excluded.location,
            status = excluded.status,
            current_assignment = excluded.current_assignment,
            daily_rate_inr = excluded.daily_rate_inr
        "#,
        params![
            pilot.pilot_id,
            pilot.name,
            join_tag_list(&pilot.skills),
            join_tag_list(&pilot.certifications),
            pilot.location,
            pilot.status.as_db_str(),
            assignment_to_db(pilot.current_assignment.as_deref()),
            pilot.daily_rate_inr,
        ],
    )?;
    Ok(())
}
