// ==========================================
// 无人机作业排班系统 - SQLite 记录存储
// ==========================================
// 职责: 聚合飞手/无人机/任务三个仓储, 对外实现 RecordStore
// 连接: 三个仓储共享同一个 Arc<Mutex<Connection>>
// ==========================================

use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use crate::repository::{drone_repo, mission_repo, pilot_repo};
use crate::repository::{DroneRepository, MissionRepository, PilotRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// SQLite 记录存储
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
    pub pilot_repo: PilotRepository,
    pub drone_repo: DroneRepository,
    pub mission_repo: MissionRepository,
}

impl SqliteRecordStore {
    /// 打开数据库文件并确保表结构存在
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 内存数据库 (测试/演示)
    pub fn open_in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        configure_sqlite_connection(&conn)?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建 (不建表)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            pilot_repo: PilotRepository::from_connection(conn.clone()),
            drone_repo: DroneRepository::from_connection(conn.clone()),
            mission_repo: MissionRepository::from_connection(conn.clone()),
            conn,
        }
    }

    /// 共享连接 (供配置管理器复用)
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    /// 单事务批量写入飞手
    pub fn upsert_pilots(&self, pilots: &[Pilot]) -> RepositoryResult<usize> {
        self.in_transaction(|tx| {
            for pilot in pilots {
                pilot_repo::upsert_with(tx, pilot)?;
            }
            Ok(pilots.len())
        })
    }

    /// 单事务批量写入无人机
    pub fn upsert_drones(&self, drones: &[Drone]) -> RepositoryResult<usize> {
        self.in_transaction(|tx| {
            for drone in drones {
                drone_repo::upsert_with(tx, drone)?;
            }
            Ok(drones.len())
        })
    }

    /// 单事务批量写入任务
    pub fn upsert_missions(&self, missions: &[Mission]) -> RepositoryResult<usize> {
        self.in_transaction(|tx| {
            for mission in missions {
                mission_repo::upsert_with(tx, mission)?;
            }
            Ok(missions.len())
        })
    }

    fn in_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&Connection) -> RepositoryResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 出错时 tx 被 drop, 自动回滚
        let value = f(&tx)?;
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(value)
    }
}

impl RecordStore for SqliteRecordStore {
    fn load_pilots(&self) -> RepositoryResult<Vec<Pilot>> {
        let pilots = self.pilot_repo.list_all()?;
        debug!(count = pilots.len(), "加载飞手快照");
        Ok(pilots)
    }

    fn load_drones(&self) -> RepositoryResult<Vec<Drone>> {
        let drones = self.drone_repo.list_all()?;
        debug!(count = drones.len(), "加载无人机快照");
        Ok(drones)
    }

    fn load_missions(&self) -> RepositoryResult<Vec<Mission>> {
        let missions = self.mission_repo.list_all()?;
        debug!(count = missions.len(), "加载任务快照");
        Ok(missions)
    }

    fn update_pilot_status(&self, name: &str, status: PilotStatus) -> RepositoryResult<()> {
        self.pilot_repo.update_status_by_name(name, status)?;
        info!(pilot = name, status = %status, "飞手状态已更新");
        Ok(())
    }

    fn update_drone_status(&self, drone_id: &str, status: DroneStatus) -> RepositoryResult<()> {
        self.drone_repo.update_status(drone_id, status)?;
        info!(drone = drone_id, status = %status, "无人机状态已更新");
        Ok(())
    }
}
