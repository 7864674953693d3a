// ==========================================
// 无人机作业排班系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供记录存储接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod drone_repo;
pub mod error;
pub mod memory_store;
pub mod mission_repo;
pub mod pilot_repo;
pub mod record_store;
pub mod sqlite_store;

// 重导出核心仓储
pub use drone_repo::DroneRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use memory_store::InMemoryRecordStore;
pub use mission_repo::MissionRepository;
pub use pilot_repo::PilotRepository;
pub use record_store::RecordStore;
pub use sqlite_store::SqliteRecordStore;
