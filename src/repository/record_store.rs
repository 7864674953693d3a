// ==========================================
// 无人机作业排班系统 - 记录存储接口
// ==========================================
// 职责: 引擎依赖的外部数据能力 (读取快照 + 状态回写)
// 红线: 引擎只读; 状态回写绕过引擎, 后写覆盖先写
// ==========================================

use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus};
use crate::repository::error::RepositoryResult;

// ==========================================
// RecordStore Trait
// ==========================================
// 实现者: SqliteRecordStore (生产), InMemoryRecordStore (测试/演示)
pub trait RecordStore: Send + Sync {
    /// 全量飞手快照 (数据源顺序)
    fn load_pilots(&self) -> RepositoryResult<Vec<Pilot>>;

    /// 全量无人机快照 (数据源顺序)
    fn load_drones(&self) -> RepositoryResult<Vec<Drone>>;

    /// 全量任务快照 (数据源顺序)
    fn load_missions(&self) -> RepositoryResult<Vec<Mission>>;

    /// 按姓名更新飞手状态 (精确匹配)
    ///
    /// # 返回
    /// - Err(NotFound): 无此飞手
    fn update_pilot_status(&self, name: &str, status: PilotStatus) -> RepositoryResult<()>;

    /// 按编号更新无人机状态
    fn update_drone_status(&self, drone_id: &str, status: DroneStatus) -> RepositoryResult<()>;
}
