// ==========================================
// 无人机作业排班系统 - 名册与机队查询
// ==========================================
// 职责: 可用飞手/可用无人机/任务列表的只读查询
// 说明: 维保检查仅作用于机队查询, 不参与任务匹配
// ==========================================

use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus, WeatherForecast};
use crate::engine::conflict_rules::ConflictRules;
use crate::engine::error::EngineResult;
use crate::repository::RecordStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// DroneFilter - 机队查询条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroneFilter {
    pub capability: Option<String>,
    pub location: Option<String>,
    pub weather: Option<WeatherForecast>,
}

// ==========================================
// RosterQuery
// ==========================================
pub struct RosterQuery<S>
where
    S: RecordStore + ?Sized,
{
    store: Arc<S>,
    maintenance_check: bool,
}

impl<S> RosterQuery<S>
where
    S: RecordStore + ?Sized,
{
    pub fn new(store: Arc<S>, maintenance_check: bool) -> Self {
        Self {
            store,
            maintenance_check,
        }
    }

    /// 可用飞手
    ///
    /// # 参数
    /// - skill: 技能探针 (大小写不敏感子串)
    /// - location: 精确匹配
    #[instrument(skip(self))]
    pub fn available_pilots(
        &self,
        skill: Option<&str>,
        location: Option<&str>,
    ) -> EngineResult<Vec<Pilot>> {
        let pilots = self.store.load_pilots()?;

        Ok(pilots
            .into_iter()
            .filter(|p| p.status == PilotStatus::Available)
            .filter(|p| skill.map_or(true, |s| ConflictRules::tags_contain(&p.skills, s)))
            .filter(|p| location.map_or(true, |l| p.location == l))
            .collect())
    }

    /// 可用无人机
    ///
    /// # 规则
    /// 1. status = Available
    /// 2. 开启维保检查时, maintenance_due >= today
    /// 3. 能力探针 / 地点 / 天气冲突 过滤
    #[instrument(skip(self))]
    pub fn available_drones(
        &self,
        filter: &DroneFilter,
        today: NaiveDate,
    ) -> EngineResult<Vec<Drone>> {
        let drones = self.store.load_drones()?;

        Ok(drones
            .into_iter()
            .filter(|d| d.status == DroneStatus::Available)
            .filter(|d| !self.maintenance_check || !d.is_maintenance_overdue(today))
            .filter(|d| {
                filter
                    .capability
                    .as_deref()
                    .map_or(true, |c| ConflictRules::tags_contain(&d.capabilities, c))
            })
            .filter(|d| filter.location.as_deref().map_or(true, |l| d.location == l))
            .filter(|d| {
                filter
                    .weather
                    .as_ref()
                    .map_or(true, |w| !ConflictRules::weather_conflict(&d.weather_resistance, w))
            })
            .collect())
    }

    /// 全部任务
    pub fn missions(&self) -> EngineResult<Vec<Mission>> {
        Ok(self.store.load_missions()?)
    }
}
