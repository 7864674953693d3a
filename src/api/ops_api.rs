// ==========================================
// 无人机作业排班系统 - 作业调度 API
// ==========================================
// 职责: 对外暴露任务匹配/紧急调配/费用/名册查询/状态更新
// 说明: 状态更新直接写记录存储, 不经过引擎
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EligibilityPolicy;
use crate::domain::{
    CostEstimate, Drone, DroneStatus, EligibilityResult, EscalationOutcome, Mission,
    OperationMessage, Pilot, PilotStatus, WeatherForecast,
};
use crate::engine::{
    CostCalculator, DroneFilter, EligibilityEngine, EscalationController, RosterQuery,
};
use crate::repository::RecordStore;

// ==========================================
// DroneOpsApi
// ==========================================

/// 作业调度API
///
/// 职责：
/// 1. 任务匹配与紧急调配 (只读, 建议性结果)
/// 2. 飞手费用估算
/// 3. 可用飞手/无人机/任务查询
/// 4. 飞手/无人机状态更新
pub struct DroneOpsApi {
    store: Arc<dyn RecordStore>,
    engine: Arc<EligibilityEngine<dyn RecordStore>>,
    escalation: EscalationController<dyn RecordStore>,
    cost: CostCalculator<dyn RecordStore>,
    roster: RosterQuery<dyn RecordStore>,
}

impl DroneOpsApi {
    /// 创建新的DroneOpsApi实例
    ///
    /// # 参数
    /// - store: 记录存储
    /// - policy: 技能/证书不匹配的处理策略
    /// - maintenance_check: 机队查询是否剔除维保过期的无人机
    pub fn new(
        store: Arc<dyn RecordStore>,
        policy: EligibilityPolicy,
        maintenance_check: bool,
    ) -> Self {
        let engine = Arc::new(EligibilityEngine::with_policy(store.clone(), policy));
        Self {
            escalation: EscalationController::new(store.clone(), engine.clone()),
            cost: CostCalculator::new(store.clone()),
            roster: RosterQuery::new(store.clone(), maintenance_check),
            engine,
            store,
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        self.engine.policy()
    }

    // ==========================================
    // 任务匹配
    // ==========================================

    /// 为任务匹配飞手与无人机
    pub fn assign_mission(&self, mission_id: &str) -> ApiResult<EligibilityResult> {
        let mission_id = require_non_blank(mission_id, "任务编号")?;
        Ok(self.engine.assign_mission(mission_id)?)
    }

    /// 紧急调配 (仅 High / Urgent 任务)
    pub fn urgent_reassignment(&self, mission_id: &str) -> ApiResult<EscalationOutcome> {
        let mission_id = require_non_blank(mission_id, "任务编号")?;
        Ok(self.escalation.urgent_reassignment(mission_id)?)
    }

    /// 飞手费用估算
    pub fn calculate_pilot_cost(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> ApiResult<CostEstimate> {
        let name = require_non_blank(name, "飞手姓名")?;
        Ok(self
            .cost
            .calculate_pilot_cost(name, start_date.trim(), end_date.trim())?)
    }

    // ==========================================
    // 名册查询
    // ==========================================

    pub fn list_available_pilots(
        &self,
        skill: Option<&str>,
        location: Option<&str>,
    ) -> ApiResult<Vec<Pilot>> {
        Ok(self
            .roster
            .available_pilots(non_blank(skill), non_blank(location))?)
    }

    /// 可用无人机
    ///
    /// # 参数
    /// - weather: 天气名称, 仅 "Rainy" 会过滤无防雨等级的无人机
    /// - today: 维保检查基准日
    pub fn list_available_drones(
        &self,
        capability: Option<&str>,
        location: Option<&str>,
        weather: Option<&str>,
        today: NaiveDate,
    ) -> ApiResult<Vec<Drone>> {
        let filter = DroneFilter {
            capability: non_blank(capability).map(str::to_string),
            location: non_blank(location).map(str::to_string),
            weather: non_blank(weather).map(WeatherForecast::parse),
        };
        Ok(self.roster.available_drones(&filter, today)?)
    }

    pub fn list_missions(&self) -> ApiResult<Vec<Mission>> {
        Ok(self.roster.missions()?)
    }

    // ==========================================
    // 状态更新
    // ==========================================

    /// 更新飞手状态
    ///
    /// # 参数
    /// - name: 飞手姓名 (精确匹配)
    /// - status: Available / Unavailable / On Leave
    ///
    /// # 返回
    /// - Ok(OperationMessage): "<name> status updated to <status>"
    /// - Err(InvalidInput): 状态不在取值范围内
    /// - Err(PilotNotFound): 无此飞手
    pub fn update_pilot_status(&self, name: &str, status: &str) -> ApiResult<OperationMessage> {
        let name = require_non_blank(name, "飞手姓名")?;
        let status = PilotStatus::parse(status)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知飞手状态: {}", status)))?;

        self.store.update_pilot_status(name, status)?;
        info!(pilot = name, status = %status, "飞手状态更新完成");

        Ok(OperationMessage::new(format!(
            "{} status updated to {}",
            name, status
        )))
    }

    /// 更新无人机状态
    pub fn update_drone_status(&self, drone_id: &str, status: &str) -> ApiResult<OperationMessage> {
        let drone_id = require_non_blank(drone_id, "无人机编号")?;
        let status = DroneStatus::parse(status)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知无人机状态: {}", status)))?;

        self.store.update_drone_status(drone_id, status)?;
        info!(drone = drone_id, status = %status, "无人机状态更新完成");

        Ok(OperationMessage::new(format!(
            "{} status updated to {}",
            drone_id, status
        )))
    }
}

fn require_non_blank<'a>(value: &'a str, label: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", label)));
    }
    Ok(trimmed)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
