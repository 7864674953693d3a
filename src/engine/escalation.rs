// ==========================================
// 无人机作业排班系统 - 紧急改派控制器
// ==========================================
// 职责: 高优先级任务的匹配与升级提示
// 说明: 无候选时仅给出建议文本, 不检查也不修改低优先级任务
// ==========================================

use crate::domain::EscalationOutcome;
use crate::engine::eligibility::{find_mission, EligibilityEngine};
use crate::engine::error::EngineResult;
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// EscalationController
// ==========================================
pub struct EscalationController<S>
where
    S: RecordStore + ?Sized,
{
    store: Arc<S>,
    engine: Arc<EligibilityEngine<S>>,
}

impl<S> EscalationController<S>
where
    S: RecordStore + ?Sized,
{
    pub fn new(store: Arc<S>, engine: Arc<EligibilityEngine<S>>) -> Self {
        Self { store, engine }
    }

    /// 紧急改派
    ///
    /// # 规则
    /// 1. 任务不存在 → MissionNotFound
    /// 2. 优先级不是 High/Urgent → NotHighPriority (不做匹配)
    /// 3. 有合格飞手 → 原样返回匹配结果
    /// 4. 无合格飞手 → NoDirectPilot 建议
    #[instrument(skip_all, fields(mission_id = %mission_id))]
    pub fn urgent_reassignment(&self, mission_id: &str) -> EngineResult<EscalationOutcome> {
        let missions = self.store.load_missions()?;
        let mission = find_mission(&missions, mission_id)?;

        if !mission.priority.is_escalatable() {
            return Ok(EscalationOutcome::NotHighPriority);
        }

        let result = self.engine.assign_mission(mission_id)?;
        if result.has_pilots() {
            return Ok(EscalationOutcome::Eligible(result));
        }

        info!(priority = %mission.priority, "高优先级任务无可直接指派飞手");
        Ok(EscalationOutcome::NoDirectPilot)
    }
}
