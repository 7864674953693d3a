// ==========================================
// 无人机作业排班系统 - 任务匹配引擎
// ==========================================
// 职责: 为单个任务筛选合格飞手与无人机, 并给出被拒原因
// 输入: 任务 + 飞手/无人机快照 (来自 RecordStore)
// 输出: EligibilityResult (合格列表 + 告警列表)
// ==========================================
// 红线: 不写库, 不替调用方占用候选
// 红线: 每个候选只因第一条命中的规则被排除
// ==========================================

use crate::config::{EligibilityPolicy, RulePolicy};
use crate::domain::{
    Drone, DroneStatus, EligibilityResult, EligiblePilot, Mission, Pilot, PilotStatus,
};
use crate::engine::conflict_rules::ConflictRules;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// 单个候选的判定结果
// ==========================================
#[derive(Debug, PartialEq)]
enum Verdict<T> {
    /// 不在考虑范围 (非可用状态/地点不符), 不输出告警
    Skip,
    /// 被排除
    Rejected,
    /// 合格
    Eligible(T),
}

// ==========================================
// EligibilityEngine - 任务匹配引擎
// ==========================================
pub struct EligibilityEngine<S>
where
    S: RecordStore + ?Sized,
{
    store: Arc<S>,
    policy: EligibilityPolicy,
}

impl<S> EligibilityEngine<S>
where
    S: RecordStore + ?Sized,
{
    /// 使用默认规则策略创建
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, EligibilityPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: EligibilityPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// 为任务匹配飞手与无人机
    ///
    /// # 返回
    /// - Ok(EligibilityResult): 合格列表可能为空, 仍为成功结果
    /// - Err(MissionNotFound): 任务编号不存在
    /// - Err(DataSourceUnavailable): 记录存储读取失败
    #[instrument(skip_all, fields(mission_id = %mission_id))]
    pub fn assign_mission(&self, mission_id: &str) -> EngineResult<EligibilityResult> {
        let missions = self.store.load_missions()?;
        let mission = find_mission(&missions, mission_id)?;

        let pilots = self.store.load_pilots()?;
        let drones = self.store.load_drones()?;

        let result = self.evaluate(mission, &pilots, &drones)?;
        debug!(
            eligible_pilots = result.eligible_pilots.len(),
            eligible_drones = result.eligible_drones.len(),
            pilot_warnings = result.pilot_warnings.len(),
            drone_warnings = result.drone_warnings.len(),
            "任务匹配完成"
        );
        Ok(result)
    }

    /// 对给定快照执行匹配 (纯计算)
    pub fn evaluate(
        &self,
        mission: &Mission,
        pilots: &[Pilot],
        drones: &[Drone],
    ) -> EngineResult<EligibilityResult> {
        let duration_days = mission.duration_days();
        if duration_days < 1 {
            return Err(EngineError::MalformedMission {
                mission_id: mission.project_id.clone(),
                reason: format!(
                    "end_date {} precedes start_date {}",
                    mission.end_date, mission.start_date
                ),
            });
        }

        let mut result = EligibilityResult::new(&mission.project_id);

        // === 飞手筛选 ===
        for pilot in pilots {
            if let Verdict::Eligible(candidate) =
                self.evaluate_pilot(mission, duration_days, pilot, &mut result.pilot_warnings)
            {
                result.eligible_pilots.push(candidate);
            }
        }

        // === 无人机筛选 ===
        for drone in drones {
            if let Verdict::Eligible(drone_id) =
                self.evaluate_drone(mission, drone, &mut result.drone_warnings)
            {
                result.eligible_drones.push(drone_id);
            }
        }

        Ok(result)
    }

    /// 判定单个飞手
    ///
    /// # 规则顺序
    /// 1. 非 Available → 跳过
    /// 2. 地点不符 → 跳过
    /// 3. 已有任务 → 告警并排除
    /// 4. 技能不符 → 按策略 (默认静默排除)
    /// 5. 资质不符 → 按策略 (默认告警并排除)
    /// 6. 费用超预算 → 告警并排除
    fn evaluate_pilot(
        &self,
        mission: &Mission,
        duration_days: i64,
        pilot: &Pilot,
        warnings: &mut Vec<String>,
    ) -> Verdict<EligiblePilot> {
        if pilot.status != PilotStatus::Available {
            return Verdict::Skip;
        }
        if pilot.location != mission.location {
            return Verdict::Skip;
        }

        if let Some(assignment) = &pilot.current_assignment {
            warnings.push(format!("{} already assigned to {}", pilot.name, assignment));
            return Verdict::Rejected;
        }

        if ConflictRules::skill_mismatch(&pilot.skills, &mission.required_skill)
            && apply_policy(
                self.policy.skill_mismatch,
                || format!("Skill mismatch for {}", pilot.name),
                warnings,
            )
        {
            return Verdict::Rejected;
        }

        if ConflictRules::certification_mismatch(&pilot.certifications, &mission.required_certs)
            && apply_policy(
                self.policy.certification_mismatch,
                || format!("Certification mismatch for {}", pilot.name),
                warnings,
            )
        {
            return Verdict::Rejected;
        }

        let estimated_cost = pilot.cost_for_days(duration_days);
        if estimated_cost > mission.mission_budget_inr {
            warnings.push(format!("Budget overrun risk for {}", pilot.name));
            return Verdict::Rejected;
        }

        Verdict::Eligible(EligiblePilot {
            pilot_id: pilot.pilot_id.clone(),
            name: pilot.name.clone(),
            estimated_cost,
        })
    }

    /// 判定单架无人机
    ///
    /// # 规则顺序
    /// 1. 非 Available → 跳过
    /// 2. 地点不符 → 跳过
    /// 3. 已部署 → 告警并排除
    /// 4. 天气冲突 → 告警并排除
    fn evaluate_drone(
        &self,
        mission: &Mission,
        drone: &Drone,
        warnings: &mut Vec<String>,
    ) -> Verdict<String> {
        if drone.status != DroneStatus::Available {
            return Verdict::Skip;
        }
        if drone.location != mission.location {
            return Verdict::Skip;
        }

        if drone.is_assigned() {
            warnings.push(format!("Drone {} already deployed", drone.drone_id));
            return Verdict::Rejected;
        }

        if ConflictRules::weather_conflict(&drone.weather_resistance, &mission.weather_forecast) {
            warnings.push(format!("Weather risk for drone {}", drone.drone_id));
            return Verdict::Rejected;
        }

        Verdict::Eligible(drone.drone_id.clone())
    }
}

/// 规则命中后按策略处理; 返回是否排除
fn apply_policy<F>(policy: RulePolicy, message: F, warnings: &mut Vec<String>) -> bool
where
    F: FnOnce() -> String,
{
    if policy.warn {
        warnings.push(message());
    }
    policy.exclude
}

/// 按任务编号查找 (精确匹配)
pub(crate) fn find_mission<'a>(missions: &'a [Mission], mission_id: &str) -> EngineResult<&'a Mission> {
    missions
        .iter()
        .find(|m| m.project_id == mission_id)
        .ok_or_else(|| EngineError::MissionNotFound {
            mission_id: mission_id.to_string(),
        })
}
