// ==========================================
// 无人机作业排班系统 - 匹配结果模型
// ==========================================
// 生命周期: 每次调用生成, 调用方消费后丢弃, 不落库
// ==========================================

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// 紧急改派: 非高优先级任务
pub const MSG_NOT_HIGH_PRIORITY: &str = "Mission is not high priority";

/// 紧急改派: 无可直接指派的飞手
pub const MSG_NO_DIRECT_PILOT: &str =
    "No direct pilot available. Suggest reassigning from lower priority mission.";

// ==========================================
// EligiblePilot - 合格飞手
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligiblePilot {
    pub pilot_id: String,
    pub name: String,
    pub estimated_cost: f64,
}

// ==========================================
// EligibilityResult - 匹配结果
// ==========================================
// 列表顺序 = 记录存储的迭代顺序
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub mission: String,
    pub eligible_pilots: Vec<EligiblePilot>,
    pub eligible_drones: Vec<String>,
    pub pilot_warnings: Vec<String>,
    pub drone_warnings: Vec<String>,
}

impl EligibilityResult {
    pub fn new(mission_id: &str) -> Self {
        Self {
            mission: mission_id.to_string(),
            ..Default::default()
        }
    }

    pub fn has_pilots(&self) -> bool {
        !self.eligible_pilots.is_empty()
    }
}

// ==========================================
// EscalationOutcome - 紧急改派结果
// ==========================================
// 非高优先级 / 无候选 都是正常结果, 不是错误
#[derive(Debug, Clone, PartialEq)]
pub enum EscalationOutcome {
    Eligible(EligibilityResult),
    NotHighPriority,
    NoDirectPilot,
}

impl EscalationOutcome {
    /// 提示信息 (有候选时为 None)
    pub fn message(&self) -> Option<&'static str> {
        match self {
            EscalationOutcome::Eligible(_) => None,
            EscalationOutcome::NotHighPriority => Some(MSG_NOT_HIGH_PRIORITY),
            EscalationOutcome::NoDirectPilot => Some(MSG_NO_DIRECT_PILOT),
        }
    }
}

// 序列化: 有候选时输出完整匹配结果, 否则输出 {"message": ...}
impl Serialize for EscalationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EscalationOutcome::Eligible(result) => result.serialize(serializer),
            other => {
                let mut state = serializer.serialize_struct("EscalationAdvice", 1)?;
                state.serialize_field("message", &other.message())?;
                state.end()
            }
        }
    }
}

// ==========================================
// CostEstimate - 飞手费用估算
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub pilot_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub daily_rate_inr: f64,
    pub total_cost: f64,
}

// ==========================================
// OperationMessage - 一般提示信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMessage {
    pub message: String,
}

impl OperationMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
