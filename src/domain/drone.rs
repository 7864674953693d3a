// ==========================================
// 无人机作业排班系统 - 无人机领域模型
// ==========================================
// 对齐: drone_fleet 表
// ==========================================

use crate::domain::types::DroneStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Drone - 无人机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub drone_id: String,
    pub model: Option<String>,
    pub status: DroneStatus,
    pub location: String,
    pub capabilities: Vec<String>,
    pub weather_resistance: String, // 防护等级, 如 "IP43 (Rain)"
    pub maintenance_due: NaiveDate,
    pub current_assignment: Option<String>,
}

impl Drone {
    pub fn is_assigned(&self) -> bool {
        self.current_assignment.is_some()
    }

    /// 维保是否逾期 (到期日早于 today)
    pub fn is_maintenance_overdue(&self, today: NaiveDate) -> bool {
        self.maintenance_due < today
    }
}
