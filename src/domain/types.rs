// ==========================================
// 无人机作业排班系统 - 领域类型定义
// ==========================================
// 职责: 封闭枚举 (状态/天气/优先级) + 数据源字符串互转
// 红线: 数据源字符串 ("Available" / "On Leave" 等) 必须逐字保留
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 数据源中表示"无当前任务"的占位值
pub const NO_ASSIGNMENT: &str = "-";

// ==========================================
// 飞手状态 (Pilot Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PilotStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Unavailable")]
    Unavailable,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl PilotStatus {
    /// 数据源字符串
    pub fn as_db_str(&self) -> &'static str {
        match self {
            PilotStatus::Available => "Available",
            PilotStatus::Unavailable => "Unavailable",
            PilotStatus::OnLeave => "On Leave",
        }
    }

    /// 从数据源字符串解析 (大小写不敏感, 未知值返回 None)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Some(PilotStatus::Available),
            "unavailable" => Some(PilotStatus::Unavailable),
            "on leave" => Some(PilotStatus::OnLeave),
            _ => None,
        }
    }
}

impl fmt::Display for PilotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ==========================================
// 无人机状态 (Drone Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    Available,
    Unavailable,
}

impl DroneStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            DroneStatus::Available => "Available",
            DroneStatus::Unavailable => "Unavailable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Some(DroneStatus::Available),
            "unavailable" => Some(DroneStatus::Unavailable),
            _ => None,
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ==========================================
// 天气预报 (Weather Forecast)
// ==========================================
// 只有 Rainy 参与天气冲突判定
/// 天气预报为开放取值: 常见值为具名变体, 其余原样保存在 Other 中
///
/// # 规则
/// - 解析区分大小写, 与数据源逐字比较 ("rainy" 不是 Rainy)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherForecast {
    Clear,
    Sunny,
    Cloudy,
    Windy,
    Rainy,
    Other(String),
}

impl WeatherForecast {
    /// 具名取值 (用于测试与枚举遍历)
    pub const KNOWN: [WeatherForecast; 5] = [
        WeatherForecast::Clear,
        WeatherForecast::Sunny,
        WeatherForecast::Cloudy,
        WeatherForecast::Windy,
        WeatherForecast::Rainy,
    ];

    pub fn as_db_str(&self) -> &str {
        match self {
            WeatherForecast::Clear => "Clear",
            WeatherForecast::Sunny => "Sunny",
            WeatherForecast::Cloudy => "Cloudy",
            WeatherForecast::Windy => "Windy",
            WeatherForecast::Rainy => "Rainy",
            WeatherForecast::Other(raw) => raw,
        }
    }

    /// 全函数: 任何字符串都有对应取值
    pub fn parse(s: &str) -> Self {
        match s {
            "Clear" => WeatherForecast::Clear,
            "Sunny" => WeatherForecast::Sunny,
            "Cloudy" => WeatherForecast::Cloudy,
            "Windy" => WeatherForecast::Windy,
            "Rainy" => WeatherForecast::Rainy,
            other => WeatherForecast::Other(other.to_string()),
        }
    }
}

impl From<String> for WeatherForecast {
    fn from(raw: String) -> Self {
        WeatherForecast::parse(&raw)
    }
}

impl From<WeatherForecast> for String {
    fn from(forecast: WeatherForecast) -> Self {
        forecast.as_db_str().to_string()
    }
}

impl fmt::Display for WeatherForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ==========================================
// 任务优先级 (Mission Priority)
// ==========================================
// 顺序: Normal < High < Urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MissionPriority {
    Normal,
    High,
    Urgent,
}

impl MissionPriority {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            MissionPriority::Normal => "Normal",
            MissionPriority::High => "High",
            MissionPriority::Urgent => "Urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(MissionPriority::Normal),
            "high" => Some(MissionPriority::High),
            "urgent" => Some(MissionPriority::Urgent),
            _ => None,
        }
    }

    /// 是否触发紧急改派 (High / Urgent)
    pub fn is_escalatable(&self) -> bool {
        matches!(self, MissionPriority::High | MissionPriority::Urgent)
    }
}

impl fmt::Display for MissionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ==========================================
// 标签列表与任务占用字段的解析辅助
// ==========================================

/// 解析逗号分隔的标签列表 (去除两端空白, 丢弃空标签)
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// 标签列表写回数据源格式
pub fn join_tag_list(tags: &[String]) -> String {
    tags.join(", ")
}

/// 解析当前任务字段: "-" 或空白表示无任务
pub fn parse_assignment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_ASSIGNMENT {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 当前任务写回数据源格式
pub fn assignment_to_db(assignment: Option<&str>) -> String {
    assignment.unwrap_or(NO_ASSIGNMENT).to_string()
}
