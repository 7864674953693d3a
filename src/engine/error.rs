// ==========================================
// 无人机作业排班系统 - 引擎层错误类型
// ==========================================
// 规则: 查找失败/解析失败在操作入口处立即返回, 不做部分计算
// 规则: 记录存储错误原样透传, 本层不重试
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("任务不存在: {mission_id}")]
    MissionNotFound { mission_id: String },

    #[error("飞手不存在: {name}")]
    PilotNotFound { name: String },

    #[error("无效日期区间: start={start}, end={end}")]
    InvalidDateRange { start: String, end: String },

    #[error("日期格式错误 (期望 YYYY-MM-DD): {value}")]
    DateParseError { value: String },

    #[error("任务数据异常: mission_id={mission_id}, {reason}")]
    MalformedMission { mission_id: String, reason: String },

    #[error("数据源不可用: {0}")]
    DataSourceUnavailable(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
