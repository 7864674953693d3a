// ==========================================
// 无人机作业排班系统 - API层错误类型
// ==========================================
// 职责: 将引擎/仓储/导入错误统一为调用方可见的错误分类
// 输出: ErrorBody { error_kind, message } 结构化错误对象
// ==========================================

use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
///
/// 每个变体对应一个稳定的 error_kind, 调用方据此区分失败原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 查找失败
    // ==========================================
    #[error("任务不存在: {0}")]
    MissionNotFound(String),

    #[error("飞手不存在: {0}")]
    PilotNotFound(String),

    #[error("无人机不存在: {0}")]
    DroneNotFound(String),

    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效日期区间: start={start}, end={end}")]
    InvalidDateRange { start: String, end: String },

    #[error("日期格式错误 (期望 YYYY-MM-DD): {0}")]
    DateParseError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("文件导入失败: {0}")]
    ImportFailed(String),

    // ==========================================
    // 数据错误
    // ==========================================
    #[error("任务数据异常: {0}")]
    MalformedMission(String),

    #[error("数据源不可用: {0}")]
    DataSourceUnavailable(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定的错误分类名
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissionNotFound(_) => "MissionNotFound",
            ApiError::PilotNotFound(_) => "PilotNotFound",
            ApiError::DroneNotFound(_) => "DroneNotFound",
            ApiError::InvalidDateRange { .. } => "InvalidDateRange",
            ApiError::DateParseError(_) => "DateParseError",
            ApiError::InvalidInput(_) => "InvalidInput",
            ApiError::ImportFailed(_) => "ImportFailed",
            ApiError::MalformedMission(_) => "MalformedMission",
            ApiError::DataSourceUnavailable(_) => "DataSourceUnavailable",
            ApiError::InternalError(_) => "InternalError",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::MissionNotFound(_) | ApiError::PilotNotFound(_) | ApiError::DroneNotFound(_)
        )
    }

    /// 调用方输入导致的错误
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidDateRange { .. }
                | ApiError::DateParseError(_)
                | ApiError::InvalidInput(_)
                | ApiError::ImportFailed(_)
        )
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error_kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// 结构化错误对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_kind: String,
    pub message: String,
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MissionNotFound { mission_id } => ApiError::MissionNotFound(mission_id),
            EngineError::PilotNotFound { name } => ApiError::PilotNotFound(name),
            EngineError::InvalidDateRange { start, end } => {
                ApiError::InvalidDateRange { start, end }
            }
            EngineError::DateParseError { value } => ApiError::DateParseError(value),
            EngineError::MalformedMission { mission_id, reason } => {
                ApiError::MalformedMission(format!("{}: {}", mission_id, reason))
            }
            EngineError::DataSourceUnavailable(repo_err) => repo_err.into(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 仓储层技术错误统一归入 DataSourceUnavailable, 仅保留实体未找到
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => match entity.as_str() {
                "Pilot" => ApiError::PilotNotFound(id),
                "Drone" => ApiError::DroneNotFound(id),
                "Mission" => ApiError::MissionNotFound(id),
                _ => ApiError::DataSourceUnavailable(format!("{}(id={})不存在", entity, id)),
            },
            other => ApiError::DataSourceUnavailable(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(repo_err) => repo_err.into(),
            other => ApiError::ImportFailed(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
