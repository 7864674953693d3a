// ==========================================
// 无人机作业排班系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供命令行/HTTP/对话入口调用
// ==========================================

pub mod error;
pub mod import_api;
pub mod ops_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorBody};
pub use import_api::{ImportApi, ImportApiResponse};
pub use ops_api::DroneOpsApi;
