// ==========================================
// 无人机作业排班系统 - 应用层
// ==========================================
// 职责: 组装各层实例, 提供 HTTP 外观 (server 特性)
// ==========================================

#[cfg(feature = "server")]
pub mod http;
pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
