// ==========================================
// 无人机作业排班系统 - 名册导入API
// ==========================================
// 职责: 封装名册文件导入, 记录耗时
// ==========================================

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::importer::{RosterImporter, RosterKind};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 导入对象类型
    pub kind: RosterKind,
    /// 写入的记录数
    pub imported: usize,
    /// 批次ID
    pub batch_id: String,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    importer: Arc<RosterImporter>,
}

impl ImportApi {
    pub fn new(importer: Arc<RosterImporter>) -> Self {
        Self { importer }
    }

    /// 导入名册文件
    ///
    /// # 参数
    /// - kind: pilots / drones / missions
    /// - file_path: 文件路径 (.csv / .xlsx / .xls)
    pub fn import_file(&self, kind: &str, file_path: &str) -> ApiResult<ImportApiResponse> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }
        let kind = RosterKind::parse(kind)?;

        let started = Instant::now();
        let summary = self.importer.import(kind, file_path.trim())?;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        info!(
            batch_id = %summary.batch_id,
            kind = %summary.kind,
            imported = summary.imported,
            elapsed_ms,
            "名册导入完成"
        );

        Ok(ImportApiResponse {
            kind: summary.kind,
            imported: summary.imported,
            batch_id: summary.batch_id,
            elapsed_ms,
        })
    }
}
