// ==========================================
// 无人机作业排班系统 - 名册导入器
// ==========================================
// 流程: 文件解析 → 字段映射 (全部成功才写入) → 单事务 upsert
// 批次: 每次导入生成 uuid v4 批次号, 仅用于日志与返回值
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, RawRow, UniversalFileParser};
use crate::importer::roster_mapper::RosterMapper;
use crate::repository::SqliteRecordStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RosterKind - 导入对象类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterKind {
    Pilots,
    Drones,
    Missions,
}

impl RosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterKind::Pilots => "pilots",
            RosterKind::Drones => "drones",
            RosterKind::Missions => "missions",
        }
    }

    pub fn parse(s: &str) -> ImportResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pilots" | "pilot" => Ok(RosterKind::Pilots),
            "drones" | "drone" => Ok(RosterKind::Drones),
            "missions" | "mission" => Ok(RosterKind::Missions),
            other => Err(ImportError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for RosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 导入结果摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub kind: RosterKind,
    pub imported: usize,
}

// ==========================================
// RosterImporter
// ==========================================
pub struct RosterImporter {
    store: Arc<SqliteRecordStore>,
    parser: UniversalFileParser,
    mapper: RosterMapper,
}

impl RosterImporter {
    pub fn new(store: Arc<SqliteRecordStore>) -> Self {
        Self {
            store,
            parser: UniversalFileParser,
            mapper: RosterMapper,
        }
    }

    /// 导入一份名册文件
    ///
    /// # 参数
    /// - kind: 飞手 / 无人机 / 任务
    /// - file_path: .csv / .xlsx / .xls
    ///
    /// # 返回
    /// - Ok(ImportSummary): 写入条数与批次号
    /// - Err: 任意一行映射失败则整批不写入
    #[instrument(skip_all, fields(kind = %kind, file = %file_path.as_ref().display()))]
    pub fn import<P: AsRef<Path>>(&self, kind: RosterKind, file_path: P) -> ImportResult<ImportSummary> {
        let batch_id = Uuid::new_v4().to_string();
        let records = self.parser.parse(file_path.as_ref())?;
        info!(batch_id = %batch_id, rows = records.len(), "文件解析完成");

        let imported = match kind {
            RosterKind::Pilots => {
                let pilots = self.map_all(&records, |r, n| self.mapper.map_pilot(r, n))?;
                self.store.upsert_pilots(&pilots)?
            }
            RosterKind::Drones => {
                let drones = self.map_all(&records, |r, n| self.mapper.map_drone(r, n))?;
                self.store.upsert_drones(&drones)?
            }
            RosterKind::Missions => {
                let missions = self.map_all(&records, |r, n| self.mapper.map_mission(r, n))?;
                self.store.upsert_missions(&missions)?
            }
        };

        info!(batch_id = %batch_id, imported, "导入完成");
        Ok(ImportSummary {
            batch_id,
            kind,
            imported,
        })
    }

    fn map_all<T, F>(&self, records: &[RawRow], map: F) -> ImportResult<Vec<T>>
    where
        F: Fn(&RawRecord, usize) -> ImportResult<T>,
    {
        records
            .iter()
            .map(|row| {
                map(&row.fields, row.row_number).map_err(|e| {
                    warn!(row = row.row_number, error = %e, "行映射失败, 整批放弃");
                    e
                })
            })
            .collect()
    }
}
