// ==========================================
// 无人机作业排班系统 - 导入层
// ==========================================
// 职责: 外部名册文件 (飞手 / 无人机 / 任务) 导入 SQLite
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod roster_importer;
pub mod roster_mapper;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawRow, UniversalFileParser};
pub use roster_importer::{ImportSummary, RosterImporter, RosterKind};
pub use roster_mapper::RosterMapper;
