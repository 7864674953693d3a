// ==========================================
// 无人机作业排班系统 - 名册字段映射器
// ==========================================
// 职责: 原始行 → 领域实体 (Pilot / Drone / Mission)
// 列名: 与 pilot_roster / drone_fleet / missions 表字段一致
// 行号: 数据行从 1 开始计数 (不含表头)
// ==========================================

use crate::domain::types::{parse_assignment, parse_tag_list};
use crate::domain::{
    Drone, DroneStatus, Mission, MissionPriority, Pilot, PilotStatus, WeatherForecast,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use chrono::{Duration, NaiveDate};

/// Excel 日期序列号的基准日
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

pub struct RosterMapper;

impl RosterMapper {
    // ==========================================
    // 飞手
    // ==========================================
    pub fn map_pilot(&self, row: &RawRecord, row_number: usize) -> ImportResult<Pilot> {
        let status_raw = self.require(row, "status", row_number)?;
        let status = PilotStatus::parse(&status_raw).ok_or_else(|| {
            ImportError::TypeConversionError {
                row: row_number,
                field: "status".to_string(),
                message: format!("未知飞手状态: {}", status_raw),
            }
        })?;

        Ok(Pilot {
            pilot_id: self.require(row, "pilot_id", row_number)?,
            name: self.require(row, "name", row_number)?,
            status,
            location: self.require(row, "location", row_number)?,
            skills: parse_tag_list(&self.get_string(row, "skills").unwrap_or_default()),
            certifications: parse_tag_list(
                &self.get_string(row, "certifications").unwrap_or_default(),
            ),
            daily_rate_inr: self.require_f64(row, "daily_rate_inr", row_number)?,
            current_assignment: self
                .get_string(row, "current_assignment")
                .and_then(|a| parse_assignment(&a)),
        })
    }

    // ==========================================
    // 无人机
    // ==========================================
    pub fn map_drone(&self, row: &RawRecord, row_number: usize) -> ImportResult<Drone> {
        let status_raw = self.require(row, "status", row_number)?;
        let status = DroneStatus::parse(&status_raw).ok_or_else(|| {
            ImportError::TypeConversionError {
                row: row_number,
                field: "status".to_string(),
                message: format!("未知无人机状态: {}", status_raw),
            }
        })?;

        Ok(Drone {
            drone_id: self.require(row, "drone_id", row_number)?,
            model: self.get_string(row, "model"),
            status,
            location: self.require(row, "location", row_number)?,
            capabilities: parse_tag_list(&self.get_string(row, "capabilities").unwrap_or_default()),
            weather_resistance: self.get_string(row, "weather_resistance").unwrap_or_default(),
            maintenance_due: self.require_date(row, "maintenance_due", row_number)?,
            current_assignment: self
                .get_string(row, "current_assignment")
                .and_then(|a| parse_assignment(&a)),
        })
    }

    // ==========================================
    // 任务
    // ==========================================
    pub fn map_mission(&self, row: &RawRecord, row_number: usize) -> ImportResult<Mission> {
        let project_id = self.require(row, "project_id", row_number)?;

        let priority_raw = self.require(row, "priority", row_number)?;
        let priority = MissionPriority::parse(&priority_raw).ok_or_else(|| {
            ImportError::TypeConversionError {
                row: row_number,
                field: "priority".to_string(),
                message: format!("未知任务优先级: {}", priority_raw),
            }
        })?;

        let forecast_raw = self.require(row, "weather_forecast", row_number)?;
        let weather_forecast = WeatherForecast::parse(&forecast_raw);

        let start_date = self.require_date(row, "start_date", row_number)?;
        let end_date = self.require_date(row, "end_date", row_number)?;
        if end_date < start_date {
            return Err(ImportError::InvalidRecord {
                row: row_number,
                message: format!(
                    "任务 {} 结束日期 {} 早于开始日期 {}",
                    project_id, end_date, start_date
                ),
            });
        }

        Ok(Mission {
            project_id,
            client: self.get_string(row, "client"),
            location: self.require(row, "location", row_number)?,
            start_date,
            end_date,
            required_skill: self.get_string(row, "required_skills").unwrap_or_default(),
            required_certs: parse_tag_list(
                &self.get_string(row, "required_certs").unwrap_or_default(),
            ),
            mission_budget_inr: self.require_f64(row, "mission_budget_inr", row_number)?,
            weather_forecast,
            priority,
        })
    }

    /// 提取字符串字段 (空值视为缺失)
    fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    fn require(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })
    }

    fn require_f64(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<f64> {
        let value = self.require(row, key, row_number)?;
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })
    }

    /// 解析日期: YYYY-MM-DD, 或 Excel 日期序列号
    fn require_date(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<NaiveDate> {
        let value = self.require(row, key, row_number)?;
        if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            return Ok(date);
        }
        // calamine 输出的日期时间单元格形如 "2026-02-06 00:00:00"
        if let Some(date) = value
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        {
            return Ok(date);
        }
        if let Some(date) = value.parse::<f64>().ok().and_then(excel_serial_to_date) {
            return Ok(date);
        }

        Err(ImportError::DateFormatError {
            row: row_number,
            field: key.to_string(),
            value,
        })
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
