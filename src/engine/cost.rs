// ==========================================
// 无人机作业排班系统 - 飞手费用计算
// ==========================================
// 规则: total_cost = daily_rate × ((end - start).days + 1)
// 与任务天数口径一致, 起止日期均计入
// ==========================================

use crate::domain::mission::inclusive_days;
use crate::domain::CostEstimate;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::RecordStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;

/// 日期字符串格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// CostCalculator - 费用计算器
// ==========================================
pub struct CostCalculator<S>
where
    S: RecordStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> CostCalculator<S>
where
    S: RecordStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 计算飞手在日期区间内的费用
    ///
    /// # 参数
    /// - name: 飞手姓名 (精确匹配)
    /// - start_date / end_date: YYYY-MM-DD
    ///
    /// # 返回
    /// - Err(PilotNotFound): 无此飞手
    /// - Err(DateParseError): 日期不是合法的 YYYY-MM-DD
    /// - Err(InvalidDateRange): end < start
    #[instrument(skip_all, fields(pilot = %name, start = %start_date, end = %end_date))]
    pub fn calculate_pilot_cost(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> EngineResult<CostEstimate> {
        let pilots = self.store.load_pilots()?;
        let pilot = pilots
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::PilotNotFound {
                name: name.to_string(),
            })?;

        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        let days = inclusive_days(start, end);
        if days <= 0 {
            return Err(EngineError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(CostEstimate {
            pilot_name: pilot.name.clone(),
            start_date: start,
            end_date: end,
            days,
            daily_rate_inr: pilot.daily_rate_inr,
            total_cost: pilot.cost_for_days(days),
        })
    }
}

/// 解析 YYYY-MM-DD (容忍两端空白)
pub fn parse_date(raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| EngineError::DateParseError {
        value: raw.to_string(),
    })
}
