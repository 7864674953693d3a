// ==========================================
// 无人机作业排班系统 - 对话请求解析
// ==========================================
// 职责: 自由文本 → Intent → 单个 API 调用 → JSON
// 规则: 按固定顺序匹配, 先命中者生效
//   1. 问候  2. 任务编号 (urgent / assign|find|handle)
//   3. 可用飞手  4. 费用  5. 状态更新  6. 任务列表
// ==========================================

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ApiResult, DroneOpsApi};
use crate::domain::PilotStatus;

const EXAMPLE_QUERIES: [&str; 5] = [
    "Find pilot for PRJ001",
    "Show available pilots in Mumbai",
    "Urgent assign PRJ002",
    "Calculate cost for Arjun from 2026-02-06 to 2026-02-08",
    "Mark Arjun unavailable",
];

pub const MSG_GREETING: &str = "Hello 👋 I am your Drone Operations AI Agent. How can I assist you?";
pub const MSG_NOT_UNDERSTOOD: &str = "I did not understand your request.";
pub const MSG_SPECIFY_STATUS: &str = "Please specify status (Available / On Leave / Unavailable).";

static GREETING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(hi|hello|hey)\b").expect("greeting pattern"));
static MISSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprj\d+\b").expect("mission pattern"));
static ASSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(assign|find|handle)\b").expect("assign pattern"));
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin ([a-z]+(?: [a-z]+)*)").expect("location pattern"));

/// 城市名之后的时间/语气词, 不属于地点
const LOCATION_STOP_WORDS: [&str; 10] = [
    "today", "tomorrow", "now", "tonight", "please", "right", "this", "next", "for", "with",
];
static COST_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfor (\w+)").expect("cost name pattern"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern"));
static STATUS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:mark|set) (\w+)").expect("status name pattern"));
static UNAVAILABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bunavailable\b").expect("unavailable pattern"));
static AVAILABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bavailable\b").expect("available pattern"));

// ==========================================
// Intent - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    UrgentAssign { mission_id: String },
    AssignMission { mission_id: String },
    AvailablePilots { location: Option<String> },
    PilotCost { name: String, start: String, end: String },
    /// status 为 None 表示未识别出状态词
    UpdatePilotStatus { name: String, status: Option<PilotStatus> },
    ShowMissions,
    Unknown,
}

/// 解析自由文本请求
pub fn parse_intent(query: &str) -> Intent {
    let query = query.trim().to_lowercase();

    if GREETING_RE.is_match(&query) {
        return Intent::Greeting;
    }

    // 任务编号存在但无动作词时继续向下匹配
    if let Some(m) = MISSION_RE.find(&query) {
        let mission_id = m.as_str().to_uppercase();
        if query.contains("urgent") {
            return Intent::UrgentAssign { mission_id };
        }
        if ASSIGN_RE.is_match(&query) {
            return Intent::AssignMission { mission_id };
        }
    }

    if query.contains("available pilots") || query.contains("show pilots") {
        let location = LOCATION_RE
            .captures(&query)
            .and_then(|c| c.get(1))
            .and_then(|m| city_name(m.as_str()));
        return Intent::AvailablePilots { location };
    }

    if query.contains("cost") {
        let name = COST_NAME_RE.captures(&query).and_then(|c| c.get(1));
        let dates: Vec<&str> = DATE_RE.find_iter(&query).map(|m| m.as_str()).collect();
        if let (Some(name), [start, end]) = (name, dates.as_slice()) {
            return Intent::PilotCost {
                name: title_case(name.as_str()),
                start: start.to_string(),
                end: end.to_string(),
            };
        }
    }

    if let Some(name) = STATUS_NAME_RE.captures(&query).and_then(|c| c.get(1)) {
        // "unavailable" 必须先于 "available" 判断
        let status = if UNAVAILABLE_RE.is_match(&query) {
            Some(PilotStatus::Unavailable)
        } else if AVAILABLE_RE.is_match(&query) {
            Some(PilotStatus::Available)
        } else if query.contains("leave") {
            Some(PilotStatus::OnLeave)
        } else {
            None
        };
        return Intent::UpdatePilotStatus {
            name: title_case(name.as_str()),
            status,
        };
    }

    if query.contains("missions") {
        return Intent::ShowMissions;
    }

    Intent::Unknown
}

/// 执行解析结果, 每个 Intent 只调用一个 API 操作
pub fn dispatch(intent: &Intent, api: &DroneOpsApi) -> Value {
    debug!(?intent, "dispatch intent");
    match intent {
        Intent::Greeting => json!({ "message": MSG_GREETING, "examples": EXAMPLE_QUERIES }),
        Intent::UrgentAssign { mission_id } => to_json(api.urgent_reassignment(mission_id)),
        Intent::AssignMission { mission_id } => to_json(api.assign_mission(mission_id)),
        Intent::AvailablePilots { location } => {
            to_json(api.list_available_pilots(None, location.as_deref()))
        }
        Intent::PilotCost { name, start, end } => {
            to_json(api.calculate_pilot_cost(name, start, end))
        }
        Intent::UpdatePilotStatus { name, status } => match status {
            Some(status) => to_json(api.update_pilot_status(name, status.as_db_str())),
            None => json!({ "message": MSG_SPECIFY_STATUS }),
        },
        Intent::ShowMissions => to_json(api.list_missions()),
        Intent::Unknown => json!({ "message": MSG_NOT_UNDERSTOOD, "examples": EXAMPLE_QUERIES }),
    }
}

/// 解析并执行
pub fn handle_query(query: &str, api: &DroneOpsApi) -> Value {
    dispatch(&parse_intent(query), api)
}

/// 回复是否为结构化错误 (ErrorBody)
pub fn is_error_reply(reply: &Value) -> bool {
    reply.get("error_kind").is_some()
}

fn to_json<T: Serialize>(result: ApiResult<T>) -> Value {
    match result {
        Ok(payload) => serde_json::to_value(payload).unwrap_or_else(|e| {
            json!({ "error_kind": "InternalError", "message": e.to_string() })
        }),
        Err(err) => json!(err.to_body()),
    }
}

/// "new delhi today" -> "New Delhi"
fn city_name(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw
        .split_whitespace()
        .take_while(|w| !LOCATION_STOP_WORDS.contains(w))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(title_case(&words.join(" ")))
    }
}

/// "new delhi" -> "New Delhi"
fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
