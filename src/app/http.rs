// ==========================================
// 无人机作业排班系统 - HTTP 外观层
// ==========================================
// 职责: 将 DroneOpsApi 暴露为 REST 路由 (axum)
// 错误: ApiError → HTTP 状态码 + ErrorBody
//   404: 任务/飞手/无人机不存在
//   400: 输入错误
//   503: 数据源不可用
// ==========================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{ApiError, ApiResult, DroneOpsApi};
use crate::interpreter;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else if matches!(self, ApiError::DataSourceUnavailable(_)) {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self.to_body())).into_response()
    }
}

// ==========================================
// 请求参数
// ==========================================

#[derive(Debug, Deserialize)]
pub struct PilotQuery {
    pub skill: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DroneQuery {
    pub capability: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    pub name: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

// ==========================================
// 路由
// ==========================================

pub fn router(api: Arc<DroneOpsApi>) -> Router {
    Router::new()
        .route("/assign/:project_id", post(assign))
        .route("/urgent_assign/:project_id", post(urgent_assign))
        .route("/pilots", get(pilots))
        .route("/drones", get(drones))
        .route("/pilot_cost", get(pilot_cost))
        .route("/update_pilot_status", post(update_pilot_status))
        .route("/missions", get(missions))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(api)
}

/// 在阻塞线程池中执行同步 API 调用
async fn blocking<T, F>(api: Arc<DroneOpsApi>, f: F) -> ApiResult<Json<T>>
where
    T: Serialize + Send + 'static,
    F: FnOnce(&DroneOpsApi) -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&api))
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?
        .map(Json)
}

async fn assign(
    State(api): State<Arc<DroneOpsApi>>,
    Path(project_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    blocking(api, move |api| api.assign_mission(&project_id)).await
}

async fn urgent_assign(
    State(api): State<Arc<DroneOpsApi>>,
    Path(project_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    blocking(api, move |api| api.urgent_reassignment(&project_id)).await
}

async fn pilots(
    State(api): State<Arc<DroneOpsApi>>,
    Query(q): Query<PilotQuery>,
) -> ApiResult<impl IntoResponse> {
    blocking(api, move |api| {
        api.list_available_pilots(q.skill.as_deref(), q.location.as_deref())
    })
    .await
}

async fn drones(
    State(api): State<Arc<DroneOpsApi>>,
    Query(q): Query<DroneQuery>,
) -> ApiResult<impl IntoResponse> {
    let today = chrono::Local::now().date_naive();
    blocking(api, move |api| {
        api.list_available_drones(
            q.capability.as_deref(),
            q.location.as_deref(),
            q.weather.as_deref(),
            today,
        )
    })
    .await
}

async fn pilot_cost(
    State(api): State<Arc<DroneOpsApi>>,
    Query(q): Query<CostQuery>,
) -> ApiResult<impl IntoResponse> {
    blocking(api, move |api| api.calculate_pilot_cost(&q.name, &q.start, &q.end)).await
}

async fn update_pilot_status(
    State(api): State<Arc<DroneOpsApi>>,
    Query(q): Query<StatusQuery>,
) -> ApiResult<impl IntoResponse> {
    blocking(api, move |api| api.update_pilot_status(&q.name, &q.status)).await
}

async fn missions(State(api): State<Arc<DroneOpsApi>>) -> ApiResult<impl IntoResponse> {
    blocking(api, |api| api.list_missions()).await
}

async fn chat(
    State(api): State<Arc<DroneOpsApi>>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<Value>> {
    blocking(api, move |api| Ok(interpreter::handle_query(&req.query, api))).await
}
