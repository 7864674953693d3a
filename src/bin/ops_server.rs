// ==========================================
// 无人机作业排班系统 - HTTP 服务入口
// ==========================================
// 用法: ops_server [bind_addr]   (默认 127.0.0.1:8000)
// 数据库: DRONE_OPS_DB_PATH 或用户数据目录
// ==========================================

use anyhow::{anyhow, Context, Result};
use drone_ops_aps::app::{get_default_db_path, http, AppState};
use drone_ops_aps::logging;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let db_path = get_default_db_path();
    tracing::info!("{} v{}", drone_ops_aps::APP_NAME, drone_ops_aps::VERSION);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let app = http::router(state.ops_api.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;
    tracing::info!("HTTP 服务已启动: http://{}", addr);

    axum::serve(listener, app).await.context("HTTP 服务异常退出")?;
    Ok(())
}
