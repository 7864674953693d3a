// ==========================================
// 无人机作业排班系统 - 命令行入口
// ==========================================
// 用法:
//   drone-ops-aps import <pilots|drones|missions> <file>
//   drone-ops-aps ask <自由文本请求>
//   drone-ops-aps config show
//   drone-ops-aps config set <key> <value>
// 输出: stdout 为 JSON (成功结果或 ErrorBody), 日志写 stderr
// ==========================================

use anyhow::{anyhow, bail, Result};
use drone_ops_aps::api::ApiError;
use drone_ops_aps::app::{get_default_db_path, AppState};
use drone_ops_aps::{interpreter, logging};
use serde_json::Value;

const USAGE: &str = "用法:
  drone-ops-aps import <pilots|drones|missions> <file>
  drone-ops-aps ask <request text>
  drone-ops-aps config show
  drone-ops-aps config set <key> <value>";

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("缺少子命令\n{}", USAGE);
    };

    let db_path = get_default_db_path();
    tracing::info!("{} v{} 使用数据库: {}", drone_ops_aps::APP_NAME, drone_ops_aps::VERSION, db_path);
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    match run(&state, command, &args[1..]) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(CliFailure::Api(err)) => fail(&serde_json::to_value(err.to_body())?),
        Err(CliFailure::Reply(reply)) => fail(&reply),
    }
}

/// 子命令失败: 结构化错误, 或解释器已生成的错误回复
enum CliFailure {
    Api(ApiError),
    Reply(Value),
}

impl From<ApiError> for CliFailure {
    fn from(err: ApiError) -> Self {
        CliFailure::Api(err)
    }
}

fn usage_error(message: &str) -> CliFailure {
    CliFailure::Api(ApiError::InvalidInput(format!("{}\n{}", message, USAGE)))
}

fn run(state: &AppState, command: &str, args: &[String]) -> Result<Value, CliFailure> {
    match command {
        "import" => {
            let [kind, file] = args else {
                return Err(usage_error("import 需要 <kind> <file>"));
            };
            let resp = state.import_api.import_file(kind, file)?;
            serde_json::to_value(resp).map_err(|e| ApiError::InternalError(e.to_string()).into())
        }
        "ask" => {
            let query = args.join(" ");
            if query.trim().is_empty() {
                return Err(usage_error("ask 需要请求文本"));
            }
            let reply = interpreter::handle_query(&query, &state.ops_api);
            if interpreter::is_error_reply(&reply) {
                return Err(CliFailure::Reply(reply));
            }
            Ok(reply)
        }
        "config" => run_config(state, args),
        other => Err(usage_error(&format!("未知子命令: {}", other))),
    }
}

fn run_config(state: &AppState, args: &[String]) -> Result<Value, CliFailure> {
    match args {
        [sub] if sub == "show" => {
            let snapshot = state
                .config_manager
                .get_config_snapshot()
                .map_err(|e| ApiError::DataSourceUnavailable(format!("读取配置失败: {}", e)))?;
            serde_json::from_str::<Value>(&snapshot).map_err(|e| {
                ApiError::InternalError(format!("配置快照不是合法 JSON: {}", e)).into()
            })
        }
        [sub, key, value] if sub == "set" => {
            state
                .config_manager
                .set_global_config_value(key, value)
                .map_err(|e| ApiError::DataSourceUnavailable(format!("写入配置失败: {}", e)))?;
            Ok(serde_json::json!({ "message": format!("{} set to {}", key, value) }))
        }
        _ => Err(usage_error("未知 config 子命令")),
    }
}

/// 输出结构化错误并以非零状态退出
fn fail(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    std::process::exit(1);
}
