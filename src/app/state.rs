// ==========================================
// 无人机作业排班系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 规则策略在启动时从 config_kv 读取一次
// ==========================================

use std::sync::Arc;

use crate::api::{DroneOpsApi, ImportApi};
use crate::config::{load_eligibility_policy, load_maintenance_check, ConfigManager};
use crate::importer::RosterImporter;
use crate::repository::{RecordStore, SqliteRecordStore};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 命令行与 HTTP 入口共用
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// SQLite 记录存储
    pub store: Arc<SqliteRecordStore>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 作业调度API
    pub ops_api: Arc<DroneOpsApi>,

    /// 名册导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 打开数据库并组装各层实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let store = SqliteRecordStore::open(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        Self::from_store(db_path, Arc::new(store))
    }

    fn from_store(db_path: String, store: Arc<SqliteRecordStore>) -> Result<Self, String> {
        // 配置与记录存储共享同一连接
        let config_manager = Arc::new(
            ConfigManager::from_connection(store.connection())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let policy = load_eligibility_policy(config_manager.as_ref());
        let maintenance_check = load_maintenance_check(config_manager.as_ref());
        tracing::info!(?policy, maintenance_check, "规则策略已加载");

        let record_store: Arc<dyn RecordStore> = store.clone();
        let ops_api = Arc::new(DroneOpsApi::new(record_store, policy, maintenance_check));
        let import_api = Arc::new(ImportApi::new(Arc::new(RosterImporter::new(store.clone()))));

        Ok(Self {
            db_path,
            store,
            config_manager,
            ops_api,
            import_api,
        })
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 DRONE_OPS_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("DRONE_OPS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./drone_ops.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("drone-ops-aps");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("drone_ops.db");
        }
    }

    path.to_string_lossy().to_string()
}
