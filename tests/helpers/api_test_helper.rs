// ==========================================
// API 测试环境
// ==========================================
// 职责: 临时 SQLite 文件 + AppState, 预置场景名册
// ==========================================

use super::test_data_builder::scenario_roster;
use drone_ops_aps::app::AppState;
use drone_ops_aps::domain::{Drone, Mission, Pilot};
use std::error::Error;
use tempfile::NamedTempFile;

pub struct ApiTestEnv {
    pub state: AppState,
    // 保持临时文件存活
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 空数据库
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let temp_file = NamedTempFile::new()?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or("临时路径不是 UTF-8")?
            .to_string();
        let state = AppState::new(db_path)?;
        Ok(Self {
            state,
            _temp_file: temp_file,
        })
    }

    /// 预置 scenario_roster 的数据库
    pub fn with_scenario() -> Result<Self, Box<dyn Error>> {
        let env = Self::new()?;
        let (pilots, drones, missions) = scenario_roster();
        env.seed(&pilots, &drones, &missions)?;
        Ok(env)
    }

    pub fn seed(
        &self,
        pilots: &[Pilot],
        drones: &[Drone],
        missions: &[Mission],
    ) -> Result<(), Box<dyn Error>> {
        self.state.store.upsert_pilots(pilots)?;
        self.state.store.upsert_drones(drones)?;
        self.state.store.upsert_missions(missions)?;
        Ok(())
    }
}
