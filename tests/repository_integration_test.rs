// ==========================================
// SQLite 记录存储集成测试
// ==========================================
// 测试范围:
// 1. 写入/读取往返 (标签列表/占用字段/日期)
// 2. 按插入顺序返回
// 3. 状态更新与不存在记录
// 4. 非法分类值在边界处被拒绝
// 5. 天气预报为开放取值, 逐字比较
// ==========================================

mod helpers;

use std::sync::Arc;

use drone_ops_aps::domain::{DroneStatus, PilotStatus, WeatherForecast};
use drone_ops_aps::engine::{EligibilityEngine, EngineError};
use drone_ops_aps::repository::{
    InMemoryRecordStore, RecordStore, RepositoryError, SqliteRecordStore,
};
use helpers::test_data_builder::*;
use rusqlite::params;

fn store() -> SqliteRecordStore {
    SqliteRecordStore::open_in_memory().expect("无法创建内存数据库")
}

#[test]
fn test_飞手往返() {
    let store = store();
    let pilot = PilotBuilder::new("P001", "Arjun")
        .skills(&["Mapping", "Thermal"])
        .certifications(&["DGCA", "Night Ops"])
        .assigned_to("PRJ002")
        .build();

    store.upsert_pilots(&[pilot.clone()]).expect("写入失败");
    let loaded = store.load_pilots().expect("读取失败");

    assert_eq!(loaded, vec![pilot]);
}

#[test]
fn test_无人机与任务往返() {
    let store = store();
    let drone = DroneBuilder::new("D001")
        .capabilities(&["LiDAR", "RGB"])
        .maintenance_due("2026-03-01")
        .build();
    let mission = MissionBuilder::new("PRJ001")
        .required_certs(&["DGCA", "Night Ops"])
        .dates("2026-02-06", "2026-02-10")
        .build();

    store.upsert_drones(&[drone.clone()]).expect("写入失败");
    store.upsert_missions(&[mission.clone()]).expect("写入失败");

    assert_eq!(store.load_drones().expect("读取失败"), vec![drone]);
    assert_eq!(store.load_missions().expect("读取失败"), vec![mission]);
}

#[test]
fn test_按插入顺序返回_重复写入覆盖() {
    let store = store();
    store
        .upsert_pilots(&[
            PilotBuilder::new("P002", "Neha").build(),
            PilotBuilder::new("P001", "Arjun").build(),
        ])
        .expect("写入失败");
    store
        .upsert_pilots(&[PilotBuilder::new("P002", "Neha").daily_rate(1.0).build()])
        .expect("覆盖失败");

    let pilots = store.load_pilots().expect("读取失败");
    let ids: Vec<&str> = pilots.iter().map(|p| p.pilot_id.as_str()).collect();

    assert_eq!(ids, vec!["P002", "P001"]);
    assert_eq!(pilots[0].daily_rate_inr, 1.0);
}

#[test]
fn test_状态更新() {
    let store = store();
    store
        .upsert_pilots(&[PilotBuilder::new("P001", "Arjun").build()])
        .expect("写入失败");
    store
        .upsert_drones(&[DroneBuilder::new("D001").build()])
        .expect("写入失败");

    store
        .update_pilot_status("Arjun", PilotStatus::OnLeave)
        .expect("更新失败");
    store
        .update_drone_status("D001", DroneStatus::Unavailable)
        .expect("更新失败");

    assert_eq!(store.load_pilots().unwrap()[0].status, PilotStatus::OnLeave);
    assert_eq!(store.load_drones().unwrap()[0].status, DroneStatus::Unavailable);

    // 数据源中的原始文本保持约定写法
    let raw: String = store
        .connection()
        .lock()
        .unwrap()
        .query_row(
            "SELECT status FROM pilot_roster WHERE pilot_id = 'P001'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw, "On Leave");
}

#[test]
fn test_状态更新_记录不存在() {
    let store = store();

    let err = store
        .update_pilot_status("Ghost", PilotStatus::Available)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { ref entity, .. } if entity == "Pilot"));

    let err = store
        .update_drone_status("D404", DroneStatus::Available)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { ref entity, .. } if entity == "Drone"));
}

#[test]
fn test_按姓名查询() {
    let store = store();
    store
        .upsert_pilots(&[PilotBuilder::new("P001", "Arjun").build()])
        .expect("写入失败");

    assert!(store.pilot_repo.find_by_name("Arjun").unwrap().is_some());
    assert!(store.pilot_repo.find_by_name("arjun").unwrap().is_none());
}

#[test]
fn test_单表仓储写入() {
    let store = store();
    store
        .pilot_repo
        .upsert(&PilotBuilder::new("P001", "Arjun").build())
        .unwrap();
    store.drone_repo.upsert(&DroneBuilder::new("D001").build()).unwrap();
    store
        .mission_repo
        .upsert(&MissionBuilder::new("PRJ001").build())
        .unwrap();

    assert_eq!(store.pilot_repo.list_all().unwrap().len(), 1);
    assert_eq!(store.drone_repo.list_all().unwrap().len(), 1);
    assert_eq!(store.mission_repo.list_all().unwrap().len(), 1);
}

#[test]
fn test_内存存储_按主键替换() {
    let store = InMemoryRecordStore::default();
    store.put_pilot(PilotBuilder::new("P001", "Arjun").build()).unwrap();
    store
        .put_pilot(PilotBuilder::new("P001", "Arjun").location("Pune").build())
        .unwrap();
    store.put_drone(DroneBuilder::new("D001").build()).unwrap();
    store.put_mission(MissionBuilder::new("PRJ001").build()).unwrap();

    let pilots = store.load_pilots().unwrap();
    assert_eq!(pilots.len(), 1);
    assert_eq!(pilots[0].location, "Pune");
    assert_eq!(store.load_drones().unwrap().len(), 1);
    assert_eq!(store.load_missions().unwrap().len(), 1);
}

#[test]
fn test_非法状态值_引擎报告数据源不可用() {
    let store = Arc::new(store());
    store
        .upsert_missions(&[MissionBuilder::new("PRJ001").build()])
        .expect("写入失败");
    store
        .connection()
        .lock()
        .unwrap()
        .execute(
            "INSERT INTO pilot_roster (pilot_id, name, location, status, daily_rate_inr)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params!["P009", "Kiran", "Mumbai", "Sleeping", 1000.0],
        )
        .unwrap();

    let err = store.load_pilots().unwrap_err();
    assert!(matches!(err, RepositoryError::FieldValueError { ref field, .. } if field == "status"));

    let engine = EligibilityEngine::new(store);
    let err = engine.assign_mission("PRJ001").unwrap_err();
    assert!(matches!(err, EngineError::DataSourceUnavailable(_)));
}

fn insert_raw_mission(store: &SqliteRecordStore, project_id: &str, forecast: &str) {
    store
        .connection()
        .lock()
        .unwrap()
        .execute(
            "INSERT INTO missions (project_id, client, location, required_skills, required_certs,
                                   start_date, end_date, priority, mission_budget_inr, weather_forecast)
             VALUES (?1, 'Client A', 'Mumbai', 'Thermal', 'DGCA',
                     '2026-02-06', '2026-02-08', 'Normal', 50000.0, ?2)",
            params![project_id, forecast],
        )
        .unwrap();
}

#[test]
fn test_小写天气预报_不触发天气冲突() {
    let store = Arc::new(store());
    store
        .upsert_drones(&[DroneBuilder::new("D001").weather_resistance("None").build()])
        .expect("写入失败");
    insert_raw_mission(&store, "PRJ001", "rainy");

    let missions = store.load_missions().unwrap();
    assert_eq!(
        missions[0].weather_forecast,
        WeatherForecast::Other("rainy".to_string())
    );

    let engine = EligibilityEngine::new(store);
    let result = engine.assign_mission("PRJ001").expect("匹配失败");
    assert!(result.drone_warnings.is_empty(), "{:?}", result.drone_warnings);
    assert_eq!(result.eligible_drones, vec!["D001".to_string()]);
}

#[test]
fn test_未列出的天气预报_不影响其他任务() {
    let store = Arc::new(store());
    store
        .upsert_pilots(&[PilotBuilder::new("P001", "Arjun").build()])
        .expect("写入失败");
    store
        .upsert_drones(&[DroneBuilder::new("D001").weather_resistance("None").build()])
        .expect("写入失败");
    insert_raw_mission(&store, "PRJ001", "Clear");
    insert_raw_mission(&store, "PRJ002", "Stormy");

    let engine = EligibilityEngine::new(store.clone());
    let result = engine.assign_mission("PRJ001").expect("匹配失败");
    assert_eq!(result.eligible_drones, vec!["D001".to_string()]);

    let stormy = engine.assign_mission("PRJ002").expect("匹配失败");
    assert!(stormy.drone_warnings.is_empty());

    // 写回保持原值
    let missions = store.load_missions().unwrap();
    store.upsert_missions(&missions).expect("写入失败");
    let reloaded = store.load_missions().unwrap();
    assert_eq!(reloaded[1].weather_forecast.as_db_str(), "Stormy");
}

#[test]
fn test_文件数据库_重新打开保留数据() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();

    {
        let store = SqliteRecordStore::open(&path).expect("打开失败");
        store
            .upsert_pilots(&[PilotBuilder::new("P001", "Arjun").build()])
            .expect("写入失败");
    }

    let store = SqliteRecordStore::open(&path).expect("重新打开失败");
    assert_eq!(store.load_pilots().unwrap().len(), 1);
}
