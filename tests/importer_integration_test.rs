// ==========================================
// 名册导入集成测试
// ==========================================
// 测试范围:
// 1. CSV 导入飞手/无人机/任务
// 2. 任意一行失败时整批不写入, 错误行号与文件一致
// 3. 导入后直接参与任务匹配
// ==========================================

mod helpers;

use std::io::Write;

use drone_ops_aps::domain::{MissionPriority, PilotStatus, WeatherForecast};
use drone_ops_aps::importer::RosterKind;
use drone_ops_aps::repository::RecordStore;
use helpers::api_test_helper::ApiTestEnv;
use tempfile::{Builder, NamedTempFile};

const PILOTS_CSV: &str = "\
pilot_id,name,skills,certifications,location,status,current_assignment,daily_rate_inr
P001,Arjun,\"Mapping, Survey\",\"DGCA, Night Ops\",Bangalore,Available,-,1500
P002,Neha,Inspection,DGCA,Mumbai,Assigned,PRJ002,3000
";

const PILOTS_CSV_VALID: &str = "\
pilot_id,name,skills,certifications,location,status,current_assignment,daily_rate_inr
P001,Arjun,\"Mapping, Survey\",\"DGCA, Night Ops\",Bangalore,Available,-,1500
P002,Neha,Inspection,DGCA,Mumbai,On Leave,PRJ002,3000
";

const DRONES_CSV: &str = "\
drone_id,model,capabilities,status,location,current_assignment,maintenance_due,weather_resistance
D001,DJI M300,\"LiDAR, RGB\",Available,Bangalore,-,2026-03-01,IP43 (Rain)
D002,DJI Mavic 3,RGB,Available,Bangalore,-,2026-02-15,None
";

const MISSIONS_CSV: &str = "\
project_id,client,location,required_skills,required_certs,start_date,end_date,priority,mission_budget_inr,weather_forecast
PRJ001,Client A,Bangalore,Mapping,DGCA,2026-02-06,2026-02-08,High,10000,Rainy
";

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

#[test]
fn test_导入飞手() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = csv_file(PILOTS_CSV_VALID);

    let resp = env
        .state
        .import_api
        .import_file("pilots", &path_of(&file))
        .expect("导入失败");

    assert_eq!(resp.kind, RosterKind::Pilots);
    assert_eq!(resp.imported, 2);
    assert!(!resp.batch_id.is_empty());

    let pilots = env.state.store.load_pilots().unwrap();
    assert_eq!(pilots[0].skills, vec!["Mapping", "Survey"]);
    assert_eq!(pilots[0].certifications, vec!["DGCA", "Night Ops"]);
    assert_eq!(pilots[0].current_assignment, None);
    assert_eq!(pilots[1].status, PilotStatus::OnLeave);
    assert_eq!(pilots[1].current_assignment.as_deref(), Some("PRJ002"));
}

#[test]
fn test_非法行_整批不写入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = csv_file(PILOTS_CSV);

    let err = env
        .state
        .import_api
        .import_file("pilots", &path_of(&file))
        .unwrap_err();

    assert_eq!(err.kind(), "ImportFailed");
    assert!(err.to_string().contains("行 2"));
    assert!(env.state.store.load_pilots().unwrap().is_empty());
}

#[test]
fn test_空白行之后_错误行号与文件一致() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = csv_file(
        "\
pilot_id,name,skills,certifications,location,status,current_assignment,daily_rate_inr
P001,Arjun,Mapping,DGCA,Bangalore,Available,-,1500

,,,,,,,
P002,Neha,Inspection,DGCA,Mumbai,Assigned,-,3000
",
    );

    let err = env
        .state
        .import_api
        .import_file("pilots", &path_of(&file))
        .unwrap_err();

    assert_eq!(err.kind(), "ImportFailed");
    assert!(err.to_string().contains("行 4"), "{}", err);
    assert!(env.state.store.load_pilots().unwrap().is_empty());
}

#[test]
fn test_未知导入类型() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = csv_file(PILOTS_CSV_VALID);

    let err = env
        .state
        .import_api
        .import_file("rollers", &path_of(&file))
        .unwrap_err();

    assert_eq!(err.kind(), "ImportFailed");
}

#[test]
fn test_文件不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let err = env
        .state
        .import_api
        .import_file("drones", "/nonexistent/drones.csv")
        .unwrap_err();

    assert_eq!(err.kind(), "ImportFailed");
}

#[test]
fn test_导入后参与匹配() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let pilots = csv_file(PILOTS_CSV_VALID);
    let drones = csv_file(DRONES_CSV);
    let missions = csv_file(MISSIONS_CSV);

    let api = &env.state.import_api;
    api.import_file("pilots", &path_of(&pilots)).expect("导入失败");
    api.import_file("drones", &path_of(&drones)).expect("导入失败");
    api.import_file("missions", &path_of(&missions)).expect("导入失败");

    let loaded = env.state.store.load_missions().unwrap();
    assert_eq!(loaded[0].priority, MissionPriority::High);
    assert_eq!(loaded[0].weather_forecast, WeatherForecast::Rainy);

    let result = env.state.ops_api.assign_mission("PRJ001").expect("匹配失败");

    // Arjun: 1500 × 3 = 4500 ≤ 10000
    assert_eq!(result.eligible_pilots.len(), 1);
    assert_eq!(result.eligible_pilots[0].estimated_cost, 4500.0);
    assert_eq!(result.eligible_drones, vec!["D001"]);
    assert_eq!(result.drone_warnings, vec!["Weather risk for drone D002"]);
}
