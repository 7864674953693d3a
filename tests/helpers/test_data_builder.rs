// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use drone_ops_aps::domain::{
    Drone, DroneStatus, Mission, MissionPriority, Pilot, PilotStatus, WeatherForecast,
};

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("测试日期格式错误")
}

fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| t.to_string()).collect()
}

// ==========================================
// Pilot 构建器
// ==========================================

pub struct PilotBuilder {
    pilot: Pilot,
}

impl PilotBuilder {
    /// 默认: Available, Mumbai, 技能 Thermal, 证书 DGCA, 日薪 10000, 无任务
    pub fn new(pilot_id: &str, name: &str) -> Self {
        Self {
            pilot: Pilot {
                pilot_id: pilot_id.to_string(),
                name: name.to_string(),
                status: PilotStatus::Available,
                location: "Mumbai".to_string(),
                skills: tags(&["Thermal"]),
                certifications: tags(&["DGCA"]),
                daily_rate_inr: 10_000.0,
                current_assignment: None,
            },
        }
    }

    pub fn status(mut self, status: PilotStatus) -> Self {
        self.pilot.status = status;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.pilot.location = location.to_string();
        self
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.pilot.skills = tags(skills);
        self
    }

    pub fn certifications(mut self, certs: &[&str]) -> Self {
        self.pilot.certifications = tags(certs);
        self
    }

    pub fn daily_rate(mut self, rate: f64) -> Self {
        self.pilot.daily_rate_inr = rate;
        self
    }

    pub fn assigned_to(mut self, project_id: &str) -> Self {
        self.pilot.current_assignment = Some(project_id.to_string());
        self
    }

    pub fn build(self) -> Pilot {
        self.pilot
    }
}

// ==========================================
// Drone 构建器
// ==========================================

pub struct DroneBuilder {
    drone: Drone,
}

impl DroneBuilder {
    /// 默认: Available, Mumbai, 能力 Thermal, IP43, 维保日 2026-12-31
    pub fn new(drone_id: &str) -> Self {
        Self {
            drone: Drone {
                drone_id: drone_id.to_string(),
                model: Some("DJI M30T".to_string()),
                status: DroneStatus::Available,
                location: "Mumbai".to_string(),
                capabilities: tags(&["Thermal"]),
                weather_resistance: "IP43 (Rain)".to_string(),
                maintenance_due: date("2026-12-31"),
                current_assignment: None,
            },
        }
    }

    pub fn status(mut self, status: DroneStatus) -> Self {
        self.drone.status = status;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.drone.location = location.to_string();
        self
    }

    pub fn capabilities(mut self, caps: &[&str]) -> Self {
        self.drone.capabilities = tags(caps);
        self
    }

    pub fn weather_resistance(mut self, rating: &str) -> Self {
        self.drone.weather_resistance = rating.to_string();
        self
    }

    pub fn maintenance_due(mut self, due: &str) -> Self {
        self.drone.maintenance_due = date(due);
        self
    }

    pub fn deployed_to(mut self, project_id: &str) -> Self {
        self.drone.current_assignment = Some(project_id.to_string());
        self
    }

    pub fn build(self) -> Drone {
        self.drone
    }
}

// ==========================================
// Mission 构建器
// ==========================================

pub struct MissionBuilder {
    mission: Mission,
}

impl MissionBuilder {
    /// 默认: Mumbai, Thermal, 证书 DGCA, 2026-02-06 ~ 2026-02-08 (3 天), 预算 50000, Clear, Normal
    pub fn new(project_id: &str) -> Self {
        Self {
            mission: Mission {
                project_id: project_id.to_string(),
                client: Some("Client A".to_string()),
                location: "Mumbai".to_string(),
                start_date: date("2026-02-06"),
                end_date: date("2026-02-08"),
                required_skill: "Thermal".to_string(),
                required_certs: tags(&["DGCA"]),
                mission_budget_inr: 50_000.0,
                weather_forecast: WeatherForecast::Clear,
                priority: MissionPriority::Normal,
            },
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.mission.location = location.to_string();
        self
    }

    pub fn dates(mut self, start: &str, end: &str) -> Self {
        self.mission.start_date = date(start);
        self.mission.end_date = date(end);
        self
    }

    pub fn required_skill(mut self, skill: &str) -> Self {
        self.mission.required_skill = skill.to_string();
        self
    }

    pub fn required_certs(mut self, certs: &[&str]) -> Self {
        self.mission.required_certs = tags(certs);
        self
    }

    pub fn budget(mut self, budget: f64) -> Self {
        self.mission.mission_budget_inr = budget;
        self
    }

    pub fn weather(mut self, forecast: WeatherForecast) -> Self {
        self.mission.weather_forecast = forecast;
        self
    }

    pub fn priority(mut self, priority: MissionPriority) -> Self {
        self.mission.priority = priority;
        self
    }

    pub fn build(self) -> Mission {
        self.mission
    }
}

// ==========================================
// 标准场景数据
// ==========================================

/// 场景名册:
/// - PRJ001: Mumbai, Thermal, 3 天, 预算 50000, Normal
/// - PRJ002: Mumbai, Normal
/// - PRJ003: Bangalore, Urgent, 无合格飞手
/// - Arjun: 日薪 10000 (合格), Neha: 日薪 20000 (超预算)
/// - D001: 合格, D002: 已部署
pub fn scenario_roster() -> (Vec<Pilot>, Vec<Drone>, Vec<Mission>) {
    let pilots = vec![
        PilotBuilder::new("P001", "Arjun").daily_rate(10_000.0).build(),
        PilotBuilder::new("P002", "Neha").daily_rate(20_000.0).build(),
    ];
    let drones = vec![
        DroneBuilder::new("D001").build(),
        DroneBuilder::new("D002").deployed_to("PRJ005").build(),
    ];
    let missions = vec![
        MissionBuilder::new("PRJ001").build(),
        MissionBuilder::new("PRJ002").build(),
        MissionBuilder::new("PRJ003")
            .location("Bangalore")
            .priority(MissionPriority::Urgent)
            .build(),
    ];
    (pilots, drones, missions)
}
