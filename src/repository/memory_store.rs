// ==========================================
// 无人机作业排班系统 - 内存记录存储
// ==========================================
// 用途: 引擎单元测试与演示用的可注入替身
// ==========================================

use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryRecordStore {
    pilots: RwLock<Vec<Pilot>>,
    drones: RwLock<Vec<Drone>>,
    missions: RwLock<Vec<Mission>>,
}

impl InMemoryRecordStore {
    pub fn new(pilots: Vec<Pilot>, drones: Vec<Drone>, missions: Vec<Mission>) -> Self {
        Self {
            pilots: RwLock::new(pilots),
            drones: RwLock::new(drones),
            missions: RwLock::new(missions),
        }
    }

    /// 追加或替换 (按 pilot_id)
    pub fn put_pilot(&self, pilot: Pilot) -> RepositoryResult<()> {
        let mut pilots = self.pilots.write().map_err(lock_err)?;
        match pilots.iter_mut().find(|p| p.pilot_id == pilot.pilot_id) {
            Some(existing) => *existing = pilot,
            None => pilots.push(pilot),
        }
        Ok(())
    }

    pub fn put_drone(&self, drone: Drone) -> RepositoryResult<()> {
        let mut drones = self.drones.write().map_err(lock_err)?;
        match drones.iter_mut().find(|d| d.drone_id == drone.drone_id) {
            Some(existing) => *existing = drone,
            None => drones.push(drone),
        }
        Ok(())
    }

    pub fn put_mission(&self, mission: Mission) -> RepositoryResult<()> {
        let mut missions = self.missions.write().map_err(lock_err)?;
        match missions.iter_mut().find(|m| m.project_id == mission.project_id) {
            Some(existing) => *existing = mission,
            None => missions.push(mission),
        }
        Ok(())
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> RepositoryError {
    RepositoryError::LockError(e.to_string())
}

impl RecordStore for InMemoryRecordStore {
    fn load_pilots(&self) -> RepositoryResult<Vec<Pilot>> {
        Ok(self.pilots.read().map_err(lock_err)?.clone())
    }

    fn load_drones(&self) -> RepositoryResult<Vec<Drone>> {
        Ok(self.drones.read().map_err(lock_err)?.clone())
    }

    fn load_missions(&self) -> RepositoryResult<Vec<Mission>> {
        Ok(self.missions.read().map_err(lock_err)?.clone())
    }

    fn update_pilot_status(&self, name: &str, status: PilotStatus) -> RepositoryResult<()> {
        let mut pilots = self.pilots.write().map_err(lock_err)?;
        let mut found = false;
        for pilot in pilots.iter_mut().filter(|p| p.name == name) {
            pilot.status = status;
            found = true;
        }
        if !found {
            return Err(RepositoryError::NotFound {
                entity: "Pilot".to_string(),
                id: name.to_string(),
            });
        }
        Ok(())
    }

    fn update_drone_status(&self, drone_id: &str, status: DroneStatus) -> RepositoryResult<()> {
        let mut drones = self.drones.write().map_err(lock_err)?;
        let drone = drones
            .iter_mut()
            .find(|d| d.drone_id == drone_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Drone".to_string(),
                id: drone_id.to_string(),
            })?;
        drone.status = status;
        Ok(())
    }
}
