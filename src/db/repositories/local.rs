//! In-memory repository implementation.
//!
//! Used by unit/integration tests and for local development without a
//! database. Semantics mirror the Postgres backend: foreign keys are
//! checked on mission writes, and deleting a scientist cascades to their
//! missions.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::api::{
    Mission, MissionId, MissionWithPlanet, MissionWithRelations, NewMission, NewPlanet,
    NewScientist, Planet, PlanetId, Scientist, ScientistId, ScientistUpdate, ScientistWithMissions,
};
use crate::db::repository::{
    MissionRepository, PlanetRepository, RepositoryError, RepositoryResult, ScientistRepository,
};

#[derive(Debug, Default)]
struct Store {
    scientists: BTreeMap<i64, Scientist>,
    planets: BTreeMap<i64, Planet>,
    missions: BTreeMap<i64, Mission>,
    next_scientist_id: i64,
    next_planet_id: i64,
    next_mission_id: i64,
}

impl Store {
    fn new() -> Self {
        Self {
            next_scientist_id: 1,
            next_planet_id: 1,
            next_mission_id: 1,
            ..Default::default()
        }
    }
}

/// In-memory repository backed by a `parking_lot::RwLock`.
///
/// Each method takes the lock for the duration of one operation, which
/// gives the same all-or-nothing behavior per call as a database
/// transaction.
#[derive(Debug, Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::new()),
        }
    }
}

#[async_trait]
impl ScientistRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>> {
        let store = self.store.read();
        Ok(store.scientists.values().cloned().collect())
    }

    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist> {
        let store = self.store.read();
        store
            .scientists
            .get(&id.value())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))
    }

    async fn get_scientist_with_missions(
        &self,
        id: ScientistId,
    ) -> RepositoryResult<ScientistWithMissions> {
        let store = self.store.read();
        let scientist = store
            .scientists
            .get(&id.value())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))?;

        let mut missions = Vec::new();
        for mission in store.missions.values() {
            if mission.scientist_id != id {
                continue;
            }
            let planet = store
                .planets
                .get(&mission.planet_id.value())
                .cloned()
                .ok_or_else(|| {
                    RepositoryError::internal(format!(
                        "Mission {} references missing planet {}",
                        mission.id, mission.planet_id
                    ))
                })?;
            missions.push(MissionWithPlanet {
                mission: mission.clone(),
                planet,
            });
        }

        Ok(ScientistWithMissions {
            scientist,
            missions,
        })
    }

    async fn create_scientist(&self, scientist: NewScientist) -> RepositoryResult<Scientist> {
        let mut store = self.store.write();
        let id = store.next_scientist_id;
        store.next_scientist_id += 1;

        let record = Scientist {
            id: ScientistId::new(id),
            name: scientist.name,
            field_of_study: scientist.field_of_study,
        };
        store.scientists.insert(id, record.clone());
        Ok(record)
    }

    async fn update_scientist(
        &self,
        id: ScientistId,
        update: ScientistUpdate,
    ) -> RepositoryResult<Scientist> {
        let mut store = self.store.write();
        let record = store
            .scientists
            .get_mut(&id.value())
            .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))?;
        update.apply(record);
        Ok(record.clone())
    }

    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if store.scientists.remove(&id.value()).is_none() {
            return Err(RepositoryError::not_found("Scientist", id.value()));
        }
        // Cascade, matching ON DELETE CASCADE in the Postgres schema.
        store.missions.retain(|_, m| m.scientist_id != id);
        Ok(())
    }
}

#[async_trait]
impl PlanetRepository for LocalRepository {
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>> {
        let store = self.store.read();
        Ok(store.planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet> {
        let store = self.store.read();
        store
            .planets
            .get(&id.value())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Planet", id.value()))
    }

    async fn create_planet(&self, planet: NewPlanet) -> RepositoryResult<Planet> {
        let mut store = self.store.write();
        let id = store.next_planet_id;
        store.next_planet_id += 1;

        let record = Planet {
            id: PlanetId::new(id),
            name: planet.name,
            distance_from_earth: planet.distance_from_earth,
            nearest_star: planet.nearest_star,
        };
        store.planets.insert(id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl MissionRepository for LocalRepository {
    async fn create_mission(&self, mission: NewMission) -> RepositoryResult<MissionWithRelations> {
        let mut store = self.store.write();

        let scientist = store
            .scientists
            .get(&mission.scientist_id.value())
            .cloned()
            .ok_or_else(|| {
                RepositoryError::validation(format!(
                    "scientist_id {} does not reference an existing scientist",
                    mission.scientist_id
                ))
            })?;
        let planet = store
            .planets
            .get(&mission.planet_id.value())
            .cloned()
            .ok_or_else(|| {
                RepositoryError::validation(format!(
                    "planet_id {} does not reference an existing planet",
                    mission.planet_id
                ))
            })?;

        let id = store.next_mission_id;
        store.next_mission_id += 1;

        let record = Mission {
            id: MissionId::new(id),
            name: mission.name,
            scientist_id: mission.scientist_id,
            planet_id: mission.planet_id,
        };
        store.missions.insert(id, record.clone());

        Ok(MissionWithRelations {
            mission: record,
            scientist,
            planet,
        })
    }
}
