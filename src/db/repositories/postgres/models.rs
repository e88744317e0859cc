use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{missions, planets, scientists};
use crate::api::{Mission, MissionId, Planet, PlanetId, Scientist, ScientistId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scientists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is storage metadata, never served
pub struct ScientistRow {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scientists)]
pub struct NewScientistRow {
    pub name: String,
    pub field_of_study: String,
}

/// Partial update; `None` fields are left out of the SET clause.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = scientists)]
pub struct ScientistChangeset {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = planets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct PlanetRow {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: String,
    pub nearest_star: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = planets)]
pub struct NewPlanetRow {
    pub name: String,
    pub distance_from_earth: String,
    pub nearest_star: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = missions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct MissionRow {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub struct NewMissionRow {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

impl From<ScientistRow> for Scientist {
    fn from(row: ScientistRow) -> Self {
        Scientist {
            id: ScientistId::new(row.id),
            name: row.name,
            field_of_study: row.field_of_study,
        }
    }
}

impl From<PlanetRow> for Planet {
    fn from(row: PlanetRow) -> Self {
        Planet {
            id: PlanetId::new(row.id),
            name: row.name,
            distance_from_earth: row.distance_from_earth,
            nearest_star: row.nearest_star,
        }
    }
}

impl From<MissionRow> for Mission {
    fn from(row: MissionRow) -> Self {
        Mission {
            id: MissionId::new(row.id),
            name: row.name,
            scientist_id: ScientistId::new(row.scientist_id),
            planet_id: PlanetId::new(row.planet_id),
        }
    }
}
