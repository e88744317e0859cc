//! Domain model for the Cosmotrack backend.
//!
//! This file consolidates the entity types shared by the storage backends,
//! the service layer, and the HTTP layer. All types derive
//! Serialize/Deserialize so they can cross the JSON boundary.

use serde::{Deserialize, Serialize};

/// Scientist identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScientistId(pub i64);

/// Planet identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanetId(pub i64);

/// Mission identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MissionId(pub i64);

impl ScientistId {
    pub fn new(value: i64) -> Self {
        ScientistId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl PlanetId {
    pub fn new(value: i64) -> Self {
        PlanetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl MissionId {
    pub fn new(value: i64) -> Self {
        MissionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ScientistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PlanetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ScientistId> for i64 {
    fn from(id: ScientistId) -> Self {
        id.0
    }
}

impl From<PlanetId> for i64 {
    fn from(id: PlanetId) -> Self {
        id.0
    }
}

impl From<MissionId> for i64 {
    fn from(id: MissionId) -> Self {
        id.0
    }
}

/// A scientist on record. Owns zero or more missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scientist {
    pub id: ScientistId,
    pub name: String,
    pub field_of_study: String,
}

/// A destination planet. Owns zero or more missions.
///
/// `distance_from_earth` is free-form text ("4.2465 light years"), not a
/// numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub distance_from_earth: String,
    pub nearest_star: String,
}

/// A mission linking one scientist to one planet.
///
/// Both foreign keys must reference existing rows; the storage backends
/// enforce this at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub scientist_id: ScientistId,
    pub planet_id: PlanetId,
}

/// Payload for creating a scientist. Fields are required and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScientist {
    pub name: String,
    pub field_of_study: String,
}

/// Allow-listed partial update for a scientist.
///
/// Only the two scalar attributes may change; `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScientistUpdate {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

/// Payload for creating a planet (store-level only; planets have no HTTP
/// write surface and are populated by seeding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub distance_from_earth: String,
    pub nearest_star: String,
}

/// Payload for creating a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMission {
    pub name: String,
    pub scientist_id: ScientistId,
    pub planet_id: PlanetId,
}

/// A mission joined with its destination planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionWithPlanet {
    pub mission: Mission,
    pub planet: Planet,
}

/// A scientist together with all of their missions, each joined with its
/// planet. Backing aggregate for the scientist detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScientistWithMissions {
    pub scientist: Scientist,
    pub missions: Vec<MissionWithPlanet>,
}

/// A freshly created mission joined with both of its relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionWithRelations {
    pub mission: Mission,
    pub scientist: Scientist,
    pub planet: Planet,
}

impl NewScientist {
    /// Validate required fields, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if self.field_of_study.trim().is_empty() {
            errors.push("field_of_study is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl ScientistUpdate {
    /// True when no attribute would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.field_of_study.is_none()
    }

    /// Validate that supplied attributes are usable values.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if matches!(self.name.as_deref(), Some(v) if v.trim().is_empty()) {
            errors.push("name must not be empty".to_string());
        }
        if matches!(self.field_of_study.as_deref(), Some(v) if v.trim().is_empty()) {
            errors.push("field_of_study must not be empty".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Apply the update onto an existing record.
    pub fn apply(&self, scientist: &mut Scientist) {
        if let Some(name) = &self.name {
            scientist.name = name.clone();
        }
        if let Some(field) = &self.field_of_study {
            scientist.field_of_study = field.clone();
        }
    }
}

impl NewMission {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if self.name.trim().is_empty() {
            Err(vec!["name is required".to_string()])
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ScientistId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(PlanetId::new(7), PlanetId::new(7));
        assert_ne!(MissionId::new(1), MissionId::new(2));
    }

    #[test]
    fn test_new_scientist_validation() {
        let ok = NewScientist {
            name: "Mel Melendez".to_string(),
            field_of_study: "Xenobiology".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = NewScientist {
            name: "  ".to_string(),
            field_of_study: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("name"));
    }

    #[test]
    fn test_update_apply_is_partial() {
        let mut scientist = Scientist {
            id: ScientistId::new(1),
            name: "P. Legrand".to_string(),
            field_of_study: "Astrophysics".to_string(),
        };
        let update = ScientistUpdate {
            name: None,
            field_of_study: Some("Xenobiology".to_string()),
        };
        assert!(update.validate().is_ok());
        update.apply(&mut scientist);
        assert_eq!(scientist.name, "P. Legrand");
        assert_eq!(scientist.field_of_study, "Xenobiology");
    }

    #[test]
    fn test_update_rejects_empty_values() {
        let update = ScientistUpdate {
            name: Some(String::new()),
            field_of_study: None,
        };
        assert!(update.validate().is_err());
        assert!(!update.is_empty());
        assert!(ScientistUpdate::default().is_empty());
    }
}
