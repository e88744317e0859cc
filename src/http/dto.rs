//! Request and response types for the HTTP API.
//!
//! Every endpoint serializes through a hand-shaped response struct instead
//! of walking the entity graph, so nested output is finite by construction:
//! a mission nested under a scientist carries its planet but no scientist
//! back-reference, and a nested planet never carries a mission list.

use serde::{Deserialize, Serialize};

use crate::api::{
    Mission, MissionWithPlanet, MissionWithRelations, NewMission, NewScientist, Planet, PlanetId,
    Scientist, ScientistId, ScientistUpdate, ScientistWithMissions,
};

// =============================================================================
// Requests
// =============================================================================

/// Request body for creating a scientist.
///
/// Fields are optional at the parse layer so that a missing field becomes a
/// validation failure (400) rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScientistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl From<CreateScientistRequest> for NewScientist {
    fn from(req: CreateScientistRequest) -> Self {
        NewScientist {
            name: req.name.unwrap_or_default(),
            field_of_study: req.field_of_study.unwrap_or_default(),
        }
    }
}

/// Request body for updating a scientist.
///
/// Only the two scalar attributes are accepted; anything else fails the
/// request with a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateScientistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl From<UpdateScientistRequest> for ScientistUpdate {
    fn from(req: UpdateScientistRequest) -> Self {
        ScientistUpdate {
            name: req.name,
            field_of_study: req.field_of_study,
        }
    }
}

/// Request body for creating a mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scientist_id: Option<i64>,
    #[serde(default)]
    pub planet_id: Option<i64>,
}

impl CreateMissionRequest {
    /// Convert into a domain payload, collecting every missing field.
    pub fn into_new_mission(self) -> Result<NewMission, Vec<String>> {
        let mut errors = Vec::new();
        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            errors.push("name is required".to_string());
        }
        if self.scientist_id.is_none() {
            errors.push("scientist_id is required".to_string());
        }
        if self.planet_id.is_none() {
            errors.push("planet_id is required".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewMission {
            name: self.name.unwrap_or_default(),
            scientist_id: ScientistId::new(self.scientist_id.unwrap_or_default()),
            planet_id: PlanetId::new(self.planet_id.unwrap_or_default()),
        })
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Scalar scientist view: list entries and PATCH responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistSummary {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

/// Scalar planet view: planet list entries and nested planets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetSummary {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: String,
    pub nearest_star: String,
}

/// A mission as nested under its scientist: planet included, no scientist
/// back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionWithPlanetDto {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub planet: PlanetSummary,
}

/// Full scientist view: POST and GET-by-id responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistDetail {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub missions: Vec<MissionWithPlanetDto>,
}

/// POST /missions response: both relations nested as scalar summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDetail {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistSummary,
    pub planet: PlanetSummary,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

impl From<Scientist> for ScientistSummary {
    fn from(s: Scientist) -> Self {
        Self {
            id: s.id.value(),
            name: s.name,
            field_of_study: s.field_of_study,
        }
    }
}

impl From<Planet> for PlanetSummary {
    fn from(p: Planet) -> Self {
        Self {
            id: p.id.value(),
            name: p.name,
            distance_from_earth: p.distance_from_earth,
            nearest_star: p.nearest_star,
        }
    }
}

impl From<MissionWithPlanet> for MissionWithPlanetDto {
    fn from(m: MissionWithPlanet) -> Self {
        let MissionWithPlanet { mission, planet } = m;
        let Mission {
            id,
            name,
            scientist_id,
            planet_id,
        } = mission;
        Self {
            id: id.value(),
            name,
            scientist_id: scientist_id.value(),
            planet_id: planet_id.value(),
            planet: planet.into(),
        }
    }
}

impl From<ScientistWithMissions> for ScientistDetail {
    fn from(s: ScientistWithMissions) -> Self {
        Self {
            id: s.scientist.id.value(),
            name: s.scientist.name,
            field_of_study: s.scientist.field_of_study,
            missions: s.missions.into_iter().map(Into::into).collect(),
        }
    }
}

/// A freshly created scientist has no missions yet.
impl From<Scientist> for ScientistDetail {
    fn from(s: Scientist) -> Self {
        Self {
            id: s.id.value(),
            name: s.name,
            field_of_study: s.field_of_study,
            missions: Vec::new(),
        }
    }
}

impl From<MissionWithRelations> for MissionDetail {
    fn from(m: MissionWithRelations) -> Self {
        Self {
            id: m.mission.id.value(),
            name: m.mission.name,
            scientist_id: m.mission.scientist_id.value(),
            planet_id: m.mission.planet_id.value(),
            scientist: m.scientist.into(),
            planet: m.planet.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MissionId;

    fn planet() -> Planet {
        Planet {
            id: PlanetId::new(2),
            name: "Proxima Centauri b".to_string(),
            distance_from_earth: "4.2465 light years".to_string(),
            nearest_star: "Proxima Centauri".to_string(),
        }
    }

    fn scientist() -> Scientist {
        Scientist {
            id: ScientistId::new(1),
            name: "Mel Melendez".to_string(),
            field_of_study: "Xenobiology".to_string(),
        }
    }

    #[test]
    fn test_mission_request_collects_missing_fields() {
        let errors = CreateMissionRequest::default().into_new_mission().unwrap_err();
        assert_eq!(errors.len(), 3);

        let ok = CreateMissionRequest {
            name: Some("Flyby".to_string()),
            scientist_id: Some(1),
            planet_id: Some(2),
        }
        .into_new_mission()
        .unwrap();
        assert_eq!(ok.scientist_id, ScientistId::new(1));
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let value = serde_json::json!({ "name": "X", "rank": "Captain" });
        let parsed = serde_json::from_value::<UpdateScientistRequest>(value);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_scientist_detail_nests_planet_without_mission_list() {
        let aggregate = ScientistWithMissions {
            scientist: scientist(),
            missions: vec![MissionWithPlanet {
                mission: Mission {
                    id: MissionId::new(10),
                    name: "Survey".to_string(),
                    scientist_id: ScientistId::new(1),
                    planet_id: PlanetId::new(2),
                },
                planet: planet(),
            }],
        };

        let detail = ScientistDetail::from(aggregate);
        let json = serde_json::to_value(&detail).unwrap();
        let mission = &json["missions"][0];
        // Planet is nested, but neither a scientist back-reference nor a
        // nested mission list exists anywhere in the output.
        assert_eq!(mission["planet"]["name"], "Proxima Centauri b");
        assert!(mission.get("scientist").is_none());
        assert!(mission["planet"].get("missions").is_none());
    }

    #[test]
    fn test_created_scientist_serializes_empty_mission_list() {
        let detail = ScientistDetail::from(scientist());
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["missions"], serde_json::json!([]));
        assert_eq!(json["field_of_study"], "Xenobiology");
    }
}
