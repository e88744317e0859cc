//! Service layer: the operations the application exposes, written against
//! the repository traits.
//!
//! Handlers (and any future frontends) call these functions rather than the
//! repositories directly. Write-time validation happens here, before a
//! transaction is opened, so both storage backends behave identically.

use tracing::debug;

use crate::api::{
    MissionWithRelations, NewMission, NewPlanet, NewScientist, Planet, Scientist, ScientistId,
    ScientistUpdate, ScientistWithMissions,
};
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};

fn validation_errors(errors: Vec<String>) -> RepositoryError {
    RepositoryError::validation(errors.join("; "))
}

/// Check that the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List all scientists.
pub async fn list_scientists(repo: &dyn FullRepository) -> RepositoryResult<Vec<Scientist>> {
    repo.list_scientists().await
}

/// Fetch one scientist with missions and their planets.
pub async fn get_scientist(
    repo: &dyn FullRepository,
    id: ScientistId,
) -> RepositoryResult<ScientistWithMissions> {
    repo.get_scientist_with_missions(id).await
}

/// Validate and store a new scientist.
pub async fn create_scientist(
    repo: &dyn FullRepository,
    scientist: NewScientist,
) -> RepositoryResult<Scientist> {
    scientist.validate().map_err(validation_errors)?;
    let stored = repo.create_scientist(scientist).await?;
    debug!(id = stored.id.value(), "created scientist");
    Ok(stored)
}

/// Validate and apply a partial update to a scientist.
pub async fn update_scientist(
    repo: &dyn FullRepository,
    id: ScientistId,
    update: ScientistUpdate,
) -> RepositoryResult<Scientist> {
    update.validate().map_err(validation_errors)?;
    let stored = repo.update_scientist(id, update).await?;
    debug!(id = stored.id.value(), "updated scientist");
    Ok(stored)
}

/// Delete a scientist and, transitively, their missions.
pub async fn delete_scientist(repo: &dyn FullRepository, id: ScientistId) -> RepositoryResult<()> {
    repo.delete_scientist(id).await?;
    debug!(id = id.value(), "deleted scientist");
    Ok(())
}

/// List all planets.
pub async fn list_planets(repo: &dyn FullRepository) -> RepositoryResult<Vec<Planet>> {
    repo.list_planets().await
}

/// Store a new planet (seeding/tests; no HTTP surface).
pub async fn create_planet(
    repo: &dyn FullRepository,
    planet: NewPlanet,
) -> RepositoryResult<Planet> {
    repo.create_planet(planet).await
}

/// Validate and store a new mission, returning it with both relations.
pub async fn create_mission(
    repo: &dyn FullRepository,
    mission: NewMission,
) -> RepositoryResult<MissionWithRelations> {
    mission.validate().map_err(validation_errors)?;
    let stored = repo.create_mission(mission).await?;
    debug!(id = stored.mission.id.value(), "created mission");
    Ok(stored)
}
