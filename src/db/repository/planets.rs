//! Planet repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewPlanet, Planet, PlanetId};

/// Repository trait for planet operations.
///
/// Planets have no HTTP write surface; `create_planet` exists so seeding
/// and tests can populate the table that mission foreign keys point at.
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// List all planets, ordered by id.
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>>;

    /// Fetch a single planet.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no record matches
    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet>;

    /// Insert a new planet and return the stored record.
    async fn create_planet(&self, planet: NewPlanet) -> RepositoryResult<Planet>;
}
