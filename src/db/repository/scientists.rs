//! Scientist repository trait.
//!
//! Scientists are the only entity with a full CRUD surface. Reads come in
//! two shapes: the bare record, and the record joined with its missions
//! (each mission carrying its planet) for the detail endpoints.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewScientist, Scientist, ScientistId, ScientistUpdate, ScientistWithMissions};

/// Repository trait for scientist operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScientistRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all scientists, ordered by id.
    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>>;

    /// Fetch a single scientist.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no record matches
    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist>;

    /// Fetch a scientist together with all of their missions, each joined
    /// with its destination planet.
    async fn get_scientist_with_missions(
        &self,
        id: ScientistId,
    ) -> RepositoryResult<ScientistWithMissions>;

    /// Insert a new scientist and return the stored record.
    ///
    /// Runs in a transaction; a constraint violation rolls it back and
    /// surfaces as `RepositoryError::Validation`.
    async fn create_scientist(&self, scientist: NewScientist) -> RepositoryResult<Scientist>;

    /// Apply a partial update to an existing scientist and return the
    /// updated record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no record matches
    /// * `Err(RepositoryError::Validation)` if the update violates a constraint
    async fn update_scientist(
        &self,
        id: ScientistId,
        update: ScientistUpdate,
    ) -> RepositoryResult<Scientist>;

    /// Delete a scientist. The scientist's missions are removed with it.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no record matches
    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()>;
}
