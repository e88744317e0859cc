//! Mission repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{MissionWithRelations, NewMission};

/// Repository trait for mission operations.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Insert a new mission and return it joined with its scientist and
    /// planet.
    ///
    /// Runs in a transaction. A dangling `scientist_id` or `planet_id`
    /// rolls it back and surfaces as `RepositoryError::Validation`.
    async fn create_mission(&self, mission: NewMission) -> RepositoryResult<MissionWithRelations>;
}
