//! Service-layer tests against the in-memory repository.
//!
//! These exercise the persistence semantics both backends promise: CRUD,
//! not-found errors, foreign-key checks on mission writes, and cascade
//! delete of a scientist's missions.

use cosmotrack::api::{
    NewMission, NewPlanet, NewScientist, PlanetId, ScientistId, ScientistUpdate,
};
use cosmotrack::db::repositories::LocalRepository;
use cosmotrack::db::{services, RepositoryError};

fn new_scientist(name: &str, field: &str) -> NewScientist {
    NewScientist {
        name: name.to_string(),
        field_of_study: field.to_string(),
    }
}

fn new_planet(name: &str) -> NewPlanet {
    NewPlanet {
        name: name.to_string(),
        distance_from_earth: "39.46 light years".to_string(),
        nearest_star: "TRAPPIST-1".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_scientist() {
    let repo = LocalRepository::new();
    let created = services::create_scientist(&repo, new_scientist("Mel Melendez", "Xenobiology"))
        .await
        .unwrap();

    let fetched = services::get_scientist(&repo, created.id).await.unwrap();
    assert_eq!(fetched.scientist, created);
    assert!(fetched.missions.is_empty());
}

#[tokio::test]
async fn test_create_scientist_requires_fields() {
    let repo = LocalRepository::new();
    let err = services::create_scientist(&repo, new_scientist("", "Xenobiology"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation { .. }));

    // Nothing was stored.
    assert!(services::list_scientists(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_scientists_ordered_by_id() {
    let repo = LocalRepository::new();
    for name in ["A", "B", "C"] {
        services::create_scientist(&repo, new_scientist(name, "Astrophysics"))
            .await
            .unwrap();
    }

    let scientists = services::list_scientists(&repo).await.unwrap();
    assert_eq!(scientists.len(), 3);
    let ids: Vec<i64> = scientists.iter().map(|s| s.id.value()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_missing_scientist_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::get_scientist(&repo, ScientistId::new(99))
        .await
        .unwrap_err();
    match err {
        RepositoryError::NotFound { entity, id } => {
            assert_eq!(entity, "Scientist");
            assert_eq!(id, 99);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let repo = LocalRepository::new();
    let created = services::create_scientist(&repo, new_scientist("P. Legrand", "Astrophysics"))
        .await
        .unwrap();

    let updated = services::update_scientist(
        &repo,
        created.id,
        ScientistUpdate {
            name: None,
            field_of_study: Some("Xenobiology".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "P. Legrand");
    assert_eq!(updated.field_of_study, "Xenobiology");
}

#[tokio::test]
async fn test_update_rejects_empty_value() {
    let repo = LocalRepository::new();
    let created = services::create_scientist(&repo, new_scientist("P. Legrand", "Astrophysics"))
        .await
        .unwrap();

    let err = services::update_scientist(
        &repo,
        created.id,
        ScientistUpdate {
            name: Some(String::new()),
            field_of_study: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation { .. }));

    // Record is unchanged.
    let fetched = services::get_scientist(&repo, created.id).await.unwrap();
    assert_eq!(fetched.scientist.name, "P. Legrand");
}

#[tokio::test]
async fn test_update_missing_scientist_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::update_scientist(
        &repo,
        ScientistId::new(7),
        ScientistUpdate {
            name: Some("Ghost".to_string()),
            field_of_study: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_scientist_cascades_to_missions() {
    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, new_scientist("Mel", "Xenobiology"))
        .await
        .unwrap();
    let planet = services::create_planet(&repo, new_planet("TRAPPIST-1e"))
        .await
        .unwrap();
    services::create_mission(
        &repo,
        NewMission {
            name: "Survey".to_string(),
            scientist_id: scientist.id,
            planet_id: planet.id,
        },
    )
    .await
    .unwrap();

    services::delete_scientist(&repo, scientist.id).await.unwrap();

    let err = services::get_scientist(&repo, scientist.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    // The planet survives the cascade.
    assert_eq!(services::list_planets(&repo).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_scientist_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::delete_scientist(&repo, ScientistId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_create_mission_joins_relations() {
    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, new_scientist("Mel", "Xenobiology"))
        .await
        .unwrap();
    let planet = services::create_planet(&repo, new_planet("TRAPPIST-1e"))
        .await
        .unwrap();

    let created = services::create_mission(
        &repo,
        NewMission {
            name: "Survey".to_string(),
            scientist_id: scientist.id,
            planet_id: planet.id,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.scientist, scientist);
    assert_eq!(created.planet, planet);
    assert_eq!(created.mission.scientist_id, scientist.id);

    let detail = services::get_scientist(&repo, scientist.id).await.unwrap();
    assert_eq!(detail.missions.len(), 1);
    assert_eq!(detail.missions[0].planet, planet);
}

#[tokio::test]
async fn test_create_mission_rejects_dangling_foreign_keys() {
    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, new_scientist("Mel", "Xenobiology"))
        .await
        .unwrap();

    let err = services::create_mission(
        &repo,
        NewMission {
            name: "Survey".to_string(),
            scientist_id: scientist.id,
            planet_id: PlanetId::new(404),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation { .. }));

    // The failed write left no mission behind.
    let detail = services::get_scientist(&repo, scientist.id).await.unwrap();
    assert!(detail.missions.is_empty());
}

#[tokio::test]
async fn test_scalar_getters_on_the_repository() {
    use cosmotrack::db::{PlanetRepository, ScientistRepository};

    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, new_scientist("Mel", "Xenobiology"))
        .await
        .unwrap();
    let planet = services::create_planet(&repo, new_planet("TRAPPIST-1e"))
        .await
        .unwrap();

    assert_eq!(repo.get_scientist(scientist.id).await.unwrap(), scientist);
    assert_eq!(repo.get_planet(planet.id).await.unwrap(), planet);
    assert!(matches!(
        repo.get_planet(PlanetId::new(9)).await.unwrap_err(),
        RepositoryError::NotFound { entity: "Planet", .. }
    ));
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}
