//! Tests for repository selection: type parsing, environment inference,
//! and factory construction.

mod support;

use std::str::FromStr;

use cosmotrack::db::{services, RepositoryConfig, RepositoryFactory, RepositoryType};
use support::with_scoped_env;

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("postgres").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("PG").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("local").unwrap(),
        RepositoryType::Local
    );
    assert!(RepositoryType::from_str("sqlite").is_err());
}

#[test]
fn test_repository_type_env_override_wins() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/ignored")),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Local);
}

#[test]
fn test_repository_type_inferred_from_database_url() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/cosmotrack")),
            ("PG_DATABASE_URL", None),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Postgres);
}

#[test]
fn test_repository_type_defaults_to_local() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Local);
}

#[tokio::test]
async fn test_factory_creates_usable_local_repository() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(services::health_check(repo.as_ref()).await.unwrap());
    assert!(services::list_scientists(repo.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_builds_local_repository_from_config_file() {
    let config = RepositoryConfig::from_toml(
        r#"
        [repository]
        type = "local"
        "#,
    )
    .unwrap();

    let repo = RepositoryFactory::from_config(&config).await.unwrap();
    assert!(services::health_check(repo.as_ref()).await.unwrap());
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_factory_rejects_postgres_when_feature_disabled() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(result.is_err());
}
