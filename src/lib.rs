//! # Cosmotrack Backend
//!
//! REST API backend for tracking scientists, the planets they study, and the
//! missions that connect the two.
//!
//! The crate exposes three related entities over HTTP/JSON, persisted in a
//! relational store behind a repository abstraction:
//!
//! - [`api`]: domain model (entities, typed ids, write payloads)
//! - [`db`]: repository traits, storage backends, and the service layer
//! - [`http`]: axum-based HTTP server, handlers, and response projections
//!
//! ## Storage backends
//!
//! Two interchangeable backends implement the repository traits:
//!
//! - `LocalRepository` (feature `local-repo`): in-memory, used by tests and
//!   local development.
//! - `PostgresRepository` (feature `postgres-repo`): Diesel + r2d2 with
//!   embedded migrations.
//!
//! Every write runs inside a single database transaction; a constraint
//! violation rolls the whole operation back.

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
