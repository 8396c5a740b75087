// src/repositories/mod.rs

//! Persistence ports and their PostgreSQL adapters.
//!
//! Each repository method issues exactly one SQL statement. Branching
//! (existence checks, get-or-create) belongs to the services.

pub mod fair;
pub mod preference;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

pub use fair::{FairRepository, PgFairRepository};
pub use preference::{PgPreferenceRepository, PreferenceRepository};
pub use user::{PgUserRepository, UserRepository};

/// Postgres unique-constraint violation (SQLSTATE 23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// The set of repositories the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub fairs: Arc<dyn FairRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            fairs: Arc::new(PgFairRepository::new(pool.clone())),
            preferences: Arc::new(PgPreferenceRepository::new(pool)),
        }
    }
}
