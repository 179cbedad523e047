#![allow(dead_code)]

use client_registry::db::{DbPool, establish_connection_pool, load_fixtures, run_migrations};
use client_registry::repository::DieselRepository;
use tempfile::TempDir;

/// SQLite database in a temporary directory, migrated and seeded with the
/// fixture clients. Removed when dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let test_db = Self::empty(name);
        load_fixtures(&test_db.pool).expect("Cannot load fixtures");
        test_db
    }

    /// Migrated database without any rows.
    pub fn empty(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("Cannot create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("Temp path is not valid UTF-8");
        let pool = establish_connection_pool(url).expect("Cannot establish connection pool");
        run_migrations(&pool).expect("Cannot run migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
