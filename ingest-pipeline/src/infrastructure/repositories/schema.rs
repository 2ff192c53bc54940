// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite schema helpers shared by repository implementations.
//!
//! Applies migrations on start-up so integration tests and the running
//! service see a consistent database. Initialization failure is fatal -
//! the caller propagates it as a synchronous 500.

use sqlx::migrate::MigrateDatabase;
use sqlx::SqlitePool;
use tracing::{debug, info};

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("ensuring ingestion_state schema is up to date");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("ingestion_state schema is up to date");
    Ok(())
}

pub async fn create_database_if_missing(database_url: &str) -> Result<(), sqlx::Error> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        debug!(database_url, "database does not exist, creating");
        sqlx::Sqlite::create_database(database_url).await?;
        info!(database_url, "created new SQLite database");
    } else {
        debug!(database_url, "database already exists");
    }
    Ok(())
}

/// Creates the database if missing, connects, and runs migrations - the
/// single call a process needs at start-up.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_database_if_missing(database_url).await?;
    let pool = SqlitePool::connect(database_url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
