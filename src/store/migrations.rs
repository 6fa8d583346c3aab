//! Version-tracked database migrations for the libSQL backend.
//!
//! Each migration has a version number and SQL. `run_migrations()`
//! checks the current version and applies only the new ones
//! sequentially.

use libsql::Connection;

use crate::error::DatabaseError;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: r#"
            CREATE TABLE IF NOT EXISTS provider_profiles (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                specialty TEXT NOT NULL,
                license_number TEXT NOT NULL,
                license_state TEXT,
                preferred_locations TEXT NOT NULL,
                availability TEXT NOT NULL,
                years_experience TEXT NOT NULL,
                notes TEXT,
                session_types TEXT NOT NULL DEFAULT '[]',
                languages TEXT NOT NULL DEFAULT '[]',
                therapeutic_approaches TEXT NOT NULL DEFAULT '[]',
                accepts_insurance TEXT,
                is_public INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_provider_profiles_user
                ON provider_profiles(user_id);
            CREATE INDEX IF NOT EXISTS idx_provider_profiles_public
                ON provider_profiles(is_public);
        "#,
    },
    Migration {
        version: 2,
        name: "public_view",
        sql: r#"
            CREATE VIEW IF NOT EXISTS provider_profiles_public AS
                SELECT id, slug, full_name, specialty, preferred_locations,
                       availability, years_experience, notes, session_types,
                       languages, therapeutic_approaches, accepts_insurance,
                       created_at, updated_at
                FROM provider_profiles
                WHERE is_public = 1;
        "#,
    },
];

/// Run all pending migrations against the given connection.
///
/// Creates the `_migrations` tracking table if it doesn't exist.
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        (),
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to create _migrations table: {e}")))?;

    let current_version = get_current_version(conn).await?;

    for migration in MIGRATIONS {
        if migration.version > current_version {
            tracing::info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            conn.execute_batch(migration.sql).await.map_err(|e| {
                DatabaseError::Migration(format!(
                    "Migration V{} ({}) failed: {e}",
                    migration.version, migration.name
                ))
            })?;
            seed_version(conn, migration.version, migration.name).await?;
        }
    }

    let version = get_current_version(conn).await?;
    tracing::info!("Database migrations complete (at V{version})");

    Ok(())
}

/// Get the highest applied migration version, or 0 if none.
async fn get_current_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to query migration version: {e}")))?;

    let row = rows
        .next()
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to read migration version: {e}")))?;

    match row {
        Some(row) => {
            let version: i64 = row.get(0).map_err(|e| {
                DatabaseError::Migration(format!("Failed to parse migration version: {e}"))
            })?;
            Ok(version)
        }
        None => Ok(0),
    }
}

/// Insert a version record into `_migrations`.
async fn seed_version(conn: &Connection, version: i64, name: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO _migrations (version, name) VALUES (?1, ?2)",
        libsql::params![version, name],
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to record migration V{version}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_conn() -> Connection {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap();
        db.connect().unwrap()
    }

    #[tokio::test]
    async fn migrations_create_table_and_view() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();

        for (kind, name) in [
            ("table", "provider_profiles"),
            ("table", "_migrations"),
            ("view", "provider_profiles_public"),
        ] {
            let mut rows = conn
                .query(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type=?1 AND name=?2",
                    libsql::params![kind, name],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap().unwrap();
            let count: i64 = row.get(0).unwrap();
            assert_eq!(count, 1, "{kind} '{name}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();
        run_migrations(&conn).await.unwrap();

        let version = get_current_version(&conn).await.unwrap();
        assert_eq!(version, 2);
    }

    #[tokio::test]
    async fn slug_uniqueness_is_enforced_by_schema() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();

        let insert = "INSERT INTO provider_profiles
            (id, slug, user_id, full_name, email, phone, specialty,
             license_number, preferred_locations, availability,
             years_experience, created_at, updated_at)
            VALUES (?1, 'jane-doe', 'u1', 'Jane', 'j@x.com', '5551234567',
                    'Neuro', 'NE-12345', 'Lakeside', 'full-time', '10',
                    '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')";
        conn.execute(insert, libsql::params!["p1"]).await.unwrap();
        let err = conn
            .execute(insert, libsql::params!["p2"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE"), "got: {err}");
    }

    #[tokio::test]
    async fn public_view_filters_private_rows() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();

        conn.execute(
            "INSERT INTO provider_profiles
                (id, slug, user_id, full_name, email, phone, specialty,
                 license_number, preferred_locations, availability,
                 years_experience, is_public, created_at, updated_at)
                VALUES ('p1', 'hidden', 'u1', 'Jane', 'j@x.com', '5551234567',
                        'Neuro', 'NE-12345', 'Lakeside', 'full-time', '10',
                        0, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
            (),
        )
        .await
        .unwrap();

        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM provider_profiles_public WHERE slug = 'hidden'",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let count: i64 = row.get(0).unwrap();
        assert_eq!(count, 0);
    }
}
