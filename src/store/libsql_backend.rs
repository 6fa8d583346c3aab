//! libSQL backend: async `ProfileStore` implementation.
//!
//! Supports local file and in-memory databases. The slug UNIQUE
//! constraint lives in the schema; violations surface as
//! `DatabaseError::Constraint`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::profile::{Availability, DraftProfile, Visibility};
use crate::store::migrations;
use crate::store::traits::{ProfileRecord, ProfileStore, PublicProfile};

/// Column list shared by every full-record SELECT. Order matters for
/// `row_to_record`.
const RECORD_COLUMNS: &str = "id, slug, user_id, full_name, email, phone, specialty, \
     license_number, license_state, preferred_locations, availability, \
     years_experience, notes, session_types, languages, \
     therapeutic_approaches, accepts_insurance, is_public, created_at, \
     updated_at";

/// libSQL store backend.
///
/// Holds a single connection reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async
/// use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to create in-memory database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    async fn select_by_id(&self, id: Uuid) -> Result<Option<ProfileRecord>, DatabaseError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM provider_profiles WHERE id = ?1");
        let mut rows = self
            .conn()
            .query(&sql, params![id.to_string()])
            .await
            .map_err(query_err)?;
        match rows.next().await.map_err(query_err)? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}

// ── Helper functions ────────────────────────────────────────────────

fn query_err(e: libsql::Error) -> DatabaseError {
    DatabaseError::Query(e.to_string())
}

/// Classify a write error: UNIQUE violations become `Constraint`, the
/// authoritative slug-taken signal.
fn write_err(e: libsql::Error) -> DatabaseError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint") {
        DatabaseError::Constraint(msg)
    } else {
        DatabaseError::Query(msg)
    }
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Encode a string list as a JSON text column.
fn encode_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON text column into a string list.
fn decode_list(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Convert `Option<&str>` to a libsql Value for NULLable columns.
fn opt_value(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Read a NULLable text column as `Option<String>`.
fn opt_text(row: &libsql::Row, idx: i32) -> Option<String> {
    row.get::<String>(idx).ok().filter(|s| !s.is_empty())
}

/// Map a libsql row (in `RECORD_COLUMNS` order) to a ProfileRecord.
fn row_to_record(row: &libsql::Row) -> Result<ProfileRecord, DatabaseError> {
    let id_str: String = row.get(0).map_err(query_err)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Serialization(format!("Invalid profile id: {e}")))?;

    let slug: String = row.get(1).map_err(query_err)?;
    let user_id: String = row.get(2).map_err(query_err)?;

    let profile = DraftProfile {
        full_name: opt_text(row, 3),
        email: opt_text(row, 4),
        phone: opt_text(row, 5),
        specialty: opt_text(row, 6),
        license_number: opt_text(row, 7),
        license_state: opt_text(row, 8),
        preferred_locations: opt_text(row, 9),
        availability: opt_text(row, 10).as_deref().and_then(Availability::parse),
        years_experience: opt_text(row, 11),
        notes: opt_text(row, 12),
        session_types: decode_list(&row.get::<String>(13).unwrap_or_default()),
        languages: decode_list(&row.get::<String>(14).unwrap_or_default()),
        therapeutic_approaches: decode_list(&row.get::<String>(15).unwrap_or_default()),
        accepts_insurance: opt_text(row, 16),
    };

    let is_public: i64 = row.get(17).map_err(query_err)?;
    let created_str: String = row.get(18).map_err(query_err)?;
    let updated_str: String = row.get(19).map_err(query_err)?;

    Ok(ProfileRecord {
        id,
        slug,
        user_id,
        profile,
        is_public: is_public != 0,
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

/// Map a public-view row to a PublicProfile.
///
/// Column order: 0:id, 1:slug, 2:full_name, 3:specialty,
/// 4:preferred_locations, 5:availability, 6:years_experience, 7:notes,
/// 8:session_types, 9:languages, 10:therapeutic_approaches,
/// 11:accepts_insurance, 12:created_at, 13:updated_at.
fn row_to_public(row: &libsql::Row) -> Result<PublicProfile, DatabaseError> {
    let id_str: String = row.get(0).map_err(query_err)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Serialization(format!("Invalid profile id: {e}")))?;

    Ok(PublicProfile {
        id,
        slug: row.get(1).map_err(query_err)?,
        full_name: row.get(2).map_err(query_err)?,
        specialty: row.get(3).map_err(query_err)?,
        preferred_locations: row.get(4).map_err(query_err)?,
        availability: row.get(5).map_err(query_err)?,
        years_experience: row.get(6).map_err(query_err)?,
        notes: opt_text(row, 7),
        session_types: decode_list(&row.get::<String>(8).unwrap_or_default()),
        languages: decode_list(&row.get::<String>(9).unwrap_or_default()),
        therapeutic_approaches: decode_list(&row.get::<String>(10).unwrap_or_default()),
        accepts_insurance: opt_text(row, 11),
        created_at: parse_datetime(&row.get::<String>(12).map_err(query_err)?),
        updated_at: parse_datetime(&row.get::<String>(13).map_err(query_err)?),
    })
}

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn select_by_slug(&self, slug: &str) -> Result<Option<ProfileRecord>, DatabaseError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM provider_profiles WHERE slug = ?1");
        let mut rows = self
            .conn()
            .query(&sql, params![slug])
            .await
            .map_err(query_err)?;
        match rows.next().await.map_err(query_err)? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn select_public_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PublicProfile>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, slug, full_name, specialty, preferred_locations,
                        availability, years_experience, notes, session_types,
                        languages, therapeutic_approaches, accepts_insurance,
                        created_at, updated_at
                 FROM provider_profiles_public WHERE slug = ?1",
                params![slug],
            )
            .await
            .map_err(query_err)?;
        match rows.next().await.map_err(query_err)? {
            Some(row) => Ok(Some(row_to_public(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        draft: &DraftProfile,
        slug: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> Result<ProfileRecord, DatabaseError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        self.conn()
            .execute(
                "INSERT INTO provider_profiles
                    (id, slug, user_id, full_name, email, phone, specialty,
                     license_number, license_state, preferred_locations,
                     availability, years_experience, notes, session_types,
                     languages, therapeutic_approaches, accepts_insurance,
                     is_public, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
                params![
                    id.to_string(),
                    slug,
                    user_id,
                    draft.full_name.clone().unwrap_or_default(),
                    draft.email.clone().unwrap_or_default(),
                    draft.phone.clone().unwrap_or_default(),
                    draft.specialty.clone().unwrap_or_default(),
                    draft.license_number.clone().unwrap_or_default(),
                    opt_value(draft.license_state.as_deref()),
                    draft.preferred_locations.clone().unwrap_or_default(),
                    draft.availability.map(|a| a.to_string()).unwrap_or_default(),
                    draft.years_experience.clone().unwrap_or_default(),
                    opt_value(draft.notes.as_deref()),
                    encode_list(&draft.session_types),
                    encode_list(&draft.languages),
                    encode_list(&draft.therapeutic_approaches),
                    opt_value(draft.accepts_insurance.as_deref()),
                    i64::from(visibility.is_public()),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .await
            .map_err(write_err)?;

        info!(%slug, %id, "Published profile inserted");
        Ok(ProfileRecord {
            id,
            slug: slug.to_string(),
            user_id: user_id.to_string(),
            profile: draft.clone(),
            is_public: visibility.is_public(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        draft: &DraftProfile,
        visibility: Visibility,
    ) -> Result<ProfileRecord, DatabaseError> {
        let now = Utc::now();
        let changed = self
            .conn()
            .execute(
                "UPDATE provider_profiles SET
                    full_name = ?2, email = ?3, phone = ?4, specialty = ?5,
                    license_number = ?6, license_state = ?7,
                    preferred_locations = ?8, availability = ?9,
                    years_experience = ?10, notes = ?11, session_types = ?12,
                    languages = ?13, therapeutic_approaches = ?14,
                    accepts_insurance = ?15, is_public = ?16, updated_at = ?17
                 WHERE id = ?1",
                params![
                    id.to_string(),
                    draft.full_name.clone().unwrap_or_default(),
                    draft.email.clone().unwrap_or_default(),
                    draft.phone.clone().unwrap_or_default(),
                    draft.specialty.clone().unwrap_or_default(),
                    draft.license_number.clone().unwrap_or_default(),
                    opt_value(draft.license_state.as_deref()),
                    draft.preferred_locations.clone().unwrap_or_default(),
                    draft.availability.map(|a| a.to_string()).unwrap_or_default(),
                    draft.years_experience.clone().unwrap_or_default(),
                    opt_value(draft.notes.as_deref()),
                    encode_list(&draft.session_types),
                    encode_list(&draft.languages),
                    encode_list(&draft.therapeutic_approaches),
                    opt_value(draft.accepts_insurance.as_deref()),
                    i64::from(visibility.is_public()),
                    now.to_rfc3339(),
                ],
            )
            .await
            .map_err(write_err)?;

        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "provider_profile".to_string(),
                id: id.to_string(),
            });
        }

        info!(%id, "Published profile updated");
        self.select_by_id(id).await?.ok_or(DatabaseError::NotFound {
            entity: "provider_profile".to_string(),
            id: id.to_string(),
        })
    }
}
