use crate::error::ZoneError;
use crate::zone::{decode_zones, Zone};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only access to the `activity_zones` table.
///
/// Holds only the database location; every lookup opens its own connection
/// and closes it before returning.
#[derive(Debug, Clone)]
pub struct ZoneStore {
    db_path: PathBuf,
}

impl ZoneStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Fetch and decode the zones stored for `activity_id`.
    ///
    /// Returns `Ok(None)` when no row matches. The identifier is bound as-is;
    /// SQLite column affinity takes care of numeric keys.
    pub fn fetch_zones(&self, activity_id: &str) -> Result<Option<Vec<Zone>>, ZoneError> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let payload: Option<String> = conn
            .query_row(
                "SELECT zone_data FROM activity_zones WHERE activity_id = ?1",
                params![activity_id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(p) => {
                let zones = decode_zones(activity_id, &p)?;
                debug!(activity_id, zones = zones.len(), "Loaded zone record");
                Ok(Some(zones))
            }
            None => {
                debug!(activity_id, "No zone record");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a zone database in `dir` seeded with `(activity_id, zone_data)` rows.
    pub(crate) fn seed_db(dir: &TempDir, rows: &[(i64, &str)]) -> PathBuf {
        let path = dir.path().join("zones.db");
        let conn = Connection::open(&path).expect("open seed db");
        conn.execute(
            "CREATE TABLE activity_zones (activity_id INTEGER PRIMARY KEY, zone_data TEXT NOT NULL)",
            [],
        )
        .expect("create table");
        for (id, data) in rows {
            conn.execute(
                "INSERT INTO activity_zones (activity_id, zone_data) VALUES (?1, ?2)",
                params![id, data],
            )
            .expect("insert row");
        }
        path
    }

    #[test]
    fn missing_row_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = ZoneStore::new(seed_db(&dir, &[(1, r#"[{"name":"1","min":100}]"#)]));
        let zones = store.fetch_zones("12345").expect("query");
        assert!(zones.is_none());
    }

    #[test]
    fn text_identifier_matches_integer_key_and_keeps_order() {
        let dir = TempDir::new().expect("tempdir");
        let store = ZoneStore::new(seed_db(
            &dir,
            &[(999, r#"[{"name":"C","min":150},{"name":"A","min":90},{"name":"B","min":120}]"#)],
        ));
        let zones = store.fetch_zones("999").expect("query").expect("row present");
        let names: Vec<String> = zones.iter().map(|z| z.name.to_string()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        let mins: Vec<f64> = zones.iter().map(|z| z.min).collect();
        assert_eq!(mins, vec![150.0, 90.0, 120.0]);
    }

    #[test]
    fn malformed_payload_is_reported() {
        let dir = TempDir::new().expect("tempdir");
        let store = ZoneStore::new(seed_db(&dir, &[(5, "{broken")]));
        let err = store.fetch_zones("5").unwrap_err();
        assert!(matches!(err, ZoneError::Payload { .. }), "got {err:?}");
    }

    #[test]
    fn missing_database_file_is_a_store_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("does-not-exist.db");
        let store = ZoneStore::new(&path);
        let err = store.fetch_zones("1").unwrap_err();
        assert!(matches!(err, ZoneError::Store(_)), "got {err:?}");
        assert!(!path.exists(), "lookup must not create the database");
    }
}
