//! SQLite synchronization record store implementation.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::SyncRecordRow;
use crate::adapter::outbound::sqlite::database::schema::sync_records;
use crate::domain::{CredentialSpend, SyncId, SyncRecord, SyncStatus};
use crate::error::{Error, Result};
use crate::port::SyncRecordStore;

/// SQLite-backed synchronization record store.
pub struct SqliteSyncRecordStore {
    pool: DbPool,
}

impl SqliteSyncRecordStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(record: &SyncRecord) -> Result<SyncRecordRow> {
        let requests =
            serde_json::to_string(&record.requests).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(SyncRecordRow {
            id: record.id.to_string(),
            target_date: record.target_date.to_string(),
            started_at: record.started_at.to_rfc3339(),
            finished_at: record.finished_at.map(|t| t.to_rfc3339()),
            considered: record.considered as i32,
            accepted: record.accepted as i32,
            requests,
            status: record.status.as_str().to_string(),
        })
    }

    fn from_row(row: SyncRecordRow) -> Result<SyncRecord> {
        let target_date: NaiveDate = row
            .target_date
            .parse()
            .map_err(|e: chrono::ParseError| Error::Parse(e.to_string()))?;
        let started_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.started_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);
        let finished_at = row
            .finished_at
            .as_deref()
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| Error::Parse(e.to_string()))
            })
            .transpose()?;
        let requests: Vec<CredentialSpend> =
            serde_json::from_str(&row.requests).map_err(|e| Error::Parse(e.to_string()))?;
        let status = SyncStatus::parse(&row.status)
            .ok_or_else(|| Error::Parse(format!("unknown sync status '{}'", row.status)))?;

        Ok(SyncRecord {
            id: SyncId::from(row.id),
            target_date,
            started_at,
            finished_at,
            considered: row.considered.max(0) as u32,
            accepted: row.accepted.max(0) as u32,
            requests,
            status,
        })
    }
}

impl SyncRecordStore for SqliteSyncRecordStore {
    async fn insert(&self, record: &SyncRecord) -> Result<()> {
        let row = Self::to_row(record)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::insert_into(sync_records::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn finalize(&self, record: &SyncRecord) -> Result<()> {
        let row = Self::to_row(record)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(sync_records::table.find(&row.id))
            .set((
                sync_records::finished_at.eq(&row.finished_at),
                sync_records::considered.eq(row.considered),
                sync_records::accepted.eq(row.accepted),
                sync_records::requests.eq(&row.requests),
                sync_records::status.eq(&row.status),
            ))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &SyncId) -> Result<Option<SyncRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<SyncRecordRow> = sync_records::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SyncRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<SyncRecordRow> = sync_records::table
            .filter(sync_records::target_date.ge(from.to_string()))
            .filter(sync_records::target_date.le(to.to_string()))
            .order((sync_records::target_date.asc(), sync_records::started_at.asc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn purge_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let deleted = diesel::delete(
            sync_records::table.filter(sync_records::target_date.lt(threshold.to_string())),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};

    fn setup_test_db() -> DbPool {
        let pool = create_pool(":memory:").expect("pool");
        run_migrations(&pool).expect("migrations");
        pool
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn insert_then_finalize_roundtrip() {
        let store = SqliteSyncRecordStore::new(setup_test_db());
        let mut record = SyncRecord::begin(date(2025, 8, 20));
        store.insert(&record).await.unwrap();

        let in_flight = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(in_flight.status, SyncStatus::Running);
        assert!(in_flight.finished_at.is_none());

        record.finalize(
            SyncStatus::Succeeded,
            5,
            3,
            vec![
                CredentialSpend {
                    label: "first".to_string(),
                    requests: 2,
                },
                CredentialSpend {
                    label: "second".to_string(),
                    requests: 2,
                },
            ],
        );
        store.finalize(&record).await.unwrap();

        let closed = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(closed.status, SyncStatus::Succeeded);
        assert_eq!(closed.considered, 5);
        assert_eq!(closed.accepted, 3);
        assert_eq!(closed.requests.len(), 2);
        assert_eq!(closed.requests[0].label, "first");
        assert!(closed.finished_at.is_some());
    }

    #[tokio::test]
    async fn list_between_is_inclusive_and_ordered() {
        let store = SqliteSyncRecordStore::new(setup_test_db());
        for day in [date(2025, 8, 18), date(2025, 8, 20), date(2025, 8, 22)] {
            store.insert(&SyncRecord::begin(day)).await.unwrap();
        }

        let listed = store
            .list_between(date(2025, 8, 18), date(2025, 8, 20))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].target_date, date(2025, 8, 18));
        assert_eq!(listed[1].target_date, date(2025, 8, 20));
    }

    #[tokio::test]
    async fn purge_retains_threshold_date() {
        let store = SqliteSyncRecordStore::new(setup_test_db());
        let old = SyncRecord::begin(date(2025, 7, 1));
        let edge = SyncRecord::begin(date(2025, 7, 20));
        store.insert(&old).await.unwrap();
        store.insert(&edge).await.unwrap();

        let deleted = store.purge_older_than(date(2025, 7, 20)).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get(&old.id).await.unwrap().is_none());
        assert!(store.get(&edge.id).await.unwrap().is_some());
    }
}
