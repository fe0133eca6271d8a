//! SQLite league store implementation.

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::LeagueRow;
use crate::adapter::outbound::sqlite::database::schema::leagues;
use crate::domain::{LeagueId, LeagueRecord};
use crate::error::{Error, Result};
use crate::port::LeagueStore;

/// SQLite-backed league store.
pub struct SqliteLeagueStore {
    pool: DbPool,
}

impl SqliteLeagueStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(record: &LeagueRecord) -> LeagueRow {
        LeagueRow {
            id: record.id.to_string(),
            name: record.name.clone(),
            detected: i32::from(record.detected),
            selected: record.selected.map(i32::from),
            blacklisted: i32::from(record.blacklisted),
        }
    }

    fn from_row(row: LeagueRow) -> LeagueRecord {
        LeagueRecord {
            id: LeagueId::from(row.id),
            name: row.name,
            detected: row.detected != 0,
            selected: row.selected.map(|s| s != 0),
            blacklisted: row.blacklisted != 0,
        }
    }
}

impl LeagueStore for SqliteLeagueStore {
    async fn upsert(&self, record: &LeagueRecord) -> Result<()> {
        let row = Self::to_row(record);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(leagues::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<LeagueRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<LeagueRow> = leagues::table
            .order(leagues::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    /// Unknown leagues get a fresh default row first, so detection can
    /// introduce leagues without touching operator flags on known ones.
    async fn mark_detected(&self, ids: &[LeagueId]) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        for id in ids {
            let row = Self::to_row(&LeagueRecord::new(id.clone(), id.as_str()));
            diesel::insert_into(leagues::table)
                .values(&row)
                .on_conflict(leagues::id)
                .do_nothing()
                .execute(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?;
        }

        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        diesel::update(leagues::table.filter(leagues::id.eq_any(&keys)))
            .set(leagues::detected.eq(1))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn set_selected(&self, id: &LeagueId, selected: Option<bool>) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(leagues::table.find(id.to_string()))
            .set(leagues::selected.eq(selected.map(i32::from)))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn set_blacklisted(&self, id: &LeagueId, blacklisted: bool) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(leagues::table.find(id.to_string()))
            .set(leagues::blacklisted.eq(i32::from(blacklisted)))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
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

    fn league(id: &str) -> LeagueId {
        LeagueId::new(id)
    }

    #[tokio::test]
    async fn upsert_and_all_roundtrip() {
        let store = SqliteLeagueStore::new(setup_test_db());
        let mut record = LeagueRecord::new(league("39"), "Premier League");
        record.detected = true;
        store.upsert(&record).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all, vec![record]);
    }

    #[tokio::test]
    async fn mark_detected_inserts_unknown_leagues() {
        let store = SqliteLeagueStore::new(setup_test_db());
        store
            .mark_detected(&[league("39"), league("140")])
            .await
            .unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.detected));
        assert!(all.iter().all(|r| r.selected.is_none()));
    }

    #[tokio::test]
    async fn mark_detected_preserves_operator_flags() {
        let store = SqliteLeagueStore::new(setup_test_db());
        let mut record = LeagueRecord::new(league("39"), "Premier League");
        record.selected = Some(false);
        record.blacklisted = true;
        store.upsert(&record).await.unwrap();

        store.mark_detected(&[league("39")]).await.unwrap();

        let all = store.all().await.unwrap();
        assert!(all[0].detected);
        assert_eq!(all[0].selected, Some(false));
        assert!(all[0].blacklisted);
        assert_eq!(all[0].name, "Premier League");
    }

    #[tokio::test]
    async fn selection_and_blacklist_toggles() {
        let store = SqliteLeagueStore::new(setup_test_db());
        store.mark_detected(&[league("61")]).await.unwrap();

        store.set_selected(&league("61"), Some(true)).await.unwrap();
        store.set_blacklisted(&league("61"), true).await.unwrap();
        let all = store.all().await.unwrap();
        assert_eq!(all[0].selected, Some(true));
        assert!(all[0].blacklisted);
        assert!(!all[0].eligible());

        store.set_selected(&league("61"), None).await.unwrap();
        store.set_blacklisted(&league("61"), false).await.unwrap();
        let all = store.all().await.unwrap();
        assert_eq!(all[0].selected, None);
        assert!(all[0].eligible());
    }
}
