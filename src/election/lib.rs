use anyhow::Result;
use libsql::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub industry_connected: bool,
    pub party_id: Option<i64>,
    pub party_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCandidate {
    pub first_name: String,
    pub last_name: String,
    pub industry_connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCandidateParty {
    pub party_id: i64,
}

/// Persistence layer for the election database. Every method issues exactly
/// one parameterized statement; writes report the affected-row count so the
/// handlers can tell "not found" from "changed".
pub struct Election<'a> {
    conn: &'a Connection,
}

impl<'a> Election<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let query = r#"
            SELECT candidates.id, candidates.first_name, candidates.last_name,
                   candidates.industry_connected, candidates.party_id,
                   parties.name AS party_name
            FROM candidates
            LEFT JOIN parties ON candidates.party_id = parties.id
        "#;

        let mut rows = self.conn.query(query, ()).await?;

        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push(self.row_to_candidate(&row)?);
        }
        Ok(candidates)
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>> {
        let query = r#"
            SELECT candidates.id, candidates.first_name, candidates.last_name,
                   candidates.industry_connected, candidates.party_id,
                   parties.name AS party_name
            FROM candidates
            LEFT JOIN parties ON candidates.party_id = parties.id
            WHERE candidates.id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_candidate(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn create_candidate(&self, input: CreateCandidate) -> Result<()> {
        let query = r#"
            INSERT INTO candidates (first_name, last_name, industry_connected)
            VALUES (?, ?, ?)
        "#;

        self.conn
            .execute(
                query,
                libsql::params![
                    input.first_name,
                    input.last_name,
                    input.industry_connected as i64
                ],
            )
            .await?;

        Ok(())
    }

    pub async fn set_candidate_party(&self, id: i64, party_id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute(
                "UPDATE candidates SET party_id = ? WHERE id = ?",
                libsql::params![party_id, id],
            )
            .await?;
        Ok(affected)
    }

    pub async fn delete_candidate(&self, id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM candidates WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }

    pub async fn list_parties(&self) -> Result<Vec<Party>> {
        let mut rows = self
            .conn
            .query("SELECT id, name FROM parties", ())
            .await?;

        let mut parties = Vec::new();
        while let Some(row) = rows.next().await? {
            parties.push(self.row_to_party(&row)?);
        }
        Ok(parties)
    }

    pub async fn get_party(&self, id: i64) -> Result<Option<Party>> {
        let mut rows = self
            .conn
            .query("SELECT id, name FROM parties WHERE id = ?", libsql::params![id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_party(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_party(&self, id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM parties WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }

    fn row_to_candidate(&self, row: &libsql::Row) -> Result<Candidate> {
        // industry_connected is stored as INTEGER 0/1.
        let industry_connected: i64 = row.get(3)?;

        Ok(Candidate {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            industry_connected: industry_connected != 0,
            party_id: row.get(4)?,
            party_name: row.get(5)?,
        })
    }

    fn row_to_party(&self, row: &libsql::Row) -> Result<Party> {
        Ok(Party {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("election.db")).await.unwrap();
        (dir, db)
    }

    async fn seed_party(db: &Database, name: &str) -> i64 {
        db.connection()
            .execute("INSERT INTO parties (name) VALUES (?)", libsql::params![name])
            .await
            .unwrap();
        db.connection().last_insert_rowid()
    }

    fn firbank() -> CreateCandidate {
        CreateCandidate {
            first_name: "Ronald".to_string(),
            last_name: "Firbank".to_string(),
            industry_connected: true,
        }
    }

    #[tokio::test]
    async fn created_candidate_has_no_party() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        store.create_candidate(firbank()).await.unwrap();

        let candidates = store.list_candidates().await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].first_name, "Ronald");
        assert!(candidates[0].industry_connected);
        assert_eq!(candidates[0].party_id, None);
        assert_eq!(candidates[0].party_name, None);
    }

    #[tokio::test]
    async fn list_joins_party_name() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        let party_id = seed_party(&db, "The Developers").await;
        store.create_candidate(firbank()).await.unwrap();

        let id = store.list_candidates().await.unwrap()[0].id;
        let affected = store.set_candidate_party(id, party_id).await.unwrap();
        assert_eq!(affected, 1);

        let candidate = store.get_candidate(id).await.unwrap().unwrap();
        assert_eq!(candidate.party_id, Some(party_id));
        assert_eq!(candidate.party_name.as_deref(), Some("The Developers"));
    }

    #[tokio::test]
    async fn set_party_on_unknown_candidate_affects_zero_rows() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        let party_id = seed_party(&db, "The Developers").await;
        let affected = store.set_candidate_party(42, party_id).await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        store.create_candidate(firbank()).await.unwrap();
        let id = store.list_candidates().await.unwrap()[0].id;

        assert_eq!(store.delete_candidate(id).await.unwrap(), 1);
        assert_eq!(store.delete_candidate(id).await.unwrap(), 0);
        assert!(store.list_candidates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_candidate_misses_with_none() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        assert!(store.get_candidate(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn party_reads_and_delete() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        let growth = seed_party(&db, "Growth").await;
        seed_party(&db, "Stability").await;

        assert_eq!(store.list_parties().await.unwrap().len(), 2);

        let party = store.get_party(growth).await.unwrap().unwrap();
        assert_eq!(party.name, "Growth");

        assert_eq!(store.delete_party(growth).await.unwrap(), 1);
        assert_eq!(store.delete_party(growth).await.unwrap(), 0);
        assert!(store.get_party(growth).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_party_leaves_candidate_row() {
        let (_dir, db) = test_db().await;
        let store = Election::new(db.connection());

        let party_id = seed_party(&db, "Growth").await;
        store.create_candidate(firbank()).await.unwrap();
        let id = store.list_candidates().await.unwrap()[0].id;
        store.set_candidate_party(id, party_id).await.unwrap();

        // No cascade: the candidate keeps its dangling party_id and the join
        // surfaces a null name.
        store.delete_party(party_id).await.unwrap();
        let candidate = store.get_candidate(id).await.unwrap().unwrap();
        assert_eq!(candidate.party_id, Some(party_id));
        assert_eq!(candidate.party_name, None);
    }
}
