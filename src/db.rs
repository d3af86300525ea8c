use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;

const MIGRATIONS_TABLE: &str = include_str!("migrations/000_migrations_table.sql");

pub struct Database {
    // Keeps the underlying database handle alive for the connection's lifetime.
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(cfg.app.get_db());
        Self::open(&path).await
    }

    pub async fn open(path: &Path) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        // Bookkeeping table first; its DDL is idempotent.
        conn.execute_batch(MIGRATIONS_TABLE).await?;

        for (name, sql) in crate::election::migrations() {
            Self::run_migration(&conn, name, sql).await?;
        }

        Ok(Database { _db: db, conn })
    }

    async fn is_applied(conn: &Connection, name: &str) -> Result<bool> {
        let mut rows = conn
            .query(
                "SELECT 1 FROM _migrations WHERE name = ?",
                libsql::params![name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        conn.execute(
            "INSERT INTO _migrations (name, applied_at) VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
            libsql::params![name],
        )
        .await?;

        Ok(())
    }
}
