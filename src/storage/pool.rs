//! SQLite connection pool
//!
//! `Database` is the persistence handle shared by every request. It holds a
//! fixed set of connections; callers check one out for the duration of a
//! single operation. SQLite allows one writer at a time, so write
//! transactions serialize on the database lock while readers proceed on
//! their own connections.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;

use super::schema;
use crate::{Error, Result};

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_POOL_SIZE: usize = 4;

/// Pooled SQLite persistence handle
pub struct Database {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a database file (creates if doesn't exist) with the default pool size
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_pool_size(path, DEFAULT_POOL_SIZE)
    }

    /// Open a database file with `pool_size` connections (at least one)
    pub fn open_with_pool_size(path: &Path, pool_size: usize) -> Result<Self> {
        let pool_size = pool_size.max(1);

        // The first connection creates the schema before the others exist.
        let first = Self::open_connection(path)?;
        Self::initialize_schema(&first)?;

        let mut connections = Vec::with_capacity(pool_size);
        connections.push(Mutex::new(first));
        for _ in 1..pool_size {
            connections.push(Mutex::new(Self::open_connection(path)?));
        }

        tracing::debug!("Opened {} with {} connection(s)", path.display(), pool_size);

        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing)
    ///
    /// In-memory databases are private to their connection, so the pool
    /// always has exactly one.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            connections: vec![Mutex::new(conn)],
            next: AtomicUsize::new(0),
            path: None,
        })
    }

    fn open_connection(path: &Path) -> Result<Connection> {
        let conn = Connection::open(path)?;
        // journal_mode answers with the resulting mode, so read the row back.
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Initialize the database schema
    fn initialize_schema(conn: &Connection) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Check out a connection
    ///
    /// Takes the first idle connection. When all are busy, blocks on one
    /// chosen round-robin, even if another frees up sooner. Connections
    /// poisoned by a panicking holder may be mid-transaction and are never
    /// handed out again; `PoolPoisoned` means every connection is poisoned.
    pub fn checkout(&self) -> Result<MutexGuard<'_, Connection>> {
        for conn in &self.connections {
            if let Ok(guard) = conn.try_lock() {
                return Ok(guard);
            }
        }

        let len = self.connections.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed);
        for i in 0..len {
            let conn = &self.connections[(start + i) % len];
            if conn.is_poisoned() {
                continue;
            }
            if let Ok(guard) = conn.lock() {
                return Ok(guard);
            }
        }

        tracing::error!("All {} pooled connection(s) are poisoned", len);
        Err(Error::PoolPoisoned)
    }

    /// Number of pooled connections
    pub fn pool_size(&self) -> usize {
        self.connections.len()
    }

    /// Backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
