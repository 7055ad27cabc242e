//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! `RecordBook` calls store methods; it never executes SQL directly.
//!
//! Every mutating method copies the store file to its backup path first.
//! The copy is best-effort: a failed backup is logged and the write goes on.

use crate::{config::default_backup_path, error::TrailResult};
use rusqlite::{Connection, OpenFlags};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod aggregate;
mod records;

pub struct RecordStore {
    conn:        Connection,
    path:        Option<PathBuf>, // None for :memory:
    backup_path: Option<PathBuf>,
}

impl RecordStore {
    /// Open (or create) the store file at `path`. The backup path defaults to
    /// the `_backup` sibling of `path`.
    pub fn open(path: impl AsRef<Path>) -> TrailResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        // Backups copy the main file only, so stay on the rollback journal.
        conn.execute_batch("PRAGMA journal_mode=DELETE;")?;
        Ok(Self {
            conn,
            path:        Some(path.to_path_buf()),
            backup_path: Some(default_backup_path(path)),
        })
    }

    /// Open an in-memory database (used in tests). Backups are skipped.
    pub fn in_memory() -> TrailResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None, backup_path: None })
    }

    pub fn with_backup_path(mut self, backup_path: impl Into<PathBuf>) -> Self {
        if self.path.is_some() {
            self.backup_path = Some(backup_path.into());
        }
        self
    }

    /// Create both record tables if they do not exist yet.
    pub fn migrate(&self) -> TrailResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_records.sql"))?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    /// Copy the store file over its backup. Returns whether a copy was made.
    /// Never fails the caller: errors are logged and swallowed.
    pub fn backup(&self) -> bool {
        let (Some(source), Some(target)) = (&self.path, &self.backup_path) else {
            log::debug!("In-memory store: backup skipped");
            return false;
        };
        match std::fs::copy(source, target) {
            Ok(bytes) => {
                log::info!("Backup created: {} ({bytes} bytes)", target.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                log::error!("Backup failed: permission denied ({})", target.display());
                false
            }
            Err(e) => {
                log::error!(
                    "Backup failed: {} -> {}: {e}",
                    source.display(),
                    target.display()
                );
                false
            }
        }
    }
}
