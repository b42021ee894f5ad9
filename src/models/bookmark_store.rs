//! Bookmark set backed by a single key in the application database.
//!
//! Every mutation serializes the whole set and overwrites the stored value.
//! Reads fail soft: a missing or unreadable record is an empty set.

use super::BookmarkSet;
use crate::database::db::{self, BOOKMARKS_KEY};
use crate::database::{StorageError, StorageResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("word is already bookmarked")]
    AlreadyBookmarked,

    #[error("cannot bookmark an empty word")]
    EmptyWord,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BookmarkError {
    /// True for the no-op outcomes of `add`, as opposed to storage failures
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::AlreadyBookmarked | Self::EmptyWord)
    }
}

pub struct BookmarkStore {
    conn: Arc<Mutex<Connection>>,
    bookmarks: BookmarkSet,
}

impl BookmarkStore {
    /// Loads the persisted set, or starts empty if there is none
    pub fn load(conn: Arc<Mutex<Connection>>) -> Self {
        let bookmarks = read_bookmarks(&conn);
        debug!(count = bookmarks.len(), "loaded bookmarks");
        Self { conn, bookmarks }
    }

    /// Re-reads the stored set, replacing the in-memory copy
    pub fn reload(&mut self) {
        self.bookmarks = read_bookmarks(&self.conn);
    }

    pub fn words(&self) -> &[String] {
        self.bookmarks.words()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.bookmarks.contains(word)
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn add(&mut self, word: &str) -> Result<(), BookmarkError> {
        if word.is_empty() {
            return Err(BookmarkError::EmptyWord);
        }
        if !self.bookmarks.insert(word) {
            return Err(BookmarkError::AlreadyBookmarked);
        }

        if let Err(e) = self.persist() {
            self.bookmarks.remove(word);
            warn!(word, error = %e, "failed to save bookmark");
            return Err(e.into());
        }
        debug!(word, "bookmark added");
        Ok(())
    }

    pub fn remove(&mut self, word: &str) -> StorageResult<()> {
        let previous = self.bookmarks.clone();
        if !self.bookmarks.remove(word) {
            return Ok(());
        }

        if let Err(e) = self.persist() {
            self.bookmarks = previous;
            warn!(word, error = %e, "failed to save bookmark removal");
            return Err(e);
        }
        debug!(word, "bookmark removed");
        Ok(())
    }

    fn persist(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.bookmarks)?;
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        db::set_app_value(BOOKMARKS_KEY, &json, &conn)
    }
}

fn read_bookmarks(conn: &Mutex<Connection>) -> BookmarkSet {
    let raw = match conn.lock() {
        Ok(conn) => db::get_app_value(BOOKMARKS_KEY, &conn),
        Err(_) => Err(StorageError::Poisoned),
    };

    match raw {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "stored bookmarks are unreadable, starting empty");
            BookmarkSet::new()
        }),
        Ok(None) => BookmarkSet::new(),
        Err(e) => {
            warn!(error = %e, "could not read bookmarks, starting empty");
            BookmarkSet::new()
        }
    }
}
