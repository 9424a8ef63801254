//! Typed persistence of named slots over a key-value backend.
//!
//! # Responsibility
//! - Read a slot once at startup, falling back to a caller-supplied initial value.
//! - Write a whole slot value synchronously after every mutation.
//! - Keep the JSON encoding of slot values in one place.
//!
//! # Invariants
//! - A slot that holds text which does not decode is a fatal load error; the
//!   initial value is used only when the slot is absent.
//! - A lazy initializer runs at most once, and only for an absent slot.
//! - `save` returns only after the backend committed the value.

use crate::db::DbError;
use crate::model::note::StoredNote;
use crate::model::tag::Tag;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Instant;

mod memory;
mod sqlite;

pub use memory::MemoryKvBackend;
pub use sqlite::SqliteKvBackend;

/// Slot holding the ordered note collection.
pub const NOTES_SLOT: Slot<Vec<StoredNote>> = Slot::new("NOTES");
/// Slot holding the ordered tag collection.
pub const TAGS_SLOT: Slot<Vec<Tag>> = Slot::new("TAGS");

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for slot load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backend transport failure.
    Db(DbError),
    /// Stored text exists but cannot be decoded into the slot schema.
    Corrupted {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Value could not be encoded before writing.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupted { key, source } => {
                write!(f, "stored value for slot `{key}` is corrupted: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode value for slot `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupted { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw text storage addressed by string keys.
///
/// Methods take `&self` so one backend can be shared by several registries.
pub trait KvBackend {
    /// Returns the text stored under `key`, if any.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the text stored under `key`.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Typed key naming one persisted slot and its value schema.
pub struct Slot<T> {
    key: &'static str,
    _schema: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _schema: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

/// JSON-encoded slot store on top of a [`KvBackend`].
pub struct PersistentStore<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> PersistentStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrows the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads `slot`, or returns `initial` when nothing was saved yet.
    pub fn load_or<T>(&self, slot: Slot<T>, initial: T) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        self.load_or_else(slot, move || initial)
    }

    /// Loads `slot`, or evaluates `init` when nothing was saved yet.
    ///
    /// # Errors
    /// - `StoreError::Corrupted` when saved text does not decode; `init` is not
    ///   consulted in that case.
    /// - `StoreError::Db` on backend failure.
    pub fn load_or_else<T, F>(&self, slot: Slot<T>, init: F) -> StoreResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let started_at = Instant::now();
        let key = slot.key();
        let Some(text) = self.backend.read(key)? else {
            debug!("event=store_load module=store status=ok key={key} source=initial");
            return Ok(init());
        };

        match serde_json::from_str(&text) {
            Ok(value) => {
                info!(
                    "event=store_load module=store status=ok key={} source=stored bytes={} duration_ms={}",
                    key,
                    text.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error key={} error_code=slot_corrupted line={} column={}",
                    key,
                    source.line(),
                    source.column()
                );
                Err(StoreError::Corrupted { key, source })
            }
        }
    }

    /// Serializes `value` and commits it under `slot`.
    pub fn save<T>(&self, slot: Slot<T>, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let key = slot.key();
        let text =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        if let Err(err) = self.backend.write(key, &text) {
            error!(
                "event=store_save module=store status=error key={} error_code=slot_write_failed error={}",
                key, err
            );
            return Err(err);
        }
        debug!(
            "event=store_save module=store status=ok key={} bytes={}",
            key,
            text.len()
        );
        Ok(())
    }

    /// Whether anything was saved under `slot`.
    pub fn contains<T>(&self, slot: Slot<T>) -> StoreResult<bool> {
        Ok(self.backend.read(slot.key())?.is_some())
    }
}
