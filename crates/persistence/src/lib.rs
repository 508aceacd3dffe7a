// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document store for the procurement workflow.
//!
//! Service requests, job orders, purchase orders and receiving reports are
//! stored as JSON bodies in a single `documents` table built on Diesel and
//! `SQLite`. The store is deliberately thin: every write overwrites the full
//! document and there is no concurrency token, so the last writer wins.
//!
//! ## Layout
//!
//! - `documents.id` is the opaque document id
//! - `documents.kind` discriminates the four document types
//! - `documents.number` is the human-readable `XX-YYYY-NNNN` number,
//!   unique per kind
//! - `documents.parent_id` links a document to the one it was created from
//!   and is enforced as a foreign key
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives each caller an isolated shared-cache
//! in-memory database, so tests never touch the filesystem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use procura_domain::{Document, DocumentKind, format_document_number};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::DocumentRow;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for workflow documents.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Stores a newly created document.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or number is taken, the parent document
    /// is missing, or the document cannot be serialized.
    pub fn insert<D: Document>(&mut self, document: &D) -> Result<(), PersistenceError> {
        let row: DocumentRow = DocumentRow::from_document(document)?;
        mutations::insert_document(&mut self.conn, &row)
    }

    /// Overwrites a stored document in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the document was never inserted or cannot be
    /// serialized.
    pub fn save<D: Document>(&mut self, document: &D) -> Result<(), PersistenceError> {
        let row: DocumentRow = DocumentRow::from_document(document)?;
        mutations::overwrite_document(&mut self.conn, &row)
    }

    /// Retrieves a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored body does not
    /// decode. Returns `Ok(None)` if no document of this kind has the id.
    pub fn get<D: Document>(&mut self, id: &str) -> Result<Option<D>, PersistenceError> {
        queries::get_document_body(&mut self.conn, D::KIND, id)?
            .map(|body| data_models::decode(&body))
            .transpose()
    }

    /// Retrieves the document of type `D` created from `parent_id`, if any.
    ///
    /// Each parent has at most one child of a given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored body does not decode.
    pub fn find_by_parent<D: Document>(
        &mut self,
        parent_id: &str,
    ) -> Result<Option<D>, PersistenceError> {
        queries::find_document_body_by_parent(&mut self.conn, D::KIND, parent_id)?
            .map(|body| data_models::decode(&body))
            .transpose()
    }

    /// Lists every document of type `D`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored body does not decode.
    pub fn list<D: Document>(&mut self) -> Result<Vec<D>, PersistenceError> {
        queries::list_document_bodies(&mut self.conn, D::KIND)?
            .iter()
            .map(|body| data_models::decode(body))
            .collect()
    }

    /// Allocates the next human-readable number for `kind` in `year`.
    ///
    /// Numbers run `XX-YYYY-0001`, `XX-YYYY-0002`, ... per kind and year.
    /// Allocation is not reserved: callers serialize access to the store
    /// and insert the document before allocating again.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the sequence overflows.
    pub fn next_number(&mut self, kind: DocumentKind, year: i32) -> Result<String, PersistenceError> {
        let prefix: String = format!("{}-{year}-", kind.number_prefix());
        let existing: i64 = queries::count_numbers_with_prefix(&mut self.conn, kind, &prefix)?;

        let sequence: u32 = u32::try_from(existing + 1).map_err(|_| {
            PersistenceError::SequenceExhausted {
                prefix: kind.number_prefix().to_string(),
                year,
            }
        })?;

        let number: String = format_document_number(kind, year, sequence);
        info!(kind = kind.as_str(), %number, "Allocated document number");
        Ok(number)
    }
}
