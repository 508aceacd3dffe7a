// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::DocumentKind;
use tracing::debug;

use crate::diesel_schema::documents;
use crate::error::PersistenceError;

/// Retrieves the JSON body of a document by kind and id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the document is not found.
pub fn get_document_body(
    conn: &mut SqliteConnection,
    kind: DocumentKind,
    id: &str,
) -> Result<Option<String>, PersistenceError> {
    debug!(kind = kind.as_str(), id, "Looking up document");

    Ok(documents::table
        .filter(documents::kind.eq(kind.as_str()))
        .filter(documents::id.eq(id))
        .select(documents::body)
        .first::<String>(conn)
        .optional()?)
}

/// Retrieves the body of the oldest document of `kind` created from `parent_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_document_body_by_parent(
    conn: &mut SqliteConnection,
    kind: DocumentKind,
    parent_id: &str,
) -> Result<Option<String>, PersistenceError> {
    debug!(kind = kind.as_str(), parent_id, "Looking up document by parent");

    Ok(documents::table
        .filter(documents::kind.eq(kind.as_str()))
        .filter(documents::parent_id.eq(parent_id))
        .order((documents::created_at.asc(), documents::number.asc()))
        .select(documents::body)
        .first::<String>(conn)
        .optional()?)
}

/// Lists the bodies of every document of `kind`, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_document_bodies(
    conn: &mut SqliteConnection,
    kind: DocumentKind,
) -> Result<Vec<String>, PersistenceError> {
    Ok(documents::table
        .filter(documents::kind.eq(kind.as_str()))
        .order((documents::created_at.desc(), documents::number.desc()))
        .select(documents::body)
        .load::<String>(conn)?)
}

/// Counts documents of `kind` whose number starts with `prefix`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_numbers_with_prefix(
    conn: &mut SqliteConnection,
    kind: DocumentKind,
    prefix: &str,
) -> Result<i64, PersistenceError> {
    Ok(documents::table
        .filter(documents::kind.eq(kind.as_str()))
        .filter(documents::number.like(format!("{prefix}%")))
        .count()
        .get_result::<i64>(conn)?)
}
