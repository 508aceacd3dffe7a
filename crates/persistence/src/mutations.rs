// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::data_models::DocumentRow;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;

/// Inserts a new document row.
///
/// # Errors
///
/// Returns an error if the id or number is already taken, or the parent
/// document does not exist.
pub fn insert_document(
    conn: &mut SqliteConnection,
    row: &DocumentRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(documents::table)
        .values(row)
        .execute(conn)?;

    info!(kind = %row.kind, id = %row.id, number = %row.number, "Document created");
    Ok(())
}

/// Overwrites a stored document with `row`.
///
/// There is no concurrency token: the last writer wins.
///
/// # Errors
///
/// Returns an error if no document with the row's id exists.
pub fn overwrite_document(
    conn: &mut SqliteConnection,
    row: &DocumentRow,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        documents::table
            .filter(documents::id.eq(&row.id))
            .filter(documents::kind.eq(&row.kind)),
    )
    .set((
        documents::number.eq(&row.number),
        documents::parent_id.eq(&row.parent_id),
        documents::body.eq(&row.body),
        documents::updated_at.eq(&row.updated_at),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::DocumentNotFound {
            kind: row.kind.clone(),
            id: row.id.clone(),
        });
    }

    debug!(kind = %row.kind, id = %row.id, "Document saved");
    Ok(())
}
