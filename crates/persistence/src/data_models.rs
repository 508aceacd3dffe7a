// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use procura_domain::Document;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::documents;
use crate::error::PersistenceError;

/// A stored document row.
///
/// The typed document lives in `body` as JSON; the other columns are the
/// lookup keys copied out of it.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
    pub id: String,
    pub kind: String,
    pub number: String,
    pub parent_id: Option<String>,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DocumentRow {
    /// Serializes a typed document into its row.
    ///
    /// # Errors
    ///
    /// Returns an error if the body or timestamps cannot be serialized.
    pub fn from_document<D: Document>(document: &D) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: document.id().to_string(),
            kind: D::KIND.as_str().to_string(),
            number: document.number().to_string(),
            parent_id: document.parent_id().map(str::to_string),
            body: serde_json::to_string(document)?,
            created_at: timestamp(document.created_at())?,
            updated_at: timestamp(document.updated_at())?,
        })
    }
}

/// Decodes a stored JSON body back into its document type.
///
/// # Errors
///
/// Returns an error if the body does not match the document type.
pub fn decode<D: Document>(body: &str) -> Result<D, PersistenceError> {
    Ok(serde_json::from_str(body)?)
}

fn timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.format(&Rfc3339)?)
}
