//! Generic reads and writes against the `user_documents` table.
//!
//! Bodies are stored as JSON text. Reads hand back `serde_json::Value` so the
//! domain repositories decide how to parse (and, where needed, migrate) them.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Serialize;
use serde_json::Value;

use super::model::UserDocumentDB;
use crate::errors::{IntoCore, StorageError};
use crate::schema::user_documents::dsl::*;
use vitalfolio_core::errors::Result;

/// Inclusive bounds on `document_id`, compared as text.
#[derive(Debug, Clone, Default)]
pub struct DocumentRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn load_document(
    conn: &mut SqliteConnection,
    owner: &str,
    collection_name: &str,
    id: &str,
) -> Result<Option<Value>> {
    let stored: Option<String> = user_documents
        .filter(user_id.eq(owner))
        .filter(collection.eq(collection_name))
        .filter(document_id.eq(id))
        .select(body)
        .first::<String>(conn)
        .optional()
        .into_core()?;

    match stored {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Documents of a collection ordered by id.
pub fn load_collection(
    conn: &mut SqliteConnection,
    owner: &str,
    collection_name: &str,
    range: &DocumentRange,
) -> Result<Vec<(String, Value)>> {
    let mut query = user_documents
        .filter(user_id.eq(owner))
        .filter(collection.eq(collection_name))
        .into_boxed();
    if let Some(from) = &range.from {
        query = query.filter(document_id.ge(from.clone()));
    }
    if let Some(to) = &range.to {
        query = query.filter(document_id.le(to.clone()));
    }

    let rows = query
        .order(document_id.asc())
        .select((document_id, body))
        .load::<(String, String)>(conn)
        .into_core()?;

    rows.into_iter()
        .map(|(id, text)| Ok((id, serde_json::from_str(&text)?)))
        .collect()
}

pub fn upsert_document<T: Serialize>(
    conn: &mut SqliteConnection,
    owner: &str,
    collection_name: &str,
    id: &str,
    document: &T,
) -> Result<()> {
    let row = UserDocumentDB {
        user_id: owner.to_string(),
        collection: collection_name.to_string(),
        document_id: id.to_string(),
        body: serde_json::to_string(document).map_err(StorageError::from)?,
        updated_at: Utc::now().to_rfc3339(),
    };
    diesel::replace_into(user_documents)
        .values(&row)
        .execute(conn)
        .into_core()?;
    Ok(())
}

pub fn delete_document(
    conn: &mut SqliteConnection,
    owner: &str,
    collection_name: &str,
    id: &str,
) -> Result<usize> {
    diesel::delete(
        user_documents
            .filter(user_id.eq(owner))
            .filter(collection.eq(collection_name))
            .filter(document_id.eq(id)),
    )
    .execute(conn)
    .into_core()
}
