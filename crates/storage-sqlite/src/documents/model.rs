//! Database model for user documents.

use diesel::prelude::*;

/// One JSON document owned by a user inside a named collection.
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDocumentDB {
    pub user_id: String,
    pub collection: String,
    pub document_id: String,
    pub body: String,
    pub updated_at: String,
}
