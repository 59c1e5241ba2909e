mod model;
mod store;

pub use model::UserDocumentDB;
pub use store::{delete_document, load_collection, load_document, upsert_document, DocumentRange};
