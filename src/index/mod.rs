//! Index-time side of the spatial hash: coordinate fields, the stored
//! field layout, and the document index contracts.

pub mod document;
pub mod field;
pub mod store;
pub mod writer;

pub use document::{FieldEntry, SpatialDocument};
pub use field::{
    CoordinateField, Coordinates, DEFAULT_FIELD_NAME, IndexingStrategy, cell_field_key,
    latitude_field_key, longitude_field_key,
};
pub use store::{
    DocId, FieldValue, FieldValueKind, IndexReader, IndexStats, IndexWriter, MemoryIndex,
};
pub use writer::{IndexedFields, index_coordinates, index_document, index_fields};
