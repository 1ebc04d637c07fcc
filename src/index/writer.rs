//! Deriving the stored spatial fields of a document.
//!
//! Field values are computed once per document at index time and never
//! patched: an update deletes the document and re-derives everything.

use crate::compute::grid::cell_id;
use crate::compute::projection::project;
use crate::compute::validation::validate_geographic_point;
use crate::error::Result;
use crate::index::document::SpatialDocument;
use crate::index::field::{CoordinateField, Coordinates, IndexingStrategy};
use crate::index::store::{DocId, FieldValue, IndexWriter};
use std::collections::BTreeMap;

/// Stored spatial fields of one coordinate field, by key.
pub type IndexedFields = BTreeMap<String, FieldValue>;

/// Compute the stored fields for one coordinate field.
///
/// With the hash strategy, one cell id is written per level from the
/// field's minimum to its maximum level, plus the raw latitude and
/// longitude used for exact refinement. With the range strategy only the
/// raw coordinates are written.
///
/// A missing latitude or longitude is not an error: no fields are written
/// and the entity is simply not findable through this field.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::index::{index_fields, CoordinateField, FieldValue};
///
/// let field = CoordinateField::new("home").with_levels(0, 2)?;
/// let fields = index_fields(&field, Some(24.0), Some(32.0))?;
/// assert_eq!(fields.len(), 5);
/// assert_eq!(fields["home_HSSI_0"], FieldValue::String("0|0".into()));
/// assert_eq!(fields["home_HSSI_Latitude"], FieldValue::Numeric(24.0));
///
/// assert!(index_fields(&field, None, Some(32.0))?.is_empty());
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn index_fields(
    field: &CoordinateField,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<IndexedFields> {
    let mut fields = IndexedFields::new();
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        log::trace!("Coordinate field {} has no coordinates, skipping", field.name());
        return Ok(fields);
    };

    let point = validate_geographic_point(latitude, longitude)?;

    if field.strategy() == IndexingStrategy::Hash {
        let projected = project(&point);
        for level in field.min_level()..=field.max_level() {
            let cell = cell_id(&projected, level)?;
            fields.insert(field.cell_key(level), FieldValue::String(cell.to_string()));
        }
    }

    fields.insert(field.latitude_key(), FieldValue::Numeric(point.latitude()));
    fields.insert(field.longitude_key(), FieldValue::Numeric(point.longitude()));
    Ok(fields)
}

/// [`index_fields`] for any coordinate source.
pub fn index_coordinates<C: Coordinates + ?Sized>(
    field: &CoordinateField,
    source: &C,
) -> Result<IndexedFields> {
    match source.coordinates() {
        Some((latitude, longitude)) => index_fields(field, Some(latitude), Some(longitude)),
        None => index_fields(field, None, None),
    }
}

/// Write every coordinate field of a document through an index writer.
///
/// Every field is computed before anything is written, then the document's
/// stored fields are swapped in one [`IndexWriter::replace_document`] call.
/// Returns the number of stored values. Nothing is written if any field
/// holds invalid coordinates. Whether a failed write can leave a partial
/// document depends on the writer; [`MemoryIndex`] applies the swap
/// atomically.
///
/// [`MemoryIndex`]: crate::index::store::MemoryIndex
pub fn index_document<W: IndexWriter + ?Sized>(
    writer: &W,
    doc: DocId,
    document: &SpatialDocument,
) -> Result<usize> {
    let mut all = IndexedFields::new();
    for entry in document.fields() {
        all.extend(index_coordinates(entry.field(), &entry.coordinates())?);
    }

    let count = all.len();
    writer.replace_document(doc, all)?;
    Ok(count)
}
