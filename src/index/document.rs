//! Grouping several named coordinate fields on one document.

use crate::index::field::{CoordinateField, Coordinates};
use std::collections::BTreeMap;

/// One coordinate field of a document together with its current values.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    field: CoordinateField,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl FieldEntry {
    pub fn field(&self) -> &CoordinateField {
        &self.field
    }

    /// `(latitude, longitude)`, either of which may be absent.
    pub fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        (self.latitude, self.longitude)
    }
}

/// The spatial part of a document: coordinate fields keyed by name.
///
/// Fields are independent. Setting a field again under the same name
/// replaces it.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::index::{CoordinateField, SpatialDocument};
///
/// let doc = SpatialDocument::new()
///     .with_field(CoordinateField::new("home"), (48.85, 2.35))
///     .with_field(CoordinateField::new("work"), (None::<f64>, Some(2.29)));
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.get("home").unwrap().coordinates(), (Some(48.85), Some(2.35)));
/// assert_eq!(doc.get("work").unwrap().coordinates(), (None, None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialDocument {
    fields: BTreeMap<String, FieldEntry>,
}

impl SpatialDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a coordinate field from any coordinate source.
    pub fn set_field<C: Coordinates + ?Sized>(&mut self, field: CoordinateField, source: &C) {
        let (latitude, longitude) = match source.coordinates() {
            Some((latitude, longitude)) => (Some(latitude), Some(longitude)),
            None => (None, None),
        };
        self.fields.insert(
            field.name().to_string(),
            FieldEntry {
                field,
                latitude,
                longitude,
            },
        );
    }

    pub fn with_field<C: Coordinates>(mut self, field: CoordinateField, source: C) -> Self {
        self.set_field(field, &source);
        self
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldEntry> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
