//! The two filtering stages of a spatial query and the distance function.
//!
//! [`CoarsePredicate`] is a cheap term-membership test on the stored cell
//! id at one level. It may accept documents outside the disc but never
//! rejects a document inside it. [`ExactFilter`] then computes the
//! great-circle distance from the stored raw coordinates.

use crate::compute::distance::distance_km;
use crate::error::{Result, SpatialError};
use crate::index::store::{DocId, FieldValue, IndexReader};
use rustc_hash::FxHashSet;
use spatio_grid_types::cell::CellId;
use spatio_grid_types::point::GeoPoint;

/// Candidate selection: the level-`n` cell id field holds one of `cells`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoarsePredicate {
    field_key: String,
    level: u8,
    cells: FxHashSet<CellId>,
}

impl CoarsePredicate {
    pub fn new(field_key: String, level: u8, cells: FxHashSet<CellId>) -> Self {
        Self {
            field_key,
            level,
            cells,
        }
    }

    /// Stored key the predicate tests, e.g. `location_HSSI_9`.
    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn cells(&self) -> &FxHashSet<CellId> {
        &self.cells
    }

    /// Cell ids in their stored string form, for a term-membership query.
    pub fn terms(&self) -> FxHashSet<String> {
        self.cells.iter().map(CellId::to_string).collect()
    }

    pub fn matches_cell(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }

    /// Test a stored cell id string.
    ///
    /// # Errors
    ///
    /// `DataCorruption` when the value is not a well-formed cell id.
    pub fn matches_stored(&self, value: &str) -> Result<bool> {
        let cell: CellId = value.parse().map_err(|_| SpatialError::DataCorruption {
            field: self.field_key.clone(),
            value: value.to_string(),
        })?;
        Ok(self.matches_cell(cell))
    }

    /// Test the value stored on one document.
    ///
    /// Documents without the field do not match. A malformed stored value
    /// excludes the document and is logged; it does not fail the query.
    pub fn matches_document<R: IndexReader + ?Sized>(&self, reader: &R, doc: DocId) -> Result<bool> {
        let value = match reader.field_value(doc, &self.field_key)? {
            None => return Ok(false),
            Some(FieldValue::String(value)) => value,
            Some(FieldValue::Numeric(value)) => value.to_string(),
        };
        match self.matches_stored(&value) {
            Ok(matched) => Ok(matched),
            Err(e) => {
                log::warn!("Excluding document {} from spatial match: {}", doc, e);
                Ok(false)
            }
        }
    }

    /// Documents accepted by the predicate.
    ///
    /// The term query is delegated to the reader; every returned document is
    /// then checked against its stored value so that corrupt entries are
    /// dropped.
    pub fn evaluate<R: IndexReader + ?Sized>(&self, reader: &R) -> Result<FxHashSet<DocId>> {
        let candidates = reader.match_any(&self.field_key, &self.terms())?;
        let mut matched = FxHashSet::default();
        matched.reserve(candidates.len());
        for doc in candidates {
            if self.matches_document(reader, doc)? {
                matched.insert(doc);
            }
        }
        Ok(matched)
    }
}

/// Exact refinement: stored coordinates within the radius of the center.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactFilter {
    center: GeoPoint,
    radius_km: f64,
    latitude_key: String,
    longitude_key: String,
}

impl ExactFilter {
    pub fn new(center: GeoPoint, radius_km: f64, latitude_key: String, longitude_key: String) -> Self {
        Self {
            center,
            radius_km,
            latitude_key,
            longitude_key,
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Whether the coordinates lie within the radius, boundary included.
    /// Missing or invalid coordinates never match.
    pub fn matches(&self, latitude: Option<f64>, longitude: Option<f64>) -> bool {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return false;
        };
        match GeoPoint::new(latitude, longitude) {
            Ok(point) => distance_km(&self.center, &point) <= self.radius_km,
            Err(_) => false,
        }
    }

    /// Apply the filter to the coordinates stored on a document.
    pub fn matches_document<R: IndexReader + ?Sized>(&self, reader: &R, doc: DocId) -> Result<bool> {
        let latitude = reader.field_value(doc, &self.latitude_key)?.and_then(|v| v.as_f64());
        let longitude = reader.field_value(doc, &self.longitude_key)?.and_then(|v| v.as_f64());
        Ok(self.matches(latitude, longitude))
    }
}

/// Great-circle distance to a fixed center, for projection and sorting.
///
/// Unlike [`ExactFilter`] this does not skip missing coordinates: they are
/// read as `(0, 0)`. Combined with a spatial filter that case cannot occur,
/// since documents without coordinates never pass the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceFn {
    center: GeoPoint,
    latitude_key: String,
    longitude_key: String,
}

impl DistanceFn {
    pub fn new(center: GeoPoint, latitude_key: String, longitude_key: String) -> Self {
        Self {
            center,
            latitude_key,
            longitude_key,
        }
    }

    pub fn center(&self) -> &GeoPoint {
        &self.center
    }

    /// Distance to `point`, in kilometers.
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        distance_km(&self.center, point)
    }

    /// Distance to possibly missing coordinates, in kilometers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatio_grid::query::DistanceFn;
    /// use spatio_grid::GeoPoint;
    ///
    /// let f = DistanceFn::new(GeoPoint::new(0.0, 1.0)?, "lat".into(), "lon".into());
    /// let from_origin = f.distance(None, None)?;
    /// assert!((from_origin - 111.19).abs() < 0.01);
    /// # Ok::<(), spatio_grid::SpatialError>(())
    /// ```
    pub fn distance(&self, latitude: Option<f64>, longitude: Option<f64>) -> Result<f64> {
        let point = GeoPoint::new(latitude.unwrap_or(0.0), longitude.unwrap_or(0.0))?;
        Ok(self.distance_to(&point))
    }

    /// Distance to the coordinates stored on a document.
    pub fn distance_for<R: IndexReader + ?Sized>(&self, reader: &R, doc: DocId) -> Result<f64> {
        let latitude = reader.field_value(doc, &self.latitude_key)?.and_then(|v| v.as_f64());
        let longitude = reader.field_value(doc, &self.longitude_key)?.and_then(|v| v.as_f64());
        self.distance(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::store::{IndexWriter, MemoryIndex};

    fn center() -> GeoPoint {
        GeoPoint::new(24.0, 32.0).unwrap()
    }

    fn coarse(cells: &[CellId]) -> CoarsePredicate {
        CoarsePredicate::new("loc_HSSI_4".into(), 4, cells.iter().copied().collect())
    }

    #[test]
    fn test_terms_are_stored_form() {
        let predicate = coarse(&[CellId::new(1, -2), CellId::new(0, 0)]);
        let terms = predicate.terms();
        assert!(terms.contains("1|-2"));
        assert!(terms.contains("0|0"));
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_matches_stored() {
        let predicate = coarse(&[CellId::new(3, 4)]);
        assert!(predicate.matches_stored("3|4").unwrap());
        assert!(!predicate.matches_stored("3|5").unwrap());

        let err = predicate.matches_stored("3;4").unwrap_err();
        assert!(matches!(err, SpatialError::DataCorruption { .. }));
    }

    #[test]
    fn test_corrupt_document_excluded() {
        let index = MemoryIndex::new();
        index.store_field(1, "loc_HSSI_4", FieldValue::String("3|4".into())).unwrap();
        index.store_field(2, "loc_HSSI_4", FieldValue::String("garbage".into())).unwrap();
        index.store_field(3, "loc_HSSI_4", FieldValue::Numeric(7.0)).unwrap();

        let predicate = coarse(&[CellId::new(3, 4)]);
        assert!(predicate.matches_document(&index, 1).unwrap());
        assert!(!predicate.matches_document(&index, 2).unwrap());
        assert!(!predicate.matches_document(&index, 3).unwrap());
        assert!(!predicate.matches_document(&index, 4).unwrap());

        let matched = predicate.evaluate(&index).unwrap();
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_exact_filter() {
        let filter = ExactFilter::new(center(), 51.0, "lat".into(), "lon".into());
        assert!(filter.matches(Some(24.0), Some(31.5)));
        assert!(!filter.matches(Some(24.5), Some(40.0)));
        assert!(!filter.matches(None, Some(32.0)));
        assert!(!filter.matches(Some(24.0), None));
        assert!(!filter.matches(Some(240.0), Some(32.0)));
    }

    #[test]
    fn test_exact_filter_boundary_inclusive() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let target = GeoPoint::new(0.0, 0.5).unwrap();
        let d = distance_km(&origin, &target);

        let at = ExactFilter::new(origin, d, "lat".into(), "lon".into());
        assert!(at.matches(Some(0.0), Some(0.5)));
        let below = ExactFilter::new(origin, d * (1.0 - 1e-9), "lat".into(), "lon".into());
        assert!(!below.matches(Some(0.0), Some(0.5)));
    }

    #[test]
    fn test_exact_filter_reads_document() {
        let index = MemoryIndex::new();
        index.store_field(1, "lat", FieldValue::Numeric(24.0)).unwrap();
        index.store_field(1, "lon", FieldValue::Numeric(31.5)).unwrap();
        index.store_field(2, "lon", FieldValue::Numeric(32.0)).unwrap();

        let filter = ExactFilter::new(center(), 51.0, "lat".into(), "lon".into());
        assert!(filter.matches_document(&index, 1).unwrap());
        assert!(!filter.matches_document(&index, 2).unwrap());
    }

    #[test]
    fn test_distance_null_falls_back_to_origin() {
        let f = DistanceFn::new(center(), "lat".into(), "lon".into());
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let expected = distance_km(&center(), &origin);
        assert_eq!(f.distance(None, None).unwrap(), expected);

        let index = MemoryIndex::new();
        assert_eq!(f.distance_for(&index, 42).unwrap(), expected);
    }
}
