//! Turning a search disc into a two-stage spatial query.

use crate::compute::bbox::BoundingRectangles;
use crate::compute::distance::DistanceUnit;
use crate::compute::enumerate::enumerate_all;
use crate::compute::level::best_level_within;
use crate::compute::validation::validate_geographic_point;
use crate::config::Config;
use crate::error::{Result, SpatialError};
use crate::index::field::{CoordinateField, DEFAULT_FIELD_NAME, IndexingStrategy};
use crate::query::disc::SearchDisc;
use crate::query::predicate::{CoarsePredicate, DistanceFn, ExactFilter};
use rustc_hash::FxHashMap;

/// A planned spatial query against one coordinate field.
#[derive(Debug, Clone)]
pub struct SpatialQuery {
    disc: SearchDisc,
    field: String,
    rectangles: BoundingRectangles,
    coarse: CoarsePredicate,
    exact: ExactFilter,
    distance: DistanceFn,
}

impl SpatialQuery {
    pub fn disc(&self) -> &SearchDisc {
        &self.disc
    }

    /// Name of the coordinate field queried.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Grid level the coarse predicate works at.
    pub fn level(&self) -> u8 {
        self.coarse.level()
    }

    pub fn rectangles(&self) -> &BoundingRectangles {
        &self.rectangles
    }

    pub fn candidate_cell_count(&self) -> usize {
        self.coarse.cells().len()
    }

    pub fn coarse(&self) -> &CoarsePredicate {
        &self.coarse
    }

    pub fn exact(&self) -> &ExactFilter {
        &self.exact
    }

    pub fn distance(&self) -> &DistanceFn {
        &self.distance
    }
}

/// Plan a query for `disc` on `field`.
///
/// Picks the level, covers the disc with one or two planar rectangles, and
/// enumerates the cells they overlap at that level.
///
/// # Errors
///
/// `UnsupportedStrategy` when the field stores no cell ids.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::index::CoordinateField;
/// use spatio_grid::query::{plan_query, SearchDisc};
///
/// let disc = SearchDisc::from_degrees(24.0, 32.0, 51.0)?;
/// let query = plan_query(&disc, &CoordinateField::new("location"))?;
/// assert!(query.coarse().field_key().starts_with("location_HSSI_"));
/// assert!(query.candidate_cell_count() <= 4);
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn plan_query(disc: &SearchDisc, field: &CoordinateField) -> Result<SpatialQuery> {
    if field.strategy() != IndexingStrategy::Hash {
        return Err(SpatialError::UnsupportedStrategy {
            field: field.name().to_string(),
            strategy: field.strategy(),
        });
    }

    let level = best_level_within(disc.radius_km(), field.min_level(), field.max_level())?;
    let rectangles = disc.bounding_rectangles()?;
    let cells = enumerate_all(&rectangles, level)?;

    log::debug!(
        "Planned spatial query on {}: level {}, {} rectangle(s), {} candidate cell(s)",
        field.name(),
        level,
        rectangles.len(),
        cells.len()
    );

    let center = *disc.center();
    Ok(SpatialQuery {
        disc: *disc,
        field: field.name().to_string(),
        coarse: CoarsePredicate::new(field.cell_key(level), level, cells),
        exact: ExactFilter::new(
            center,
            disc.radius_km(),
            field.latitude_key(),
            field.longitude_key(),
        ),
        distance: DistanceFn::new(center, field.latitude_key(), field.longitude_key()),
        rectangles,
    })
}

/// Plans queries against a set of configured coordinate fields.
///
/// The default field is always present, configured from the planner's
/// [`Config`].
#[derive(Debug, Clone)]
pub struct SpatialQueryPlanner {
    config: Config,
    fields: FxHashMap<String, CoordinateField>,
}

impl SpatialQueryPlanner {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let mut fields = FxHashMap::default();
        fields.insert(
            DEFAULT_FIELD_NAME.to_string(),
            CoordinateField::from_config(DEFAULT_FIELD_NAME, &config),
        );
        Ok(Self { config, fields })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a coordinate field, replacing any field of the same name.
    pub fn add_field(&mut self, field: CoordinateField) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn with_field(mut self, field: CoordinateField) -> Self {
        self.add_field(field);
        self
    }

    pub fn field(&self, name: &str) -> Result<&CoordinateField> {
        self.fields
            .get(name)
            .ok_or_else(|| SpatialError::UnknownField(name.to_string()))
    }

    /// Plan a query on the named field.
    pub fn plan(&self, disc: &SearchDisc, field: &str) -> Result<SpatialQuery> {
        plan_query(disc, self.field(field)?)
    }

    /// Plan from raw query parameters.
    ///
    /// The radius is read in `unit`, or in the configured default unit when
    /// none is given; the default field is used when none is named.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatio_grid::query::SpatialQueryPlanner;
    /// use spatio_grid::Config;
    ///
    /// let planner = SpatialQueryPlanner::new(Config::default())?;
    /// let query = planner.plan_within(24.0, 32.0, 51.0, None, None)?;
    /// assert_eq!(query.field(), "_default_coordinates");
    ///
    /// assert!(planner.plan_within(24.0, 32.0, 0.0, None, None).is_err());
    /// assert!(planner.plan_within(24.0, 32.0, 5.0, None, Some("nope")).is_err());
    /// # Ok::<(), spatio_grid::SpatialError>(())
    /// ```
    pub fn plan_within(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
        unit: Option<DistanceUnit>,
        field: Option<&str>,
    ) -> Result<SpatialQuery> {
        let center = validate_geographic_point(latitude, longitude)?;
        let disc = SearchDisc::new(center, radius, unit.unwrap_or(self.config.default_unit))?;
        self.plan(&disc, field.unwrap_or(DEFAULT_FIELD_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::cell_width;
    use crate::compute::distance::angular_distance;

    #[test]
    fn test_range_field_rejected() {
        let disc = SearchDisc::from_degrees(0.0, 0.0, 10.0).unwrap();
        let field = CoordinateField::new("r").with_strategy(IndexingStrategy::Range);
        let err = plan_query(&disc, &field).unwrap_err();
        assert!(matches!(err, SpatialError::UnsupportedStrategy { .. }));
    }

    #[test]
    fn test_level_clamped_to_field_range() {
        let disc = SearchDisc::from_degrees(0.0, 0.0, 5_000.0).unwrap();
        let field = CoordinateField::new("f").with_levels(3, 10).unwrap();
        assert_eq!(plan_query(&disc, &field).unwrap().level(), 3);

        let tiny = SearchDisc::from_degrees(0.0, 0.0, 0.01).unwrap();
        assert_eq!(plan_query(&tiny, &field).unwrap().level(), 10);
    }

    #[test]
    fn test_cells_exceed_disc_extent() {
        let disc = SearchDisc::from_degrees(24.0, 32.0, 51.0).unwrap();
        let query = plan_query(&disc, &CoordinateField::new("f")).unwrap();
        let (width, height) = cell_width(query.level());
        let extent = 2.0 * angular_distance(51.0);
        assert!(width > extent && height > extent);
        assert_eq!(query.coarse().field_key(), format!("f_HSSI_{}", query.level()));
    }

    #[test]
    fn test_antimeridian_query_has_two_rectangles() {
        let disc = SearchDisc::from_degrees(10.0, -179.8, 80.0).unwrap();
        let query = plan_query(&disc, &CoordinateField::new("f")).unwrap();
        assert_eq!(query.rectangles().len(), 2);
    }

    #[test]
    fn test_planner_fields() {
        let config = Config::default().with_max_level(12);
        let planner = SpatialQueryPlanner::new(config)
            .unwrap()
            .with_field(CoordinateField::new("home").with_levels(0, 8).unwrap());

        assert_eq!(planner.field(DEFAULT_FIELD_NAME).unwrap().max_level(), 12);
        assert_eq!(planner.field("home").unwrap().max_level(), 8);
        assert!(matches!(
            planner.field("work").unwrap_err(),
            SpatialError::UnknownField(_)
        ));
    }

    #[test]
    fn test_planner_rejects_invalid_config() {
        assert!(SpatialQueryPlanner::new(Config::default().with_max_level(31)).is_err());
    }

    #[test]
    fn test_default_unit_applied() {
        let config = Config::default().with_default_unit(DistanceUnit::Miles);
        let planner = SpatialQueryPlanner::new(config).unwrap();
        let query = planner.plan_within(0.0, 0.0, 10.0, None, None).unwrap();
        assert!((query.disc().radius_km() - 16.09344).abs() < 1e-9);

        let km = planner
            .plan_within(0.0, 0.0, 10.0, Some(DistanceUnit::Kilometers), None)
            .unwrap();
        assert_eq!(km.disc().radius_km(), 10.0);
    }
}
