use spatio_grid::index::{DocId, MemoryIndex, SpatialDocument, index_document};
use spatio_grid::prelude::*;
use spatio_grid::{GeoRectangle, distance_km};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Index a lattice of points around `center`, spaced `step` degrees apart.
fn lattice(field: &CoordinateField, center: (f64, f64), span: f64, step: f64) -> (MemoryIndex, Vec<(DocId, GeoPoint)>) {
    let index = MemoryIndex::new();
    let mut points = Vec::new();
    let steps = (2.0 * span / step).round() as i64;
    let mut doc: DocId = 0;
    for i in 0..=steps {
        for j in 0..=steps {
            let lat = (center.0 - span + i as f64 * step).clamp(-90.0, 90.0);
            let lon = center.1 - span + j as f64 * step;
            let Ok(point) = GeoPoint::new(lat, lon) else {
                continue;
            };
            doc += 1;
            index_document(&index, doc, &SpatialDocument::new().with_field(field.clone(), point))
                .unwrap();
            points.push((doc, point));
        }
    }
    (index, points)
}

/// Search results must equal a brute-force distance scan.
fn assert_matches_brute_force(center: (f64, f64), radius_km: f64, span: f64, step: f64) {
    init_logging();
    let field = CoordinateField::new("pos");
    let (index, points) = lattice(&field, center, span, step);

    let disc = SearchDisc::from_degrees(center.0, center.1, radius_km).unwrap();
    let query = plan_query(&disc, &field).unwrap();
    let results = SpatialSearch::new(&index)
        .execute(&query, &SearchOptions::default())
        .unwrap();

    let mut expected: Vec<DocId> = points
        .iter()
        .filter(|(_, point)| distance_km(disc.center(), point) <= radius_km)
        .map(|(doc, _)| *doc)
        .collect();
    expected.sort_unstable();

    assert!(!expected.is_empty(), "lattice too sparse around {center:?}");
    assert_eq!(
        results.docs(),
        expected,
        "mismatch around {center:?} r={radius_km} (level {}, {} cells)",
        query.level(),
        query.candidate_cell_count()
    );
}

#[test]
fn test_mid_latitude_matches_brute_force() {
    assert_matches_brute_force((45.0, 7.0), 60.0, 1.0, 0.1);
    assert_matches_brute_force((-33.9, 18.4), 15.0, 0.3, 0.02);
}

#[test]
fn test_equator_matches_brute_force() {
    assert_matches_brute_force((0.0, 0.0), 120.0, 1.5, 0.1);
}

#[test]
fn test_antimeridian_matches_brute_force() {
    assert_matches_brute_force((0.0, 179.9), 50.0, 0.6, 0.05);
    assert_matches_brute_force((-16.5, -179.8), 80.0, 1.0, 0.1);
}

#[test]
fn test_north_pole_matches_brute_force() {
    assert_matches_brute_force((89.9, 0.0), 50.0, 1.0, 0.1);
    assert_matches_brute_force((89.5, 120.0), 30.0, 0.8, 0.1);
}

#[test]
fn test_south_pole_matches_brute_force() {
    assert_matches_brute_force((-89.95, 45.0), 20.0, 0.4, 0.05);
}

#[test]
fn test_points_across_the_pole() {
    init_logging();
    let field = CoordinateField::new("pos");
    let index = MemoryIndex::new();
    let places = [(1, (89.9, 179.0)), (2, (89.8, 90.0)), (3, (90.0, 0.0)), (4, (88.0, 0.0))];
    for (doc, coordinates) in places {
        index_document(&index, doc, &SpatialDocument::new().with_field(field.clone(), coordinates))
            .unwrap();
    }

    let query = plan_query(&SearchDisc::from_degrees(89.9, 0.0, 50.0).unwrap(), &field).unwrap();
    let results = SpatialSearch::new(&index)
        .execute(&query, &SearchOptions::default())
        .unwrap();
    assert_eq!(results.docs(), vec![1, 2, 3]);
}

#[test]
fn test_both_sides_of_the_antimeridian() {
    init_logging();
    let field = CoordinateField::new("pos");
    let index = MemoryIndex::new();
    let places = [(1, (0.0, -179.9)), (2, (0.0, 180.0)), (3, (0.1, -179.8)), (4, (0.0, 178.0))];
    for (doc, coordinates) in places {
        index_document(&index, doc, &SpatialDocument::new().with_field(field.clone(), coordinates))
            .unwrap();
    }

    let query = plan_query(&SearchDisc::from_degrees(0.0, 179.9, 50.0).unwrap(), &field).unwrap();
    assert_eq!(query.rectangles().len(), 2);

    let results = SpatialSearch::new(&index)
        .execute(&query, &SearchOptions::default())
        .unwrap();
    assert_eq!(results.docs(), vec![1, 2, 3]);
}

#[test]
fn test_radius_beyond_half_circumference() {
    init_logging();
    let field = CoordinateField::new("pos");
    let index = MemoryIndex::new();
    let places = [(1, (0.0, 180.0)), (2, (-90.0, 0.0)), (3, (45.0, -100.0))];
    for (doc, coordinates) in places {
        index_document(&index, doc, &SpatialDocument::new().with_field(field.clone(), coordinates))
            .unwrap();
    }

    let disc = SearchDisc::from_degrees(0.0, 0.0, 20_100.0).unwrap();
    let bounds = disc.geo_bounds().unwrap();
    assert_eq!(bounds, GeoRectangle::new(-90.0, -180.0, 90.0, 180.0));

    let query = plan_query(&disc, &field).unwrap();
    assert_eq!(query.level(), 0);
    assert_eq!(query.candidate_cell_count(), 1);

    let results = SpatialSearch::new(&index)
        .execute(&query, &SearchOptions::default())
        .unwrap();
    assert_eq!(results.docs(), vec![1, 2, 3]);
}

#[test]
fn test_level_never_deepens_with_radius() {
    let field = CoordinateField::new("pos").with_levels(0, 24).unwrap();
    let mut previous = u8::MAX;
    let mut radius = 0.001;
    while radius < 30_000.0 {
        let disc = SearchDisc::from_degrees(12.0, 34.0, radius).unwrap();
        let level = plan_query(&disc, &field).unwrap().level();
        assert!(level <= previous, "r={radius} selected {level} after {previous}");
        previous = level;
        radius *= 1.7;
    }
    assert_eq!(previous, 0);
}

#[test]
fn test_candidate_cells_stay_small() {
    let field = CoordinateField::new("pos").with_levels(0, 24).unwrap();
    for (lat, lon, radius) in [(0.0, 0.0, 1.0), (24.0, 32.0, 51.0), (-40.0, 170.0, 250.0), (60.0, 10.0, 5.0)] {
        let disc = SearchDisc::from_degrees(lat, lon, radius).unwrap();
        let query = plan_query(&disc, &field).unwrap();
        assert!(
            query.candidate_cell_count() <= 9,
            "({lat}, {lon}) r={radius}: {} cells",
            query.candidate_cell_count()
        );
    }
}

#[test]
fn test_boundary_point_on_antimeridian_found() {
    init_logging();
    let field = CoordinateField::new("pos");
    let index = MemoryIndex::new();
    let on_meridian = GeoPoint::new(0.0, 180.0).unwrap();
    index_document(&index, 1, &SpatialDocument::new().with_field(field.clone(), on_meridian))
        .unwrap();

    for step in 0..=80 {
        let lon = -179.0 - step as f64 * 0.01;
        let center = GeoPoint::new(0.0, lon).unwrap();
        let radius = distance_km(&center, &on_meridian);
        let query = plan_query(&SearchDisc::new(center, radius, DistanceUnit::Kilometers).unwrap(), &field)
            .unwrap();

        let results = SpatialSearch::new(&index)
            .execute(&query, &SearchOptions::default())
            .unwrap();
        assert_eq!(
            results.docs(),
            vec![1],
            "center lon {lon} r={radius}: {} rectangle(s)",
            query.rectangles().len()
        );
    }
}
