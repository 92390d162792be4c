use geofacility::{
    CatalogBuilder, Config, Facility, FacilityCatalog, FacilityError, Point, SpatialIndex,
    distance_km,
};
use std::io::Write;
use std::sync::Arc;

const SAMPLE_DATA: &str = include_str!("../demos/facilities.json");

fn user_location() -> Point {
    Point::new(-73.935242, 40.730610)
}

fn sample_catalog() -> FacilityCatalog {
    let mut catalog = FacilityCatalog::new();
    assert_eq!(catalog.load_json(SAMPLE_DATA).unwrap(), 16);
    catalog
}

fn names(list: &[Arc<Facility>]) -> Vec<&str> {
    list.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_sample_workflow() {
    let mut catalog = sample_catalog();
    catalog.index().check_invariants().unwrap();

    let metro = catalog.delete_by_name("Metro").unwrap();
    assert_eq!(catalog.len(), 15);
    assert!(!catalog.index().contains(&metro));

    let within_1 = catalog.find_within_range(&user_location(), 1.0).unwrap();
    let mut got = names(&within_1);
    got.sort();
    assert_eq!(
        got,
        [
            "City Hospital",
            "City Hospital",
            "St. Peter's Hospital",
            "Sunshine Medical Clinic"
        ]
    );

    let within_2 = catalog.find_within_range(&user_location(), 2.0).unwrap();
    assert_eq!(within_2.len(), 6);
    assert_eq!(within_2[4].name, "Community Health Center");
    assert_eq!(within_2[5].name, "Harbor Medical Center");

    let within_5 = catalog.find_within_range(&user_location(), 5.0).unwrap();
    assert_eq!(within_5.len(), 10);
    assert_eq!(within_5[9].name, "Northside Hospital");

    let city = catalog.find_by_name("City");
    assert_eq!(names(&city), ["City Hospital", "City Hospital"]);

    let ny = catalog.find_by_city("New York");
    assert_eq!(ny.len(), 15);
    assert_eq!(ny[0].rating, 4.8);

    let best = catalog.best_within_range(&user_location(), 1.0).unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].name, "City Hospital");
    assert_eq!(best[0].rating, 4.8);

    let history = catalog.history();
    assert_eq!(history.len(), 7);
    assert!(history[0].starts_with("Best facility within 1 km"));
    assert_eq!(history[6], "Deleted facility: Metro");
}

#[test]
fn test_results_sorted_by_distance() {
    let mut catalog = sample_catalog();
    let here = user_location();
    let all = catalog.find_within_range(&here, 10.0).unwrap();
    assert_eq!(all.len(), 16);

    let distances: Vec<f64> = all
        .iter()
        .map(|f| distance_km(&here, &f.location()).unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_find_nearest_matches_brute_force() {
    let mut catalog = sample_catalog();
    let here = Point::new(-73.99, 40.735);

    let nearest = catalog.find_nearest(&here, 5).unwrap();
    assert_eq!(nearest.len(), 5);

    let mut expected: Vec<(f64, &str)> = catalog
        .facilities()
        .iter()
        .map(|f| (distance_km(&here, &f.location()).unwrap(), f.name.as_str()))
        .collect();
    expected.sort_by(|a, b| a.0.total_cmp(&b.0));
    let expected: Vec<&str> = expected.iter().take(5).map(|(_, n)| *n).collect();

    assert_eq!(names(&nearest), expected);
}

#[test]
fn test_remove_everything_then_reload() {
    let mut catalog = sample_catalog();
    let ids: Vec<_> = catalog.facilities().iter().map(|f| f.id).collect();
    for id in &ids {
        assert!(catalog.remove_facility(id).is_some());
        catalog.index().check_invariants().unwrap();
    }
    assert!(catalog.is_empty());
    assert!(catalog.index().is_empty());
    assert_eq!(catalog.index().height(), 1);
    assert!(catalog.index().bounding_box().is_none());
    assert!(catalog.find_by_name("c").is_empty());

    catalog.load_json(SAMPLE_DATA).unwrap();
    assert_eq!(catalog.len(), 16);
    catalog.index().check_invariants().unwrap();
}

#[test]
fn test_builder_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"node_capacity": 8, "min_node_fill": 3, "history_capacity": 3}}"#
    )
    .unwrap();

    let mut catalog = CatalogBuilder::new()
        .config_file(file.path())
        .build()
        .unwrap();
    catalog.load_json(SAMPLE_DATA).unwrap();
    assert_eq!(catalog.index().height(), 2);

    for prefix in ["w", "x", "y", "q"] {
        catalog.find_by_name(prefix);
    }
    assert_eq!(catalog.history().len(), 3);
    assert_eq!(catalog.last_query(), Some("Search by name 'q': 0 result(s)"));
}

#[test]
fn test_untruncated_results() {
    let config = Config::default().with_truncate_results(false);
    let mut catalog = FacilityCatalog::with_config(config).unwrap();
    catalog.load_json(SAMPLE_DATA).unwrap();

    let all = catalog.find_nearest(&user_location(), 1).unwrap();
    assert_eq!(all.len(), 16);
}

#[test]
fn test_spatial_index_standalone() {
    let mut index = SpatialIndex::new();
    let facilities: Vec<Arc<Facility>> = (0..20)
        .map(|i| {
            Arc::new(Facility::new(
                format!("f{i}"),
                "",
                40.0 + i as f64 * 0.01,
                -74.0,
                3.0,
                "",
            ))
        })
        .collect();
    for f in &facilities {
        index.insert_facility(Arc::clone(f)).unwrap();
    }

    let stats = index.stats();
    assert_eq!(stats.facilities, 20);
    assert!(stats.height > 1);
    assert!(stats.leaves < stats.nodes);

    let hits = index
        .search_nearest_with_distance(&Point::new(-74.0, 40.0), 3, None)
        .unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].0.name, "f0");
    assert!(hits[0].1.abs() < 1e-9);
    assert!(hits[1].1 < hits[2].1);

    assert!(index.delete_facility(&facilities[0]));
    assert!(!index.delete_facility(&facilities[0]));
    assert_eq!(index.len(), 19);
    index.check_invariants().unwrap();
}

#[test]
fn test_invalid_config_rejected() {
    let err = FacilityCatalog::with_config(Config::default().with_min_node_fill(5)).unwrap_err();
    assert!(matches!(err, FacilityError::InvalidConfig(_)));
}
