//! Facility Finder Demo
//!
//! Loads a set of New York hospitals, deletes one, then runs range, prefix,
//! city and "best nearby" queries before printing the query log.
//!
//! Run with `RUST_LOG=debug cargo run --example facility_demo` to see the
//! index splitting and condensing as records come and go.

use geofacility::{CatalogBuilder, Facility, Point};
use std::error::Error;
use std::sync::Arc;

const SAMPLE_DATA: &str = include_str!("facilities.json");

fn print_list(facilities: &[Arc<Facility>]) {
    if facilities.is_empty() {
        println!("   (none)");
    }
    for f in facilities {
        println!("   {} - {} stars", f.name, f.rating);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Facility Finder ===\n");

    let mut catalog = CatalogBuilder::new().build()?;
    let loaded = catalog.load_json(SAMPLE_DATA)?;
    println!("Loaded {} facilities", loaded);

    let stats = catalog.index().stats();
    println!(
        "Index: {} nodes, {} leaves, height {}\n",
        stats.nodes, stats.leaves, stats.height
    );

    match catalog.delete_by_name("Metro") {
        Some(removed) => println!("Facility '{}' has been deleted.\n", removed.name),
        None => println!("No facility named 'Metro'.\n"),
    }

    let user_location = Point::new(-73.935242, 40.730610);

    for range_km in [1.0, 2.0, 5.0] {
        println!("Nearest facilities within {} km:", range_km);
        print_list(&catalog.find_within_range(&user_location, range_km)?);
        println!();
    }

    println!("Three nearest facilities:");
    print_list(&catalog.find_nearest(&user_location, 3)?);
    println!();

    println!("Facilities whose name starts with 'City':");
    for f in catalog.find_by_name("City") {
        println!("   {}, {}", f.name, f.address);
    }
    println!();

    println!("Facilities in New York (best rated first):");
    print_list(&catalog.find_by_city("New York"));
    println!();

    println!("Best facilities within 1 km:");
    let best = catalog.best_within_range(&user_location, 1.0)?;
    if best.is_empty() {
        println!("   No facilities found in the specified range.");
    }
    for f in &best {
        println!("   {}, rating {}, {}", f.name, f.rating, f.address);
    }
    println!();

    if let Some(first) = best.first() {
        println!("Details:\n{}\n", first);
    }

    println!("Query history (most recent first):");
    for line in catalog.history() {
        println!("   {}", line);
    }

    catalog.index().check_invariants()?;
    Ok(())
}
