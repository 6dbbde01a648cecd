use catalog::persist::{load_catalog, save_catalog, CatalogPaths};
use catalog::{Catalog, RawTour, SortOption};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn lookup_by_slug_is_exact() {
    let catalog = Catalog::builtin().unwrap();
    let tour = catalog.lookup_by_slug("tokyo-essentials-6d").unwrap();
    assert_eq!(tour.country, "Japan");
    assert_eq!(tour.price_from, 899.0);
    assert!(catalog.lookup_by_slug("no-such-slug").is_none());
    assert!(catalog.lookup_by_slug("Tokyo-Essentials-6d").is_none());
}

#[test]
fn generated_itinerary_has_one_entry_per_day() {
    let raw: RawTour = serde_json::from_value(json!({
        "slug": "lisbon-4d",
        "title": "Lisbon Long Weekend",
        "country": "Portugal",
        "durationDays": 4,
        "priceFrom": 640,
    }))
    .unwrap();
    let catalog = Catalog::from_raw(vec![raw], vec![]).unwrap();
    let days = &catalog.lookup_by_slug("lisbon-4d").unwrap().itinerary;
    assert_eq!(days.len(), 4);
    assert_eq!(days[0].title, "Arrival & Orientation");
    assert_eq!(days[3].title, "Departure");
    assert_eq!(days[3].day, 4);
}

#[test]
fn highlights_drive_the_middle_days() {
    let catalog = Catalog::builtin().unwrap();
    let bali = catalog.lookup_by_slug("bali-nature-retreat-4d").unwrap();
    let titles: Vec<&str> = bali.itinerary.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Arrival & Orientation", "Ubud & Rice Terraces", "Waterfalls Day", "Departure"]);
}

#[test]
fn related_prefers_same_country_then_tags() {
    let catalog = Catalog::builtin().unwrap();
    // Only one other Japan tour, so shared tags decide.
    let tokyo = catalog.lookup_by_slug("tokyo-essentials-6d").unwrap();
    let related: Vec<&str> = catalog.related(tokyo).iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(related, vec!["kyoto-osaka-classics-5d", "seoul-jeju-escape-6d", "bangkok-streetfood-4d"]);
    assert!(!related.contains(&"tokyo-essentials-6d"));
}

#[test]
fn related_uses_country_when_three_match() {
    let mk = |slug: &str, country: &str, tags: &[&str]| -> RawTour {
        serde_json::from_value(json!({
            "slug": slug, "title": slug, "country": country,
            "durationDays": 5, "priceFrom": 100, "tags": tags,
        }))
        .unwrap()
    };
    let catalog = Catalog::from_raw(
        vec![
            mk("tagged", "Peru", &["Hiking"]),
            mk("it-1", "Italy", &["Hiking"]),
            mk("it-2", "Italy", &[]),
            mk("it-3", "Italy", &[]),
            mk("it-4", "Italy", &[]),
            mk("it-5", "Italy", &[]),
        ],
        vec![],
    )
    .unwrap();
    let it1 = catalog.lookup_by_slug("it-1").unwrap();
    let related: Vec<&str> = catalog.related(it1).iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(related, vec!["it-2", "it-3", "it-4"]);
}

#[test]
fn featured_limits_and_counts() {
    let catalog = Catalog::builtin().unwrap();
    let featured = catalog.featured("", "City Tour", SortOption::PriceAsc, 4);
    assert_eq!(featured.total, 6);
    assert_eq!(featured.items.len(), 4);
    assert_eq!(featured.items[0].slug, "bangkok-streetfood-4d");
    let all = catalog.featured("", "All", SortOption::Relevance, 8);
    assert_eq!(all.total, catalog.tours().len());
}

#[test]
fn destinations_search_name_and_description() {
    let catalog = Catalog::builtin().unwrap();
    let hits = catalog.search_destinations("TEMPLES", None);
    assert!(hits.iter().any(|d| d.name == "Bali"));
    let japan = catalog.search_destinations("", Some("Japan"));
    assert!(japan.iter().all(|d| d.country == "Japan"));
    assert!(!japan.is_empty());
    assert_eq!(catalog.search_destinations("", Some("")).len(), catalog.destinations().len());
}

#[test]
fn snapshot_round_trip() {
    let dir = tempdir().unwrap();
    let paths = CatalogPaths::new(dir.path());
    let catalog = Catalog::builtin().unwrap();
    let meta = save_catalog(&paths, &catalog, "2024-01-01T00:00:00Z".into()).unwrap();
    assert_eq!(meta.num_tours, 22);
    assert!(paths.exists());

    let loaded = load_catalog(&paths).unwrap();
    assert_eq!(loaded.tours(), catalog.tours());
    assert_eq!(loaded.destinations(), catalog.destinations());
    assert!(loaded.lookup_by_slug("kenya-safari-7d").is_some());
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_catalog(&CatalogPaths::new(dir.path().join("nothing"))).is_err());
}
