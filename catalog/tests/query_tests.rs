use catalog::query::{filter, paginate, sort, CatalogQuery, SortOption};
use catalog::{Catalog, DisplayCurrency, RawTour, Tour};
use serde_json::json;

fn raw(slug: &str, country: &str, days: u32, price: f64, rating: f64, tags: &[&str]) -> RawTour {
    serde_json::from_value(json!({
        "id": slug,
        "slug": slug,
        "title": format!("{slug} tour"),
        "country": country,
        "durationDays": days,
        "priceFrom": price,
        "rating": rating,
        "summary": "A short summary.",
        "tags": tags,
    }))
    .unwrap()
}

fn two_tour_catalog() -> Catalog {
    Catalog::from_raw(
        vec![
            raw("alps-hiking-8d", "Switzerland", 8, 1290.0, 4.9, &["Adventure", "Hiking"]),
            raw("tokyo-essentials-6d", "Japan", 6, 899.0, 4.8, &["City Tour", "Culture"]),
        ],
        vec![],
    )
    .unwrap()
}

fn sixteen_matches() -> Catalog {
    let mut tours: Vec<RawTour> = (0..16).map(|i| raw(&format!("beach-{i}"), "Indonesia", 4, 300.0 + i as f64, 4.5, &["Beach"])).collect();
    tours.push(raw("city-break", "Japan", 3, 500.0, 4.0, &["City Tour"]));
    Catalog::from_raw(tours, vec![]).unwrap()
}

fn slugs(items: &[&Tour]) -> Vec<String> {
    items.iter().map(|t| t.slug.clone()).collect()
}

#[test]
fn country_facet_is_exact() {
    let catalog = two_tour_catalog();
    let q = CatalogQuery { country: "Japan".into(), ..Default::default() };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert_eq!(slugs(&hits), vec!["tokyo-essentials-6d"]);

    let q = CatalogQuery { country: "japan".into(), ..Default::default() };
    assert!(filter(catalog.tours(), &q, DisplayCurrency::Usd).is_empty());
}

#[test]
fn price_ascending_puts_cheaper_first() {
    let catalog = two_tour_catalog();
    let sorted = sort(catalog.tours().iter().collect(), SortOption::PriceAsc);
    assert_eq!(slugs(&sorted), vec!["tokyo-essentials-6d", "alps-hiking-8d"]);
}

#[test]
fn tag_facet_is_conjunctive() {
    let catalog = Catalog::from_raw(vec![raw("ab", "Peru", 5, 100.0, 4.0, &["A", "B"])], vec![]).unwrap();
    let mut q = CatalogQuery::default();
    q.set_tags(["A", "B"]);
    assert_eq!(filter(catalog.tours(), &q, DisplayCurrency::Usd).len(), 1);
    q.toggle_tag("C");
    assert!(filter(catalog.tours(), &q, DisplayCurrency::Usd).is_empty());
}

#[test]
fn every_hit_satisfies_every_facet() {
    let catalog = Catalog::builtin().unwrap();
    let q = CatalogQuery {
        term: " scenic ".into(),
        tags: vec!["Adventure".into()],
        min_days: 7,
        max_days: 9,
        max_price: 2000,
        ..Default::default()
    };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert!(!hits.is_empty());
    assert!(hits.len() <= catalog.tours().len());
    for t in &hits {
        let text = format!("{} {} {} {}", t.title, t.country, t.summary, t.tags.join(" ")).to_lowercase();
        assert!(text.contains("scenic"));
        assert!(t.has_tag("Adventure"));
        assert!((7..=9).contains(&t.duration_days));
        assert!(t.price_from <= 2000.0);
    }
}

#[test]
fn text_search_covers_tags_and_ignores_case() {
    let catalog = Catalog::builtin().unwrap();
    let q = CatalogQuery { term: "BUCKET list".into(), ..Default::default() };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert_eq!(slugs(&hits), vec!["patagonia-trek-9d", "peru-cusco-machu-7d"]);
}

#[test]
fn price_bounds_use_display_currency() {
    let catalog = two_tour_catalog();
    let q = CatalogQuery { max_price: 15_000_000, ..Default::default() };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Idr);
    assert_eq!(slugs(&hits), vec!["tokyo-essentials-6d"]);
    // Same bound read as dollars keeps both.
    assert_eq!(filter(catalog.tours(), &q, DisplayCurrency::Usd).len(), 2);
}

#[test]
fn relevance_sort_is_identity() {
    let catalog = Catalog::builtin().unwrap();
    let q = CatalogQuery { term: "culture".into(), ..Default::default() };
    let filtered = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert_eq!(sort(filtered.clone(), SortOption::Relevance), filtered);
}

#[test]
fn sorts_are_stable() {
    let catalog = Catalog::builtin().unwrap();
    let by_duration = sort(catalog.tours().iter().collect(), SortOption::DurationAsc);
    let fours: Vec<String> = by_duration.iter().filter(|t| t.duration_days == 4).map(|t| t.slug.clone()).collect();
    assert_eq!(fours, vec!["bali-nature-retreat-4d", "bangkok-streetfood-4d", "dubai-desert-luxe-4d"]);

    let by_rating = sort(catalog.tours().iter().collect(), SortOption::RatingDesc);
    assert!(by_rating.windows(2).all(|w| w[0].rating >= w[1].rating));
    assert_eq!(by_rating[0].slug, "alps-hiking-8d");
}

#[test]
fn out_of_range_page_clamps_to_last() {
    let catalog = sixteen_matches();
    let mut q = CatalogQuery::default();
    q.set_tags(["Beach"]);
    q.set_page(5);
    let result = catalog.query(&q, DisplayCurrency::Usd);
    assert_eq!(result.total, 16);
    assert_eq!(result.page_count, 2);
    assert_eq!(result.page, 2);
    assert_eq!(result.items.len(), 4);
    assert_eq!(result.items[0].slug, "beach-12");
}

#[test]
fn empty_result_is_a_valid_page() {
    let catalog = Catalog::builtin().unwrap();
    let q = CatalogQuery { term: "moon base".into(), page: 3, ..Default::default() };
    let result = catalog.query(&q, DisplayCurrency::Usd);
    assert!(result.is_empty());
    assert_eq!((result.page, result.page_count), (1, 1));
}

#[test]
fn effective_page_stays_in_range() {
    let items: Vec<u32> = (0..25).collect();
    for size in 1..=30 {
        for requested in 0..=30 {
            let page = paginate(&items, size, requested);
            assert!(page.page >= 1 && page.page <= page.page_count);
            assert!(!page.items.is_empty());
        }
    }
}

#[test]
fn query_string_round_trips() {
    let mut q = CatalogQuery::default();
    q.set_term("rice & temples");
    q.set_country("Indonesia");
    q.set_tags(["Beach", "Short Escape"]);
    q.set_duration(3, 7);
    q.set_price(100, 900);
    q.set_sort(SortOption::PriceDesc);
    q.set_page_size(24);
    q.set_page(2);

    let qs = q.to_query_string();
    assert_eq!(
        qs,
        "q=rice+%26+temples&country=Indonesia&tags=Beach%2CShort+Escape&minDays=3&maxDays=7&minPrice=100&maxPrice=900&sort=priceDesc&pageSize=24&page=2"
    );
    assert_eq!(CatalogQuery::from_query_string(&qs), q.normalize());
}

#[test]
fn round_trip_normalizes_defaults() {
    let q = CatalogQuery {
        country: String::new(),
        tags: vec![" Food ".into(), "Food".into()],
        page_size: 0,
        page: 0,
        ..Default::default()
    };
    let back = CatalogQuery::from_query_string(&q.to_query_string());
    assert_eq!(back, q.normalize());
    assert_eq!(back.tags, vec!["Food"]);
}

#[test]
fn unknown_sort_falls_back_to_relevance() {
    assert_eq!(CatalogQuery::from_query_string("sort=cheapest").sort, SortOption::Relevance);
    assert_eq!(CatalogQuery::from_query_string("sort=popular").sort, SortOption::Relevance);
    assert_eq!(CatalogQuery::from_query_string("sort=ratingDesc").sort, SortOption::RatingDesc);
}

#[test]
fn filtering_does_not_touch_the_catalog() {
    let catalog = Catalog::builtin().unwrap();
    let before: Vec<String> = catalog.tours().iter().map(|t| t.slug.clone()).collect();
    let q = CatalogQuery { sort: SortOption::PriceDesc, ..Default::default() };
    let _ = catalog.query(&q, DisplayCurrency::Usd);
    let after: Vec<String> = catalog.tours().iter().map(|t| t.slug.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn duration_and_price_bounds_are_inclusive() {
    let catalog = two_tour_catalog();
    let q = CatalogQuery { min_days: 6, max_days: 6, min_price: 899, max_price: 899, ..Default::default() };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert_eq!(slugs(&hits), vec!["tokyo-essentials-6d"]);

    let q = CatalogQuery { min_days: 6, max_days: 6, min_price: 14_384_000, max_price: 14_384_000, ..Default::default() };
    let hits = filter(catalog.tours(), &q, DisplayCurrency::Idr);
    assert_eq!(slugs(&hits), vec!["tokyo-essentials-6d"]);

    let q = CatalogQuery { min_days: 8, max_days: 8, ..Default::default() };
    assert_eq!(slugs(&filter(catalog.tours(), &q, DisplayCurrency::Usd)), vec!["alps-hiking-8d"]);
}

#[test]
fn untidy_query_filters_like_its_normal_form() {
    let catalog = two_tour_catalog();
    let q = CatalogQuery { term: "  ".into(), tags: vec![" City Tour ".into()], ..Default::default() };
    let raw_hits = filter(catalog.tours(), &q, DisplayCurrency::Usd);
    assert_eq!(raw_hits, filter(catalog.tours(), &q.normalize(), DisplayCurrency::Usd));
    assert_eq!(slugs(&raw_hits), vec!["tokyo-essentials-6d"]);
}
