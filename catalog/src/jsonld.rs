use crate::currency::DisplayCurrency;
use crate::model::Tour;
use serde_json::{json, Value};

/// schema.org `Product` markup for a tour detail page.
pub fn tour_json_ld(tour: &Tour, currency: DisplayCurrency, site_url: &str, brand: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": tour.title,
        "description": tour.summary,
        "image": [tour.image_or_placeholder()],
        "brand": { "@type": "Brand", "name": brand },
        "offers": {
            "@type": "Offer",
            "url": format!("{}/tours/{}", site_url.trim_end_matches('/'), tour.slug),
            "priceCurrency": currency.code(),
            "price": currency.convert(tour.price_from).round() as u64,
            "availability": "https://schema.org/InStock",
        },
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": tour.rating,
            "reviewCount": tour.reviews_count,
        },
    })
}
