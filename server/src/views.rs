//! JSON shapes returned by the HTTP handlers.

use catalog::{Destination, DisplayCurrency, ItineraryDay, Tour};
use serde::Serialize;

#[derive(Serialize)]
pub struct TourCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_highlighted: Option<String>,
    pub country: String,
    pub image: String,
    pub duration_days: u32,
    pub price_from: f64,
    pub price_display: String,
    pub rating: f64,
    pub rating_display: String,
    pub reviews_count: u32,
    pub summary: String,
    pub tags: Vec<String>,
}

impl TourCard {
    pub fn new(tour: &Tour, currency: DisplayCurrency) -> Self {
        Self {
            id: tour.id.clone(),
            slug: tour.slug.clone(),
            title: tour.title.clone(),
            title_highlighted: None,
            country: tour.country.clone(),
            image: tour.image_or_placeholder().to_string(),
            duration_days: tour.duration_days,
            price_from: tour.price_from,
            price_display: currency.format(tour.price_from),
            rating: tour.rating,
            rating_display: format!("{:.1}", tour.rating),
            reviews_count: tour.reviews_count,
            summary: tour.summary.clone(),
            tags: tour.tags.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ListingResponse {
    /// Canonical query string for the state actually rendered.
    pub query: String,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub currency: &'static str,
    pub results: Vec<TourCard>,
}

#[derive(Serialize)]
pub struct TourDetail {
    #[serde(flatten)]
    pub card: TourCard,
    pub itinerary: Vec<ItineraryDay>,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    pub gallery: Vec<String>,
    pub related: Vec<TourCard>,
    pub json_ld: serde_json::Value,
}

#[derive(Serialize)]
pub struct FacetsResponse {
    pub countries: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct DestinationView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub country: String,
    pub country_code: String,
}

impl From<&Destination> for DestinationView {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            description: d.description.clone(),
            image: d.image_or_placeholder().to_string(),
            price: d.price.clone(),
            country: d.country.clone(),
            country_code: d.country_code.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct DestinationsResponse {
    pub countries: Vec<String>,
    pub results: Vec<DestinationView>,
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub categories: Vec<String>,
    pub total: usize,
    pub tours: Vec<TourCard>,
    pub destinations: Vec<DestinationView>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}
