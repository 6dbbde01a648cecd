use anyhow::Result;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog::contact::{validate_contact, validate_subscription, ContactForm, ContactOutcome, FieldError};
use catalog::jsonld::tour_json_ld;
use catalog::persist::open_catalog;
use catalog::text::highlight_term;
use catalog::{Catalog, CatalogQuery, SortOption};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod views;

pub use config::ServerConfig;
use views::{
    DestinationView, DestinationsResponse, ErrorBody, FacetsResponse, HomeResponse, ListingResponse, TourCard,
    TourDetail,
};

const HOME_CATEGORY_COUNT: usize = 6;
const HOME_DEFAULT_LIMIT: usize = 8;
const HOME_MAX_LIMIT: usize = 24;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<ServerConfig>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Catalog is loaded once and never changes afterwards
    let catalog = open_catalog(config.catalog_dir.as_deref())?;

    let cors = match &config.cors_allow_origin {
        Some(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let state = AppState { catalog: Arc::new(catalog), config: Arc::new(config) };
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tours", get(list_tours))
        .route("/tours/:slug", get(tour_detail))
        .route("/facets", get(facets))
        .route("/destinations", get(list_destinations))
        .route("/home", get(home))
        .route("/contact", post(contact))
        .route("/subscribe", post(subscribe))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn list_tours(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<ListingResponse> {
    // Parsed by hand: malformed parameters fall back to defaults instead of rejecting
    let query = CatalogQuery::from_query_string(raw.as_deref().unwrap_or(""));
    let currency = state.config.currency;
    let result = state.catalog.query(&query, currency);

    let results = result
        .items
        .iter()
        .map(|t| {
            let mut card = TourCard::new(t, currency);
            if !query.term.trim().is_empty() {
                card.title_highlighted = Some(highlight_term(&t.title, &query.term));
            }
            card
        })
        .collect();

    let rendered = CatalogQuery { page: result.page, ..query };
    tracing::debug!(total = result.total, page = result.page, "listing query");
    Json(ListingResponse {
        query: rendered.to_query_string(),
        total: result.total,
        page: result.page,
        page_count: result.page_count,
        page_size: result.page_size,
        currency: currency.code(),
        results,
    })
}

pub async fn tour_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TourDetail>, (StatusCode, Json<ErrorBody>)> {
    let Some(tour) = state.catalog.lookup_by_slug(&slug) else {
        tracing::debug!(%slug, "tour not found");
        return Err((StatusCode::NOT_FOUND, Json(ErrorBody { error: "not found".into() })));
    };
    let cfg = &state.config;
    let related = state.catalog.related(tour).into_iter().map(|t| TourCard::new(t, cfg.currency)).collect();
    Ok(Json(TourDetail {
        card: TourCard::new(tour, cfg.currency),
        itinerary: tour.itinerary.clone(),
        included: tour.included.clone(),
        excluded: tour.excluded.clone(),
        gallery: tour.gallery.clone(),
        related,
        json_ld: tour_json_ld(tour, cfg.currency, &cfg.site_url, &cfg.brand),
    }))
}

pub async fn facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    Json(FacetsResponse { countries: state.catalog.countries(), tags: state.catalog.tags() })
}

#[derive(Deserialize)]
pub struct DestinationParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub country: Option<String>,
}

pub async fn list_destinations(
    State(state): State<AppState>,
    Query(params): Query<DestinationParams>,
) -> Json<DestinationsResponse> {
    let results = state
        .catalog
        .search_destinations(&params.q, params.country.as_deref())
        .into_iter()
        .map(DestinationView::from)
        .collect();
    Json(DestinationsResponse { countries: state.catalog.destination_countries(), results })
}

#[derive(Deserialize)]
pub struct HomeParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    /// Kept as text so a malformed value falls back instead of rejecting.
    #[serde(default)]
    pub limit: Option<String>,
}

pub async fn home(State(state): State<AppState>, Query(params): Query<HomeParams>) -> Json<HomeResponse> {
    let sort = params.sort.as_deref().map(SortOption::parse).unwrap_or_default();
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(HOME_DEFAULT_LIMIT)
        .min(HOME_MAX_LIMIT);
    let category = params.cat.as_deref().unwrap_or("All");
    let featured = state.catalog.featured(&params.q, category, sort, limit);
    let currency = state.config.currency;
    Json(HomeResponse {
        categories: state.catalog.home_categories(HOME_CATEGORY_COUNT),
        total: featured.total,
        tours: featured.items.into_iter().map(|t| TourCard::new(t, currency)).collect(),
        destinations: state.catalog.destinations().iter().map(DestinationView::from).collect(),
    })
}

fn unprocessable(errors: Vec<FieldError>) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(serde_json::json!({ "errors": errors })))
}

pub async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<serde_json::Value>) {
    match validate_contact(&form) {
        Ok(outcome) => {
            // Delivery is simulated; there is no mail backend
            tokio::time::sleep(state.config.contact_delay).await;
            match outcome {
                ContactOutcome::Accepted(msg) => tracing::info!(topic = %msg.topic, "contact message accepted"),
                ContactOutcome::Discarded => tracing::debug!("contact honeypot filled, discarding"),
            }
            (StatusCode::ACCEPTED, Json(serde_json::json!({ "status": "accepted" })))
        }
        Err(errs) => unprocessable(errs.0),
    }
}

#[derive(Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn subscribe(Json(req): Json<SubscribeRequest>) -> (StatusCode, Json<serde_json::Value>) {
    match validate_subscription(&req.email) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "message": "Thanks! Check your inbox to confirm." })),
        ),
        Err(err) => unprocessable(vec![err]),
    }
}
