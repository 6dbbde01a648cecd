//! Raw catalog records as they are authored in JSON, and their normalization into
//! the strict [`Tour`] / [`Destination`] schema.

use crate::itinerary::build_itinerary;
use crate::model::{Destination, Highlight, ItineraryDay, Tour, PLACEHOLDER_IMAGE};
use crate::text::is_url_safe_slug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid record `{slug}`: {reason}")]
    InvalidRecord { slug: String, reason: String },

    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("duplicate destination id: {0}")]
    DuplicateDestination(u32),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    fn invalid(slug: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidRecord { slug: slug.to_string(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTour {
    #[serde(default)]
    pub id: Option<RawId>,
    pub slug: String,
    pub title: String,
    pub country: String,
    #[serde(default)]
    pub image: Option<String>,
    pub duration_days: i64,
    pub price_from: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    /// Templates used to generate the middle days when `itinerary` is absent.
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDestination {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: String,
    pub country: String,
    #[serde(default)]
    pub country_code: String,
}

pub fn default_included() -> Vec<String> {
    [
        "Accommodation (3★ or similar)",
        "Daily breakfast",
        "Selected guided tours & entrance fees",
        "Airport transfers (arrival & departure)",
        "Local support 24/7",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_excluded() -> Vec<String> {
    ["International flights", "Travel insurance", "Lunch & dinner unless stated", "Personal expenses & tips"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn dedup_keep_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

fn normalize_tour(raw: RawTour) -> Result<Tour, CatalogError> {
    let slug = raw.slug.trim().to_string();
    if !is_url_safe_slug(&slug) {
        return Err(CatalogError::invalid(&slug, "slug must be non-empty and URL-safe"));
    }
    if raw.duration_days < 1 || raw.duration_days > u32::MAX as i64 {
        return Err(CatalogError::invalid(&slug, format!("durationDays must be >= 1, got {}", raw.duration_days)));
    }
    if !raw.price_from.is_finite() || raw.price_from < 0.0 {
        return Err(CatalogError::invalid(&slug, format!("priceFrom must be non-negative, got {}", raw.price_from)));
    }
    if let Some(tag) = raw.tags.iter().find(|t| t.contains(',')) {
        return Err(CatalogError::invalid(&slug, format!("tag {tag:?} must not contain a comma")));
    }
    let duration_days = raw.duration_days as u32;

    let rating = if raw.rating.is_finite() { raw.rating.clamp(0.0, 5.0) } else { 0.0 };
    if rating != raw.rating {
        tracing::warn!(%slug, raw = raw.rating, clamped = rating, "rating out of range");
    }

    let id = match raw.id {
        Some(RawId::Number(n)) => n.to_string(),
        Some(RawId::Text(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => slug.clone(),
    };

    let itinerary = if raw.itinerary.is_empty() {
        build_itinerary(duration_days, &raw.highlights)
    } else {
        if raw.itinerary.len() != duration_days as usize {
            tracing::debug!(%slug, days = raw.itinerary.len(), duration_days, "explicit itinerary length differs from duration");
        }
        raw.itinerary
    };

    let image = non_empty(raw.image);
    let gallery = if !raw.gallery.is_empty() {
        raw.gallery
            .into_iter()
            .map(|g| non_empty(Some(g)).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()))
            .collect()
    } else {
        vec![image.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())]
    };

    Ok(Tour {
        id,
        slug,
        title: raw.title.trim().to_string(),
        country: raw.country.trim().to_string(),
        image,
        duration_days,
        price_from: raw.price_from,
        rating,
        reviews_count: raw.reviews_count,
        summary: raw.summary,
        tags: dedup_keep_order(raw.tags),
        itinerary,
        included: if raw.included.is_empty() { default_included() } else { raw.included },
        excluded: if raw.excluded.is_empty() { default_excluded() } else { raw.excluded },
        gallery,
    })
}

/// Normalize raw tours in catalog order. Fails on the first malformed record or
/// repeated slug.
pub fn normalize_tours(raw: Vec<RawTour>) -> Result<Vec<Tour>, CatalogError> {
    let mut seen = HashSet::new();
    let mut tours = Vec::with_capacity(raw.len());
    for r in raw {
        let tour = normalize_tour(r)?;
        if !seen.insert(tour.slug.clone()) {
            return Err(CatalogError::DuplicateSlug(tour.slug));
        }
        tours.push(tour);
    }
    Ok(tours)
}

pub fn normalize_destinations(raw: Vec<RawDestination>) -> Result<Vec<Destination>, CatalogError> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|r| {
            if !seen.insert(r.id) {
                return Err(CatalogError::DuplicateDestination(r.id));
            }
            Ok(Destination {
                id: r.id,
                name: r.name,
                description: r.description,
                image: non_empty(r.image),
                price: r.price,
                country: r.country,
                country_code: r.country_code,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(slug: &str) -> RawTour {
        serde_json::from_value(serde_json::json!({
            "slug": slug,
            "title": "Sample",
            "country": "Japan",
            "durationDays": 4,
            "priceFrom": 500,
        }))
        .unwrap()
    }

    #[test]
    fn fills_missing_parts() {
        let tour = normalize_tour(raw("sample-4d")).unwrap();
        assert_eq!(tour.id, "sample-4d");
        assert_eq!(tour.itinerary.len(), 4);
        assert_eq!(tour.included, default_included());
        assert_eq!(tour.gallery, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert_eq!(tour.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn numeric_ids_become_strings() {
        let mut r = raw("n");
        r.id = Some(RawId::Number(42));
        assert_eq!(normalize_tour(r).unwrap().id, "42");
    }

    #[test]
    fn clamps_rating() {
        let mut r = raw("loud");
        r.rating = 7.5;
        assert_eq!(normalize_tour(r).unwrap().rating, 5.0);
    }

    #[test]
    fn rejects_zero_duration_and_negative_price() {
        let mut r = raw("zero");
        r.duration_days = 0;
        assert!(matches!(normalize_tour(r), Err(CatalogError::InvalidRecord { .. })));
        let mut r = raw("cheap");
        r.price_from = -1.0;
        assert!(matches!(normalize_tour(r), Err(CatalogError::InvalidRecord { .. })));
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = normalize_tours(vec![raw("a"), raw("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(s) if s == "a"));
    }

    #[test]
    fn dedups_tags_in_display_order() {
        let mut r = raw("t");
        r.tags = vec!["Food".into(), "Culture".into(), "Food".into(), " ".into()];
        assert_eq!(normalize_tour(r).unwrap().tags, vec!["Food", "Culture"]);
    }

    #[test]
    fn rejects_tags_containing_commas() {
        let mut r = raw("wine");
        r.tags = vec!["Food, Wine".into()];
        let err = normalize_tour(r).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { slug, .. } if slug == "wine"));
    }
}
