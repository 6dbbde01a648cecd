use serde::{Deserialize, Serialize};

/// SVG shown wherever a tour or destination has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;charset=utf-8,%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'%20viewBox%3D'0%200%20120%2090'%3E%3Crect%20width%3D'120'%20height%3D'90'%20fill%3D'%23f3f4f6'%2F%3E%3Cg%20fill%3D'none'%20stroke%3D'%23cbd5e1'%20stroke-width%3D'3'%3E%3Crect%20x%3D'10'%20y%3D'10'%20width%3D'100'%20height%3D'70'%20rx%3D'6'%2F%3E%3Ccircle%20cx%3D'46'%20cy%3D'44'%20r%3D'10'%20fill%3D'%23e5e7eb'%2F%3E%3Cpath%20d%3D'M22%2076l26-28%2014%2014%2016-18%2020%2032z'%20fill%3D'%23e5e7eb'%2F%3E%3C%2Fg%3E%3C%2Fsvg%3E";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Template for a middle day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// A tour after schema normalization. Every optional part of the raw record has
/// already been filled in, so consumers never branch on missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub country: String,
    pub image: Option<String>,
    pub duration_days: u32,
    /// Base currency (USD).
    pub price_from: f64,
    /// Always within [0, 5].
    pub rating: f64,
    pub reviews_count: u32,
    pub summary: String,
    pub tags: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    pub gallery: Vec<String>,
}

impl Tour {
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn shares_tag_with(&self, other: &Tour) -> bool {
        self.tags.iter().any(|t| other.has_tag(t))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    /// Preformatted display price, e.g. "From $499".
    pub price: String,
    pub country: String,
    pub country_code: String,
}

impl Destination {
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}
