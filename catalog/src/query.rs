//! Listing query engine: filter, sort, paginate, and the URL query-string form of
//! a [`CatalogQuery`].

use crate::currency::DisplayCurrency;
use crate::model::Tour;
use crate::text::{contains_folded, fold_term};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use url::form_urlencoded;

pub const ALL_COUNTRIES: &str = "All";
pub const DEFAULT_MIN_DAYS: u32 = 0;
pub const DEFAULT_MAX_DAYS: u32 = 999;
pub const DEFAULT_MIN_PRICE: u64 = 0;
pub const DEFAULT_MAX_PRICE: u64 = 99_999_999;
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "priceAsc")]
    PriceAsc,
    #[serde(rename = "priceDesc")]
    PriceDesc,
    #[serde(rename = "durationAsc")]
    DurationAsc,
    #[serde(rename = "ratingDesc")]
    RatingDesc,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "priceAsc",
            SortOption::PriceDesc => "priceDesc",
            SortOption::DurationAsc => "durationAsc",
            SortOption::RatingDesc => "ratingDesc",
        }
    }

    /// Unknown values fall back to relevance. `popular` and `duration` are the
    /// homepage spellings.
    pub fn parse(s: &str) -> SortOption {
        match s.trim() {
            "priceAsc" => SortOption::PriceAsc,
            "priceDesc" => SortOption::PriceDesc,
            "durationAsc" | "duration" => SortOption::DurationAsc,
            "ratingDesc" => SortOption::RatingDesc,
            _ => SortOption::Relevance,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full state of the listing page. Passed by value into the pure query
/// functions and mirrored in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub term: String,
    pub country: String,
    /// Conjunctive: a tour must carry every selected tag.
    pub tags: Vec<String>,
    pub min_days: u32,
    pub max_days: u32,
    /// Display-currency units.
    pub min_price: u64,
    pub max_price: u64,
    pub sort: SortOption,
    pub page_size: usize,
    /// 1-based.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            country: ALL_COUNTRIES.to_string(),
            tags: Vec::new(),
            min_days: DEFAULT_MIN_DAYS,
            max_days: DEFAULT_MAX_DAYS,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortOption::Relevance,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    // Commas separate tags in the URL form, so they cannot appear inside one.
    tags.into_iter()
        .flat_map(|t| t.as_ref().split(',').map(|part| part.trim().to_string()).collect::<Vec<_>>())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn clamp_page_size(n: usize) -> usize {
    if n == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        n.min(MAX_PAGE_SIZE)
    }
}

impl CatalogQuery {
    /// Apply the same normalization the query-string parser applies.
    pub fn normalize(&self) -> CatalogQuery {
        CatalogQuery {
            term: self.term.trim().to_string(),
            country: if self.country.is_empty() { ALL_COUNTRIES.to_string() } else { self.country.clone() },
            tags: clean_tags(&self.tags),
            page_size: clamp_page_size(self.page_size),
            page: self.page.max(1),
            ..self.clone()
        }
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.page = 1;
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
        self.page = 1;
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
        self.page = 1;
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = clean_tags(tags);
        self.page = 1;
    }

    pub fn set_duration(&mut self, min_days: u32, max_days: u32) {
        self.min_days = min_days;
        self.max_days = max_days;
        self.page = 1;
    }

    pub fn set_price(&mut self, min_price: u64, max_price: u64) {
        self.min_price = min_price;
        self.max_price = max_price;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = clamp_page_size(page_size);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset(&mut self) {
        *self = CatalogQuery::default();
    }

    /// Serialize only the values that differ from the defaults, in a fixed order.
    pub fn to_query_string(&self) -> String {
        let mut sp = form_urlencoded::Serializer::new(String::new());
        let term = self.term.trim();
        if !term.is_empty() {
            sp.append_pair("q", term);
        }
        if !self.country.is_empty() && self.country != ALL_COUNTRIES {
            sp.append_pair("country", &self.country);
        }
        let tags = clean_tags(&self.tags);
        if !tags.is_empty() {
            sp.append_pair("tags", &tags.join(","));
        }
        if self.min_days != DEFAULT_MIN_DAYS {
            sp.append_pair("minDays", &self.min_days.to_string());
        }
        if self.max_days != DEFAULT_MAX_DAYS {
            sp.append_pair("maxDays", &self.max_days.to_string());
        }
        if self.min_price != DEFAULT_MIN_PRICE {
            sp.append_pair("minPrice", &self.min_price.to_string());
        }
        if self.max_price != DEFAULT_MAX_PRICE {
            sp.append_pair("maxPrice", &self.max_price.to_string());
        }
        if self.sort != SortOption::Relevance {
            sp.append_pair("sort", self.sort.as_str());
        }
        let page_size = clamp_page_size(self.page_size);
        if page_size != DEFAULT_PAGE_SIZE {
            sp.append_pair("pageSize", &page_size.to_string());
        }
        if self.page > 1 {
            sp.append_pair("page", &self.page.to_string());
        }
        sp.finish()
    }

    /// Tolerant parser: missing or malformed values take their defaults. The first
    /// occurrence of a repeated parameter wins.
    pub fn from_query_string(qs: &str) -> CatalogQuery {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut q = CatalogQuery::default();
        let mut seen = HashSet::new();
        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            if !seen.insert(key.clone()) {
                continue;
            }
            let value = value.as_ref();
            match key.as_ref() {
                "q" => q.term = value.trim().to_string(),
                "country" if !value.is_empty() => q.country = value.to_string(),
                "tags" => q.tags = clean_tags(value.split(',')),
                "minDays" => q.min_days = value.trim().parse().unwrap_or(DEFAULT_MIN_DAYS),
                "maxDays" => q.max_days = value.trim().parse().unwrap_or(DEFAULT_MAX_DAYS),
                "minPrice" => q.min_price = value.trim().parse().unwrap_or(DEFAULT_MIN_PRICE),
                "maxPrice" => q.max_price = value.trim().parse().unwrap_or(DEFAULT_MAX_PRICE),
                "sort" => q.sort = SortOption::parse(value),
                "pageSize" => q.page_size = clamp_page_size(value.trim().parse().unwrap_or(DEFAULT_PAGE_SIZE)),
                "page" => q.page = value.trim().parse::<usize>().unwrap_or(1).max(1),
                _ => {}
            }
        }
        q
    }
}

fn matches_term(tour: &Tour, folded: &str) -> bool {
    folded.is_empty()
        || contains_folded(&tour.title, folded)
        || contains_folded(&tour.country, folded)
        || contains_folded(&tour.summary, folded)
        || tour.tags.iter().any(|t| contains_folded(t, folded))
}

/// Whether `tour` passes every facet of `query`.
pub fn matches(tour: &Tour, query: &CatalogQuery, folded_term: &str, currency: DisplayCurrency) -> bool {
    let price = currency.convert(tour.price_from);
    matches_term(tour, folded_term)
        && (query.country == ALL_COUNTRIES || query.country.is_empty() || tour.country == query.country)
        && query.tags.iter().all(|t| tour.has_tag(t))
        && tour.duration_days >= query.min_days
        && tour.duration_days <= query.max_days
        && price >= query.min_price as f64
        && price <= query.max_price as f64
}

/// Records passing every facet, in catalog order. The source slice is untouched.
pub fn filter<'a>(records: &'a [Tour], query: &CatalogQuery, currency: DisplayCurrency) -> Vec<&'a Tour> {
    let query = query.normalize();
    let folded = fold_term(&query.term);
    records.iter().filter(|t| matches(t, &query, &folded, currency)).collect()
}

/// Stable sort; ties keep their incoming order and relevance is the identity.
pub fn sort<'a>(mut items: Vec<&'a Tour>, option: SortOption) -> Vec<&'a Tour> {
    match option {
        SortOption::Relevance => {}
        SortOption::PriceAsc => items.sort_by(|a, b| a.price_from.total_cmp(&b.price_from)),
        SortOption::PriceDesc => items.sort_by(|a, b| b.price_from.total_cmp(&a.price_from)),
        SortOption::DurationAsc => items.sort_by_key(|t| t.duration_days),
        SortOption::RatingDesc => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    items
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Requested page clamped into `[1, page_count]`.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page_count = total.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, page_count);
    let start = ((page - 1) * page_size).min(total);
    let end = (page * page_size).min(total);
    Page { items: &items[start..end], page, page_count, total }
}

/// One page of a listing plus the metadata needed to render pagination.
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    pub items: Vec<&'a Tour>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl QueryResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// filter, then sort, then paginate.
pub fn run<'a>(records: &'a [Tour], query: &CatalogQuery, currency: DisplayCurrency) -> QueryResult<'a> {
    let page_size = clamp_page_size(query.page_size);
    let sorted = sort(filter(records, query, currency), query.sort);
    let page = paginate(&sorted, page_size, query.page);
    QueryResult {
        items: page.items.to_vec(),
        total: page.total,
        page: page.page,
        page_count: page.page_count,
        page_size,
    }
}
