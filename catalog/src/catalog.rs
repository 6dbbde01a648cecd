use crate::currency::DisplayCurrency;
use crate::model::{Destination, Tour};
use crate::query::{self, CatalogQuery, QueryResult, SortOption, ALL_COUNTRIES};
use crate::schema::{normalize_destinations, normalize_tours, CatalogError, RawDestination, RawTour};
use crate::text::{contains_folded, fold_term};
use std::collections::{BTreeSet, HashMap, HashSet};

const BUILTIN_TOURS: &str = include_str!("../data/tours.json");
const BUILTIN_DESTINATIONS: &str = include_str!("../data/destinations.json");

const RELATED_LIMIT: usize = 3;

/// The immutable tour and destination catalog, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tours: Vec<Tour>,
    destinations: Vec<Destination>,
    by_slug: HashMap<String, usize>,
}

/// Homepage selection: the first `limit` matches plus how many matched overall.
#[derive(Debug, Clone)]
pub struct Featured<'a> {
    pub items: Vec<&'a Tour>,
    pub total: usize,
}

impl Catalog {
    pub fn new(tours: Vec<Tour>, destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(tours.len());
        for (pos, t) in tours.iter().enumerate() {
            if by_slug.insert(t.slug.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateSlug(t.slug.clone()));
            }
        }
        Ok(Self { tours, destinations, by_slug })
    }

    pub fn from_raw(tours: Vec<RawTour>, destinations: Vec<RawDestination>) -> Result<Self, CatalogError> {
        Self::new(normalize_tours(tours)?, normalize_destinations(destinations)?)
    }

    /// Parse JSON arrays of raw tours and destinations.
    pub fn from_json_str(tours: &str, destinations: &str) -> Result<Self, CatalogError> {
        let tours: Vec<RawTour> = serde_json::from_str(tours)?;
        let destinations: Vec<RawDestination> = serde_json::from_str(destinations)?;
        Self::from_raw(tours, destinations)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_TOURS, BUILTIN_DESTINATIONS)
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Exact, case-sensitive. `None` is the not-found outcome.
    pub fn lookup_by_slug(&self, slug: &str) -> Option<&Tour> {
        self.by_slug.get(slug).map(|&pos| &self.tours[pos])
    }

    pub fn query(&self, query: &CatalogQuery, currency: DisplayCurrency) -> QueryResult<'_> {
        query::run(&self.tours, query, currency)
    }

    /// `"All"` followed by every country, sorted.
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.tours.iter().map(|t| t.country.as_str()).collect();
        std::iter::once(ALL_COUNTRIES).chain(set).map(str::to_string).collect()
    }

    pub fn tags(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.tours.iter().flat_map(|t| t.tags.iter().map(String::as_str)).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Same-country tours when there are at least three of them, otherwise tours
    /// sharing any tag. Never includes `tour` itself.
    pub fn related(&self, tour: &Tour) -> Vec<&Tour> {
        let others = || self.tours.iter().filter(move |t| t.slug != tour.slug);
        let same_country: Vec<&Tour> = others().filter(|t| t.country == tour.country).collect();
        if same_country.len() >= RELATED_LIMIT {
            return same_country.into_iter().take(RELATED_LIMIT).collect();
        }
        others().filter(|t| t.shares_tag_with(tour)).take(RELATED_LIMIT).collect()
    }

    /// `"All"` followed by the first `n` distinct tags in catalog order.
    pub fn home_categories(&self, n: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let firsts = self
            .tours
            .iter()
            .flat_map(|t| t.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .take(n)
            .cloned();
        std::iter::once(ALL_COUNTRIES.to_string()).chain(firsts).collect()
    }

    /// Homepage listing: text search plus a single tag category (`"All"` for none).
    pub fn featured(&self, term: &str, category: &str, sort: SortOption, limit: usize) -> Featured<'_> {
        let mut q = CatalogQuery { term: term.to_string(), sort, ..CatalogQuery::default() };
        if !category.is_empty() && category != ALL_COUNTRIES {
            q.tags = vec![category.to_string()];
        }
        let matched = query::sort(query::filter(&self.tours, &q, DisplayCurrency::Usd), sort);
        let total = matched.len();
        Featured { items: matched.into_iter().take(limit).collect(), total }
    }

    /// Destinations whose name or description contains `term`; `country` of `None`
    /// or empty matches all.
    pub fn search_destinations(&self, term: &str, country: Option<&str>) -> Vec<&Destination> {
        let folded = fold_term(term);
        let country = country.filter(|c| !c.is_empty());
        self.destinations
            .iter()
            .filter(|d| contains_folded(&d.name, &folded) || contains_folded(&d.description, &folded))
            .filter(|d| country.map_or(true, |c| d.country == c))
            .collect()
    }

    /// Distinct destination countries in first-seen order.
    pub fn destination_countries(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.destinations
            .iter()
            .filter(|d| seen.insert(d.country.as_str()))
            .map(|d| d.country.clone())
            .collect()
    }
}
