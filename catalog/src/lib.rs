pub mod catalog;
pub mod contact;
pub mod currency;
pub mod itinerary;
pub mod jsonld;
pub mod model;
pub mod persist;
pub mod query;
pub mod schema;
pub mod text;

pub use catalog::{Catalog, Featured};
pub use currency::DisplayCurrency;
pub use model::{Destination, Highlight, ItineraryDay, Tour, PLACEHOLDER_IMAGE};
pub use query::{filter, paginate, sort, CatalogQuery, Page, QueryResult, SortOption};
pub use schema::{CatalogError, RawDestination, RawTour};
