//! Filtering, pagination and facet listing over the working set.

pub mod criteria;
mod engine;
mod facets;
mod page;

pub use criteria::{ALL_SENTINEL, Facet, FilterCriteria, FilterParams};
pub use engine::{apply_filters, filter_records};
pub use facets::FacetValues;
pub use page::{DEFAULT_PAGE_SIZE, Page, paginate};
