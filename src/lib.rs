// Hotel listing engine: filter, sort and paginate an in-memory hotel list

// Export modules for each part of the listing page
pub mod config;
pub mod dummy_data;
pub mod error;
pub mod filter;
pub mod listing;
pub mod pagination;
pub mod render;
pub mod scroll;

// Re-export key types for convenience
pub use config::{ListingConfig, TriggerMode};
pub use dummy_data::{generate_hotels, HotelRecord};
pub use error::{ListingError, Result};
pub use filter::{filter_hotels, parse_bound, BoundField, BoundInput, BoundsMode, FilterCriteria, SortBy};
pub use listing::{HotelListing, ListingSnapshot};
pub use pagination::{Paginator, PendingReveal, RevealOutcome, StaleLoadPolicy};
pub use render::{render_page, Footer, HotelCard, PageView};
pub use scroll::{ScrollTrigger, Viewport};
