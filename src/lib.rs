//! # tablefinder
//!
//! The data core of a restaurant-browsing page: a small catalogue that is
//! filtered, sorted and paginated into result cards, with a reviews ledger
//! and a favourites list persisted to a key-value slot.
//!
//! ## Features
//!
//! - **Query pipeline**: price, cuisine, minimum rating and free-text search,
//!   followed by stable sorting and 1-based pagination
//! - **Reviews**: validated submissions, newest first, with the restaurant
//!   rating derived from its reviews
//! - **Favourites**: toggle semantics with write-through persistence that
//!   tolerates missing or corrupted storage
//! - **View-models**: plain serializable data; rendering is left to the host
//! - **Change events**: a broadcast bus announcing every state change
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tablefinder::prelude::*;
//!
//! let slot = FileKeyValueStore::new("state.json");
//! let mut view = ViewController::from_config(&FinderConfig::default(), slot)?;
//!
//! view.set_criteria(FilterCriteria::default().with_price(2).with_min_rating(4.0));
//! view.set_sort(SortKey::RatingDesc);
//! view.toggle_favourite(2);
//! view.submit_review(3, "Pat", 4, "Great value")?;
//!
//! let page = view.current_view();
//! println!("{} results", page.total);
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Records ===
    pub use crate::core::restaurant::{Restaurant, Review};
    pub use crate::core::store::{QueryableStore, RecordStore};

    // === Queries ===
    pub use crate::core::query::{
        FilterCriteria, Page, PaginationMeta, SortKey, filter_and_search, paginate, sort,
    };

    // === State ===
    pub use crate::core::favourites::FavouritesStore;
    pub use crate::core::reviews::add_review;
    pub use crate::core::validation::ReviewForm;

    // === View ===
    pub use crate::core::events::{EventBus, EventEnvelope, FinderEvent};
    pub use crate::core::view::{
        CurrentView, RestaurantCard, RestaurantDetails, ViewController, ViewState,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, FinderError, FinderResult, LookupError, StorageError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

    // === Config ===
    pub use crate::config::FinderConfig;
}
