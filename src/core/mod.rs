//! Core types: records, queries, favourites, reviews and the view controller

pub mod error;
pub mod events;
pub mod favourites;
pub mod query;
pub mod restaurant;
pub mod reviews;
pub mod seed;
pub mod store;
pub mod validation;
pub mod view;

pub use error::{FinderError, FinderResult};
pub use events::{EventBus, EventEnvelope, FinderEvent};
pub use favourites::FavouritesStore;
pub use query::{FilterCriteria, Page, PaginationMeta, SortKey, filter_and_search, paginate, sort};
pub use restaurant::{Restaurant, Review};
pub use store::{QueryableStore, RecordStore};
pub use view::{CurrentView, RestaurantCard, RestaurantDetails, ViewController, ViewState};
