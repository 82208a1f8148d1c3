//! View controller and presentation view-models
//!
//! [`ViewController`] owns every piece of state the catalogue page needs:
//! the record store, the favourites store, the current filters, sort and
//! page. The presentation layer sends intents (`set_criteria`,
//! `next_page`, `toggle_favourite`, ...) and reads back plain-data
//! view-models. Each state change is announced on the [`EventBus`].
//!
//! ```rust,ignore
//! let mut view = ViewController::from_config(&FinderConfig::default(), slot)?;
//! view.set_criteria(FilterCriteria::default().with_price(2));
//! view.set_sort(SortKey::RatingDesc);
//! for card in view.current_view().items {
//!     println!("{} {}", card.name, card.display_rating);
//! }
//! ```

use super::error::{FinderResult, LookupError};
use super::events::{EventBus, EventEnvelope, FinderEvent};
use super::favourites::FavouritesStore;
use super::query::{FilterCriteria, PaginationMeta, SortKey, paginate};
use super::restaurant::{Restaurant, Review, format_rating};
use super::reviews;
use super::store::{QueryableStore, RecordStore};
use super::validation::ReviewForm;
use crate::config::FinderConfig;
use crate::storage::KeyValueStore;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

/// A restaurant as shown on a result card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantCard {
    pub id: u32,
    pub name: String,
    pub cuisine: String,
    pub price: u8,
    /// Price tier as currency symbols, e.g. "$$"
    pub price_symbols: String,
    pub rating: f64,
    /// Rating with one decimal, e.g. "4.5"
    pub display_rating: String,
    pub description: String,
    pub image: String,
    pub review_count: usize,
    pub is_favourite: bool,
}

impl RestaurantCard {
    pub fn new(restaurant: &Restaurant, is_favourite: bool) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            cuisine: restaurant.cuisine.clone(),
            price: restaurant.price,
            price_symbols: restaurant.price_symbols(),
            rating: restaurant.rating,
            display_rating: format_rating(restaurant.rating),
            description: restaurant.description.clone(),
            image: restaurant.image.clone(),
            review_count: restaurant.review_count(),
            is_favourite,
        }
    }
}

/// A restaurant's detail panel: the card plus its reviews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantDetails {
    #[serde(flatten)]
    pub card: RestaurantCard,
    /// Most recent first
    pub reviews: Vec<Review>,
}

/// The page of results the presentation layer should draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub items: Vec<RestaurantCard>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub sort: SortKey,
    /// Heading above the results, e.g. "Popular in Leeds"
    pub title: String,
}

/// Transient view settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub sort: SortKey,
    pub criteria: FilterCriteria,
    /// Free-text location shown in the results title
    pub location: Option<String>,
}

impl ViewState {
    pub fn new(page_size: usize, sort: SortKey) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sort,
            criteria: FilterCriteria::default(),
            location: None,
        }
    }
}

/// Orchestrates the list view over a record store and a favourites store
pub struct ViewController<S: KeyValueStore> {
    records: RecordStore,
    favourites: FavouritesStore<S>,
    events: EventBus,
    state: ViewState,
    /// Catalogue narrowed by `state.criteria`, catalogue order
    filtered: Vec<Restaurant>,
}

impl<S: KeyValueStore> ViewController<S> {
    /// Create a controller showing the whole catalogue on page 1
    pub fn new(records: RecordStore, favourites: FavouritesStore<S>, state: ViewState) -> Self {
        let filtered = records.apply_filters(&state.criteria);
        Self {
            records,
            favourites,
            events: EventBus::default(),
            state,
            filtered,
        }
    }

    /// Build the record store and favourites from configuration
    ///
    /// Favourites are loaded from `slot`; when the configuration asks for
    /// it, ids that no longer name a restaurant are pruned and the pruned
    /// list written back.
    pub fn from_config(config: &FinderConfig, slot: S) -> FinderResult<Self> {
        config.validate()?;
        let records = config.record_store()?;

        let mut favourites = FavouritesStore::open(slot, config.favourites_key.clone());
        if config.prune_unknown_favourites {
            favourites.retain_known(|id| records.contains(id));
        }

        tracing::info!(
            restaurants = records.len(),
            favourites = favourites.len(),
            page_size = config.page_size,
            favourites_key = favourites.key(),
            "Catalogue view ready"
        );

        Ok(Self::new(
            records,
            favourites,
            ViewState::new(config.page_size, config.default_sort),
        ))
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Replace the filter criteria and return to page 1
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.state.criteria = criteria;
        self.refilter();
        self.state.page = 1;
        self.notify_view_changed();
    }

    /// Change only the search text, keeping the other filters
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let mut criteria = self.state.criteria.clone();
        criteria.query = Some(text.into());
        self.set_criteria(criteria);
    }

    /// Clear every filter and the search text
    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Set the location shown in the title and re-run the current filters
    pub fn set_location(&mut self, location: impl Into<String>) {
        let location = location.into();
        let location = location.trim();
        self.state.location = (!location.is_empty()).then(|| location.to_string());
        let criteria = self.state.criteria.clone();
        self.set_criteria(criteria);
    }

    /// Change the sort order; filters and page are kept
    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
        self.notify_view_changed();
    }

    /// Step back one page; returns false on page 1
    pub fn prev_page(&mut self) -> bool {
        if !self.pagination().has_prev {
            return false;
        }
        self.state.page -= 1;
        self.notify_view_changed();
        true
    }

    /// Step forward one page; returns false on the last page
    pub fn next_page(&mut self) -> bool {
        if !self.pagination().has_next {
            return false;
        }
        self.state.page += 1;
        self.notify_view_changed();
        true
    }

    /// Flip a restaurant's favourite status
    ///
    /// Returns the new status, or `None` when `id` is not in the catalogue
    /// (nothing is stored in that case). Filters and page are kept.
    pub fn toggle_favourite(&mut self, id: u32) -> Option<bool> {
        if !self.records.contains(id) {
            tracing::debug!(restaurant_id = id, "Ignoring favourite toggle for unknown id");
            return None;
        }

        let favourite = self.favourites.toggle(id);
        self.events.publish(FinderEvent::FavouriteToggled {
            restaurant_id: id,
            favourite,
        });
        Some(favourite)
    }

    /// Validate and store a review, returning the updated restaurant
    ///
    /// The filtered list is recomputed because the new rating may move the
    /// restaurant across a minimum-rating threshold. The page is kept,
    /// stepping back if it no longer exists.
    pub fn submit_review(
        &mut self,
        id: u32,
        author: &str,
        rating: i64,
        text: &str,
    ) -> FinderResult<Restaurant> {
        let form = ReviewForm::new(author, rating, text)?;
        self.apply_review(id, form)
    }

    /// Like [`submit_review`](Self::submit_review), for a raw form payload
    pub fn submit_review_form(&mut self, id: u32, payload: Value) -> FinderResult<Restaurant> {
        let form = ReviewForm::from_value(payload)?;
        self.apply_review(id, form)
    }

    fn apply_review(&mut self, id: u32, form: ReviewForm) -> FinderResult<Restaurant> {
        let updated = reviews::submit_review(&mut self.records, id, form)?;

        self.events.publish(FinderEvent::ReviewAdded {
            restaurant_id: id,
            rating: updated.rating,
            review_count: updated.review_count(),
        });

        self.refilter();
        let last_page = self.pagination().total_pages.max(1);
        self.state.page = self.state.page.min(last_page);
        self.notify_view_changed();

        Ok(updated)
    }

    // =========================================================================
    // View-models
    // =========================================================================

    /// Sorted, paginated page of the filtered list
    pub fn current_view(&self) -> CurrentView {
        let sorted = self.records.apply_sort(&self.filtered, self.state.sort);
        let page = paginate(&sorted, self.state.page, self.state.page_size);

        CurrentView {
            items: page
                .visible
                .iter()
                .map(|r| RestaurantCard::new(r, self.favourites.is_favourite(r.id)))
                .collect(),
            total: page.pagination.total,
            page: page.pagination.page,
            page_size: page.pagination.page_size,
            total_pages: page.pagination.total_pages,
            has_prev: page.pagination.has_prev,
            has_next: page.pagination.has_next,
            sort: self.state.sort,
            title: self.results_title(),
        }
    }

    /// Favourite restaurants in catalogue order
    pub fn favourites_view(&self) -> Vec<RestaurantCard> {
        self.records
            .list_all()
            .iter()
            .filter(|r| self.favourites.is_favourite(r.id))
            .map(|r| RestaurantCard::new(r, true))
            .collect()
    }

    /// Detail panel for one restaurant, `None` for unknown ids
    pub fn restaurant_details(&self, id: u32) -> Option<RestaurantDetails> {
        let restaurant = self.records.get(id)?;
        Some(RestaurantDetails {
            card: RestaurantCard::new(restaurant, self.favourites.is_favourite(id)),
            reviews: restaurant.reviews.clone(),
        })
    }

    /// Like [`restaurant_details`](Self::restaurant_details), as an error
    pub fn require_details(&self, id: u32) -> FinderResult<RestaurantDetails> {
        self.restaurant_details(id)
            .ok_or_else(|| LookupError::RestaurantNotFound { id }.into())
    }

    pub fn results_title(&self) -> String {
        match &self.state.location {
            Some(location) => format!("Popular in {}", location),
            None => "Popular near you".to_string(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_favourite(&self, id: u32) -> bool {
        self.favourites.is_favourite(id)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn favourites(&self) -> &FavouritesStore<S> {
        &self.favourites
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn refilter(&mut self) {
        self.filtered = self.records.apply_filters(&self.state.criteria);
        tracing::debug!(
            total = self.filtered.len(),
            criteria = ?self.state.criteria,
            "Recomputed filtered list"
        );
    }

    fn pagination(&self) -> PaginationMeta {
        PaginationMeta::new(self.state.page, self.state.page_size, self.filtered.len())
    }

    fn notify_view_changed(&self) {
        self.events.publish(FinderEvent::ViewChanged {
            page: self.state.page,
            total: self.filtered.len(),
            sort: self.state.sort,
        });
    }
}
