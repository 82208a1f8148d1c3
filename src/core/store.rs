//! The record store and its query trait

use super::error::{ConfigError, LookupError};
use super::query::{self, FilterCriteria, SortKey};
use super::restaurant::Restaurant;
use std::collections::HashSet;

/// Trait for stores that support filtering and sorting
///
/// Implemented by stores that hold restaurants and can answer the list
/// view's queries. The provided methods delegate to the pure functions in
/// [`query`](super::query).
pub trait QueryableStore {
    /// Get all restaurants (unfiltered, catalogue order)
    fn list_all(&self) -> &[Restaurant];

    /// Apply filter criteria to the full catalogue
    fn apply_filters(&self, criteria: &FilterCriteria) -> Vec<Restaurant> {
        query::filter_and_search(self.list_all(), criteria)
    }

    /// Apply sorting to a collection of restaurants
    fn apply_sort(&self, data: &[Restaurant], key: SortKey) -> Vec<Restaurant> {
        query::sort(data, key)
    }
}

/// Authoritative in-memory collection of restaurants
///
/// Order is the catalogue order. Restaurants are never removed; the only
/// mutation is review insertion through [`RecordStore::get_mut`].
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    restaurants: Vec<Restaurant>,
}

impl RecordStore {
    /// Build a store from a catalogue, rejecting duplicate ids
    ///
    /// Ratings are recomputed from each restaurant's reviews.
    pub fn new(restaurants: Vec<Restaurant>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for r in &restaurants {
            if !seen.insert(r.id) {
                return Err(ConfigError::InvalidValue {
                    field: "restaurants.id".to_string(),
                    value: r.id.to_string(),
                    message: "restaurant ids must be unique".to_string(),
                });
            }
        }

        let restaurants = restaurants
            .into_iter()
            .map(|mut r| {
                r.refresh_rating();
                r
            })
            .collect();

        Ok(Self { restaurants })
    }

    /// Store holding the built-in demo catalogue
    pub fn seeded() -> Self {
        Self {
            restaurants: super::seed::seed_restaurants(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Result<&mut Restaurant, LookupError> {
        self.restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LookupError::RestaurantNotFound { id })
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.restaurants.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

impl QueryableStore for RecordStore {
    fn list_all(&self) -> &[Restaurant] {
        &self.restaurants
    }
}
