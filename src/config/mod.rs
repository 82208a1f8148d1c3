//! Configuration loading and management

use crate::core::error::{ConfigError, FinderError, FinderResult};
use crate::core::favourites::DEFAULT_FAVOURITES_KEY;
use crate::core::query::SortKey;
use crate::core::restaurant::{MAX_REVIEW_RATING, MIN_REVIEW_RATING, Restaurant};
use crate::core::seed::seed_restaurants;
use crate::core::store::RecordStore;
use serde::{Deserialize, Serialize};

/// Cards shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Highest price tier a restaurant may have
pub const MAX_PRICE_TIER: u8 = 3;

/// Settings for a catalogue view
///
/// ```yaml
/// page_size: 6
/// favourites_key: favs
/// prune_unknown_favourites: true
/// default_sort: rating-desc
/// restaurants:            # optional, replaces the built-in catalogue
///   - id: 1
///     name: Pasta Palace
///     cuisine: italian
///     price: 2
///     description: Cozy spot for handmade pastas
///     image: "🍝"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Number of cards per page
    pub page_size: usize,

    /// Key-value slot key for the favourites list
    pub favourites_key: String,

    /// Drop persisted favourites that name unknown restaurants on load
    pub prune_unknown_favourites: bool,

    /// Sort order applied when the view opens
    pub default_sort: SortKey,

    /// Catalogue override; `None` uses the built-in ten restaurants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<Vec<Restaurant>>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            favourites_key: DEFAULT_FAVOURITES_KEY.to_string(),
            prune_unknown_favourites: true,
            default_sort: SortKey::Relevance,
            restaurants: None,
        }
    }
}

impl FinderConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> FinderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            FinderError::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> FinderResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.favourites_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "favourites_key".to_string(),
                value: self.favourites_key.clone(),
                message: "must not be blank".to_string(),
            });
        }

        for r in self.restaurants.iter().flatten() {
            if !(1..=MAX_PRICE_TIER).contains(&r.price) {
                return Err(ConfigError::InvalidValue {
                    field: format!("restaurants[{}].price", r.id),
                    value: r.price.to_string(),
                    message: format!("must be between 1 and {}", MAX_PRICE_TIER),
                });
            }
            if let Some(review) = r
                .reviews
                .iter()
                .find(|rv| !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&rv.rating))
            {
                return Err(ConfigError::InvalidValue {
                    field: format!("restaurants[{}].reviews.rating", r.id),
                    value: review.rating.to_string(),
                    message: format!(
                        "must be between {} and {}",
                        MIN_REVIEW_RATING, MAX_REVIEW_RATING
                    ),
                });
            }
        }

        Ok(())
    }

    /// Build the record store this configuration describes
    pub fn record_store(&self) -> Result<RecordStore, ConfigError> {
        match &self.restaurants {
            Some(restaurants) => RecordStore::new(restaurants.clone()),
            None => RecordStore::new(seed_restaurants()),
        }
    }
}
