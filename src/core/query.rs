//! Filtering, sorting and pagination over restaurant lists
//!
//! Everything here is pure: inputs are borrowed, results are new vectors.

use super::restaurant::Restaurant;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Filter and search criteria
///
/// Every field is optional; an absent field places no constraint. The
/// struct deserializes from the filter panel's payload, e.g.
///
/// ```text
/// {"price": 2, "cuisine": "italian", "min_rating": 4.0, "query": "pasta"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact price tier
    pub price: Option<u8>,

    /// Exact cuisine tag
    pub cuisine: Option<String>,

    /// Inclusive minimum rating; 0 or less means no constraint
    pub min_rating: Option<f64>,

    /// Case-insensitive substring matched against name, description and cuisine
    pub query: Option<String>,
}

impl FilterCriteria {
    pub fn with_price(mut self, price: u8) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Normalized search needle, `None` when blank
    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Effective rating threshold, `None` when it places no constraint
    fn rating_floor(&self) -> Option<f64> {
        self.min_rating.filter(|m| *m > 0.0)
    }

    /// True when no field constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.price.is_none()
            && self.cuisine.is_none()
            && self.rating_floor().is_none()
            && self.needle().is_none()
    }
}

/// Sort order for the result list
///
/// Parses both the canonical names (`rating-desc`) and the option values
/// used by the page's sort select (`rating`, `price_low`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalogue order
    #[default]
    #[serde(alias = "popular")]
    Relevance,
    #[serde(alias = "rating")]
    RatingDesc,
    #[serde(alias = "price_low")]
    PriceAsc,
    #[serde(alias = "price_high")]
    PriceDesc,
    #[serde(alias = "name")]
    NameAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::RatingDesc => "rating-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "relevance" | "popular" => Ok(SortKey::Relevance),
            "rating-desc" | "rating" => Ok(SortKey::RatingDesc),
            "price-asc" | "price_low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price_high" => Ok(SortKey::PriceDesc),
            "name-asc" | "name" => Ok(SortKey::NameAsc),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Apply the criteria to a restaurant list
///
/// Passes run in order price, cuisine, minimum rating, then search text.
/// The result keeps the relative order of `all`.
pub fn filter_and_search(all: &[Restaurant], criteria: &FilterCriteria) -> Vec<Restaurant> {
    let needle = criteria.needle();
    let floor = criteria.rating_floor();

    all.iter()
        .filter(|r| criteria.price.is_none_or(|p| r.price == p))
        .filter(|r| criteria.cuisine.as_deref().is_none_or(|c| r.cuisine == c))
        .filter(|r| floor.is_none_or(|min| r.rating >= min))
        .filter(|r| needle.as_deref().is_none_or(|q| matches_query(r, q)))
        .cloned()
        .collect()
}

fn matches_query(r: &Restaurant, needle: &str) -> bool {
    r.name.to_lowercase().contains(needle)
        || r.description.to_lowercase().contains(needle)
        || r.cuisine.to_lowercase().contains(needle)
}

/// Return a sorted copy of `items`
///
/// All orders are stable: restaurants comparing equal keep their input
/// order.
pub fn sort(items: &[Restaurant], key: SortKey) -> Vec<Restaurant> {
    let mut sorted = items.to_vec();
    match key {
        SortKey::Relevance => {}
        SortKey::RatingDesc => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceAsc => sorted.sort_by_key(|r| r.price),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAsc => sorted.sort_by(|a, b| collate(&a.name, &b.name)),
    }
    sorted
}

/// Accent- and case-insensitive comparison, falling back to code points
fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One page of a result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub visible: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn total(&self) -> usize {
        self.pagination.total
    }

    pub fn has_prev(&self) -> bool {
        self.pagination.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.pagination.has_next
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        // Ensure page_size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(page_size) };

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page.saturating_mul(page_size) < total,
            has_prev: page > 1,
        }
    }
}

/// Slice out page `page` (1-based) of `items`
///
/// A page past the end yields no items while `total` and `has_prev` stay
/// accurate; the caller decides whether to step back. Page 0 is read as
/// page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let pagination = PaginationMeta::new(page, page_size, items.len());
    let start = (pagination.page - 1)
        .saturating_mul(pagination.page_size)
        .min(items.len());
    let end = start.saturating_add(pagination.page_size).min(items.len());

    Page {
        visible: items[start..end].to_vec(),
        pagination,
    }
}
