//! Restaurant and review records

use serde::{Deserialize, Serialize};

/// Lowest accepted review score
pub const MIN_REVIEW_RATING: u8 = 1;

/// Highest accepted review score
pub const MAX_REVIEW_RATING: u8 = 5;

/// A single review left on a restaurant
///
/// Reviews have no identity of their own beyond their position in the
/// owning restaurant's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub text: String,
}

impl Review {
    pub fn new(author: impl Into<String>, rating: u8, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating,
            text: text.into(),
        }
    }
}

/// A restaurant in the catalogue
///
/// `rating` is derived from `reviews` and is kept in sync by every
/// mutation that goes through [`Restaurant::push_review`]. Records loaded
/// from configuration have it recomputed on load, so any value present in
/// the source is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub cuisine: String,
    /// Price tier, 1 (cheap) to 3 (premium)
    pub price: u8,
    #[serde(default)]
    pub rating: f64,
    pub description: String,
    /// Icon or image reference shown on the card
    pub image: String,
    /// Most recent first
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Restaurant {
    /// Create a restaurant with no reviews
    pub fn new(
        id: u32,
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: u8,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cuisine: cuisine.into(),
            price,
            rating: 0.0,
            description: description.into(),
            image: image.into(),
            reviews: Vec::new(),
        }
    }

    /// Replace the review list (most recent first) and recompute the rating
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self.refresh_rating();
        self
    }

    /// Insert a review at the head of the list and recompute the rating
    pub fn push_review(&mut self, review: Review) {
        self.reviews.insert(0, review);
        self.refresh_rating();
    }

    /// Recompute `rating` from the current reviews
    pub fn refresh_rating(&mut self) {
        self.rating = average_rating(&self.reviews);
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Price tier rendered as repeated currency symbols ("$$")
    pub fn price_symbols(&self) -> String {
        "$".repeat(self.price as usize)
    }
}

/// Mean review rating rounded to two decimals, or 0 with no reviews
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    round_decimals(f64::from(sum) / reviews.len() as f64, 2)
}

/// Round a number to the given count of decimal places
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a non-negative rating with one decimal, rounding exact ties up
///
/// The only ratings that sit exactly halfway between two tenths are the
/// quarters (x.25, x.75); everything else formats with its exact value.
pub fn format_rating(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", round_decimals(value, 1))
    } else {
        format!("{:.1}", value)
    }
}
