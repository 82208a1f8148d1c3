//! Review ledger: validated review insertion

use super::error::FinderResult;
use super::store::RecordStore;
use super::restaurant::Restaurant;
use super::validation::ReviewForm;

/// Validate and prepend a review, returning the updated restaurant
///
/// Nothing changes unless the restaurant exists and the input passes
/// [`ReviewForm`]'s rules. The restaurant's rating is recomputed, so later
/// rating sorts and minimum-rating filters see the new value.
pub fn add_review(
    store: &mut RecordStore,
    restaurant_id: u32,
    author: &str,
    rating: i64,
    text: &str,
) -> FinderResult<Restaurant> {
    let form = ReviewForm::new(author, rating, text)?;
    submit_review(store, restaurant_id, form)
}

/// Prepend a review that has passed [`ReviewForm`]'s rules
pub(crate) fn submit_review(
    store: &mut RecordStore,
    restaurant_id: u32,
    form: ReviewForm,
) -> FinderResult<Restaurant> {
    let restaurant = store.get_mut(restaurant_id)?;
    let score = form.rating();
    restaurant.push_review(form.into_review());

    tracing::info!(
        restaurant_id,
        score,
        rating = restaurant.rating,
        review_count = restaurant.review_count(),
        "Review added"
    );

    Ok(restaurant.clone())
}
