//! Walks the catalogue the way the page would: filter, sort, page through,
//! favourite a restaurant and post a review.
//!
//! Favourites persist in `tablefinder-demo.json` in the working directory,
//! so running the demo twice toggles the favourite back off.

use anyhow::Result;
use tablefinder::prelude::*;

fn print_view(view: &CurrentView) {
    println!(
        "{} ({} results, page {}/{})",
        view.title,
        view.total,
        view.page,
        view.total_pages.max(1)
    );
    for card in &view.items {
        println!(
            "  {} {:<22} {:<9} {:<4} ⭐ {} {}",
            card.image,
            card.name,
            card.cuisine,
            card.price_symbols,
            card.display_rating,
            if card.is_favourite { "♥" } else { "♡" }
        );
    }
    if view.items.is_empty() {
        println!("  No restaurants found.");
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let slot = FileKeyValueStore::new("tablefinder-demo.json");
    let mut view = ViewController::from_config(&FinderConfig::default(), slot)?;
    let mut events = view.subscribe();

    print_view(&view.current_view());

    view.next_page();
    print_view(&view.current_view());

    view.set_location("Leeds");
    view.set_criteria(FilterCriteria::default().with_price(2).with_min_rating(4.0));
    view.set_sort(SortKey::RatingDesc);
    print_view(&view.current_view());

    if let Some(favourite) = view.toggle_favourite(2) {
        println!("Spice Route favourite: {}\n", favourite);
    }

    match view.submit_review(3, "Pat", 9, "Great value") {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("Rejected: {}\n", e),
    }

    let updated = view.submit_review(3, "Pat", 4, "Great value")?;
    println!(
        "{} now rated {:.2} from {} review(s)\n",
        updated.name,
        updated.rating,
        updated.review_count()
    );

    view.reset_filters();
    print_view(&view.current_view());

    println!("Favourites:");
    for card in view.favourites_view() {
        println!("  {} {}", card.image, card.name);
    }

    println!("\nEvents:");
    while let Ok(envelope) = events.try_recv() {
        println!("  {}", serde_json::to_string(&envelope.event)?);
    }

    Ok(())
}
