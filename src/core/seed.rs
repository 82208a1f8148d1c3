//! Built-in restaurant catalogue used when no configuration overrides it

use super::restaurant::{Restaurant, Review};

/// The ten demo restaurants, in display order
///
/// Ratings are derived from the seeded reviews, so restaurants without
/// reviews start at 0.
pub fn seed_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new(
            1,
            "Pasta Palace",
            "italian",
            2,
            "Cozy spot for handmade pastas",
            "🍝",
        )
        .with_reviews(vec![Review::new("Amy", 5, "Loved the carbonara!")]),
        Restaurant::new(
            2,
            "Spice Route",
            "indian",
            2,
            "Regional Indian dishes & thalis",
            "🍛",
        )
        .with_reviews(vec![Review::new("Raj", 5, "Best biryani near me")]),
        Restaurant::new(
            3,
            "Dragon Express",
            "chinese",
            1,
            "Quick & tasty Chinese classics",
            "🥡",
        ),
        Restaurant::new(
            4,
            "Bangkok Bites",
            "thai",
            2,
            "Street-style Thai flavours",
            "🍜",
        ),
        Restaurant::new(
            5,
            "Fine Dine Steakhouse",
            "american",
            3,
            "Premium steaks & wine list",
            "🥩",
        )
        .with_reviews(vec![Review::new("Liam", 5, "Perfect steak and service")]),
        Restaurant::new(6, "Vegan Vibes", "fusion", 2, "Plant-based comfort food", "🥗"),
        Restaurant::new(
            7,
            "Bella Pizza",
            "italian",
            1,
            "Thin crust pizzas, classic flavours",
            "🍕",
        )
        .with_reviews(vec![Review::new("Marco", 4, "Proper thin crust")]),
        Restaurant::new(8, "Noodle House", "chinese", 1, "Comforting noodle bowls", "🍜")
            .with_reviews(vec![
                Review::new("Mei", 4, "Hand-pulled noodles are great"),
                Review::new("Tom", 3, "Broth was a bit bland"),
            ]),
        Restaurant::new(
            9,
            "Curry Corner",
            "indian",
            1,
            "Homestyle curries & breads",
            "🍛",
        )
        .with_reviews(vec![Review::new("Priya", 4, "Garlic naan is a must")]),
        Restaurant::new(
            10,
            "Green Garden",
            "fusion",
            2,
            "Fresh seasonal bowls & juices",
            "🥗",
        )
        .with_reviews(vec![Review::new("Noor", 4, "Lovely grain bowls")]),
    ]
}
