//! End-to-end tests of the catalogue view through the public API

use std::collections::HashSet;
use tablefinder::prelude::*;

fn controller() -> ViewController<InMemoryKeyValueStore> {
    ViewController::from_config(&FinderConfig::default(), InMemoryKeyValueStore::new()).unwrap()
}

fn ids(cards: &[RestaurantCard]) -> Vec<u32> {
    cards.iter().map(|c| c.id).collect()
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<EventEnvelope>) -> Vec<FinderEvent> {
    let mut events = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        events.push(envelope.event);
    }
    events
}

// =============================================================================
// Query pipeline
// =============================================================================

mod query_tests {
    use super::*;

    #[test]
    fn test_price_two_rated_four_plus() {
        let mut view = controller();
        view.set_criteria(FilterCriteria::default().with_price(2).with_min_rating(4.0));

        let current = view.current_view();
        assert_eq!(ids(&current.items), vec![1, 2, 10]);
        let names: Vec<&str> = current.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pasta Palace", "Spice Route", "Green Garden"]);
    }

    #[test]
    fn test_filter_result_is_ordered_subsequence() {
        let store = RecordStore::seeded();
        let all_ids: Vec<u32> = store.ids().collect();

        let criteria_list = vec![
            FilterCriteria::default(),
            FilterCriteria::default().with_price(1),
            FilterCriteria::default().with_cuisine("fusion"),
            FilterCriteria::default().with_min_rating(3.5),
            FilterCriteria::default().with_query("bowls"),
            FilterCriteria::default().with_price(3).with_cuisine("thai"),
        ];

        for criteria in criteria_list {
            let result: Vec<u32> = filter_and_search(store.list_all(), &criteria)
                .iter()
                .map(|r| r.id)
                .collect();

            let mut cursor = all_ids.iter();
            for id in &result {
                assert!(
                    cursor.any(|candidate| candidate == id),
                    "{:?} is not an ordered subsequence for {:?}",
                    result,
                    criteria
                );
            }
        }
    }

    #[test]
    fn test_no_results() {
        let mut view = controller();
        view.set_criteria(FilterCriteria::default().with_price(3).with_cuisine("thai"));
        let current = view.current_view();
        assert!(current.items.is_empty());
        assert_eq!(current.total, 0);
        assert_eq!(current.total_pages, 0);
        assert!(!current.has_next);
        assert!(!current.has_prev);
    }

    #[test]
    fn test_sort_applies_after_filters() {
        let mut view = controller();
        view.set_criteria(FilterCriteria::default().with_price(1));
        view.set_sort(SortKey::RatingDesc);
        // 7: 4.0, 9: 4.0, 8: 3.5, 3: 0.0
        assert_eq!(ids(&view.current_view().items), vec![7, 9, 8, 3]);
    }

    #[test]
    fn test_default_sort_from_config() {
        let config = FinderConfig {
            default_sort: SortKey::PriceDesc,
            ..FinderConfig::default()
        };
        let view = ViewController::from_config(&config, InMemoryKeyValueStore::new()).unwrap();
        assert_eq!(view.current_view().items[0].id, 5);
    }
}

// =============================================================================
// Pagination
// =============================================================================

mod pagination_tests {
    use super::*;

    #[test]
    fn test_second_page_of_ten() {
        let mut view = controller();
        assert!(view.next_page());

        let current = view.current_view();
        assert_eq!(current.page, 2);
        assert_eq!(ids(&current.items), vec![7, 8, 9, 10]);
        assert!(current.has_prev);
        assert!(!current.has_next);
    }

    #[test]
    fn test_next_page_never_runs_past_the_end() {
        let mut view = controller();
        for _ in 0..5 {
            view.next_page();
        }
        let current = view.current_view();
        assert_eq!(current.page, 2);
        assert!(!current.items.is_empty());
    }

    #[test]
    fn test_custom_page_size() {
        let config = FinderConfig {
            page_size: 4,
            ..FinderConfig::default()
        };
        let mut view = ViewController::from_config(&config, InMemoryKeyValueStore::new()).unwrap();
        view.next_page();
        view.next_page();

        let current = view.current_view();
        assert_eq!(current.page, 3);
        assert_eq!(current.total_pages, 3);
        assert_eq!(ids(&current.items), vec![9, 10]);
    }

    #[test]
    fn test_paginate_beyond_last_page_is_empty() {
        let store = RecordStore::seeded();
        let page = paginate(store.list_all(), 3, 6);
        assert!(page.visible.is_empty());
        assert_eq!(page.total(), 10);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }
}

// =============================================================================
// Favourites
// =============================================================================

mod favourite_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut view = controller();
        assert_eq!(view.toggle_favourite(6), Some(true));
        assert_eq!(view.toggle_favourite(6), Some(false));
        assert!(!view.is_favourite(6));
    }

    #[test]
    fn test_toggle_keeps_page_and_filters() {
        let mut view = controller();
        view.next_page();
        view.toggle_favourite(9);

        let current = view.current_view();
        assert_eq!(current.page, 2);
        assert!(current.items.iter().any(|c| c.id == 9 && c.is_favourite));
    }

    #[test]
    fn test_favourites_view_in_catalogue_order() {
        let mut view = controller();
        for id in [9, 2, 5] {
            view.toggle_favourite(id);
        }
        let favourites = view.favourites_view();
        assert_eq!(ids(&favourites), vec![2, 5, 9]);
        assert!(favourites.iter().all(|c| c.is_favourite));
    }

    #[test]
    fn test_favourites_survive_controller_restart() {
        let slot = InMemoryKeyValueStore::new();
        {
            let mut view = ViewController::from_config(&FinderConfig::default(), slot.clone())
                .unwrap();
            for id in [2, 5, 9] {
                view.toggle_favourite(id);
            }
        }

        let view = ViewController::from_config(&FinderConfig::default(), slot).unwrap();
        let loaded: HashSet<u32> = view.favourites().list().iter().copied().collect();
        assert_eq!(loaded, [5, 9, 2].into_iter().collect());
    }
}

// =============================================================================
// Reviews
// =============================================================================

mod review_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_review_on_empty_restaurant() {
        let mut view = controller();
        let updated = view.submit_review(3, "Pat", 4, "Great value").unwrap();
        assert_eq!(updated.rating, 4.0);
        assert_eq!(updated.review_count(), 1);

        let details = view.restaurant_details(3).unwrap();
        assert_eq!(details.card.display_rating, "4.0");
        assert_eq!(details.reviews[0].author, "Pat");
    }

    #[test]
    fn test_review_moves_restaurant_across_rating_filter() {
        let mut view = controller();
        view.set_criteria(FilterCriteria::default().with_price(2).with_min_rating(4.0));
        assert_eq!(view.current_view().total, 3);

        view.submit_review(4, "Kai", 5, "Best pad see ew").unwrap();
        assert_eq!(ids(&view.current_view().items), vec![1, 2, 4, 10]);

        view.submit_review(1, "Bo", 1, "Cold pasta").unwrap();
        view.submit_review(1, "Cy", 1, "Still cold").unwrap();
        // (5 + 1 + 1) / 3 = 2.33
        assert_eq!(ids(&view.current_view().items), vec![2, 4, 10]);
    }

    #[test]
    fn test_review_changes_rating_sort() {
        let mut view = controller();
        view.set_sort(SortKey::RatingDesc);
        view.submit_review(6, "Lee", 5, "Amazing jackfruit").unwrap();
        let top: Vec<u32> = ids(&view.current_view().items)[..4].to_vec();
        assert_eq!(top, vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_review_keeps_page() {
        let mut view = controller();
        view.next_page();
        view.submit_review(8, "Sam", 5, "Lovely").unwrap();
        assert_eq!(view.state().page, 2);
    }

    #[test]
    fn test_review_steps_back_when_page_disappears() {
        let config = FinderConfig {
            page_size: 2,
            ..FinderConfig::default()
        };
        let mut view = ViewController::from_config(&config, InMemoryKeyValueStore::new()).unwrap();
        view.set_criteria(FilterCriteria::default().with_min_rating(4.0));
        // 1, 2, 5, 7, 9, 10 over three pages
        view.next_page();
        view.next_page();
        assert_eq!(view.state().page, 3);

        view.submit_review(9, "Ann", 1, "Burnt").unwrap();
        view.submit_review(10, "Ann", 1, "Soggy").unwrap();
        // 1, 2, 5, 7 over two pages
        assert_eq!(view.state().page, 2);
        assert_eq!(ids(&view.current_view().items), vec![5, 7]);
    }

    #[test]
    fn test_invalid_review_is_rejected_and_not_applied() {
        let mut view = controller();
        let err = view.submit_review(3, "Pat", 0, "Great value").unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(view.restaurant_details(3).unwrap().reviews.len(), 0);

        let err = view.submit_review(3, "", 4, "   ").unwrap_err();
        match err {
            FinderError::Validation(e) => assert_eq!(e.fields(), vec!["author", "text"]),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_review_form_payload() {
        let mut view = controller();
        let updated = view
            .submit_review_form(
                7,
                json!({"author": " Gia ", "rating": "2", "text": "Soggy base", "extra": 1}),
            )
            .unwrap();
        assert_eq!(updated.reviews[0], Review::new("Gia", 2, "Soggy base"));
        assert_eq!(updated.rating, 3.0);
    }

    #[test]
    fn test_raw_payload_with_bad_values_not_stored() {
        let mut view = controller();
        for payload in [
            json!({"author": "", "rating": 0, "text": ""}),
            json!({"author": " ", "rating": 200, "text": ""}),
            json!({"author": "Pat", "rating": 0, "text": "Fine"}),
        ] {
            let err = view.submit_review_form(3, payload).unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_ERROR");
        }

        let details = view.restaurant_details(3).unwrap();
        assert!(details.reviews.is_empty());
        assert_eq!(details.card.rating, 0.0);
    }

    #[test]
    fn test_quarter_rating_displays_rounded_up() {
        let mut view = controller();
        for rating in [4, 4, 5, 4] {
            view.submit_review(3, "Pat", rating, "Solid").unwrap();
        }

        let details = view.restaurant_details(3).unwrap();
        assert_eq!(details.card.rating, 4.25);
        assert_eq!(details.card.display_rating, "4.3");
    }

    #[test]
    fn test_review_for_unknown_restaurant() {
        let mut view = controller();
        let err = view.submit_review(42, "Pat", 4, "Great value").unwrap_err();
        assert_eq!(err.error_code(), "RESTAURANT_NOT_FOUND");
    }
}

// =============================================================================
// Change notifications
// =============================================================================

mod event_tests {
    use super::*;

    #[test]
    fn test_intents_publish_events() {
        let mut view = controller();
        let mut rx = view.subscribe();

        view.set_criteria(FilterCriteria::default().with_price(2));
        view.toggle_favourite(4);
        view.submit_review(4, "Kai", 5, "Great").unwrap();

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                FinderEvent::ViewChanged {
                    page: 1,
                    total: 5,
                    sort: SortKey::Relevance,
                },
                FinderEvent::FavouriteToggled {
                    restaurant_id: 4,
                    favourite: true,
                },
                FinderEvent::ReviewAdded {
                    restaurant_id: 4,
                    rating: 5.0,
                    review_count: 1,
                },
                FinderEvent::ViewChanged {
                    page: 1,
                    total: 5,
                    sort: SortKey::Relevance,
                },
            ]
        );
    }

    #[test]
    fn test_rejected_intents_publish_nothing() {
        let mut view = controller();
        let mut rx = view.subscribe();

        assert!(!view.prev_page());
        assert_eq!(view.toggle_favourite(99), None);
        assert!(view.submit_review(1, "Pat", 7, "x").is_err());

        assert!(drain(&mut rx).is_empty());
    }
}
