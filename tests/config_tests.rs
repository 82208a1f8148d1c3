//! Loading configuration from YAML files

use std::fs;
use tablefinder::prelude::*;

#[test]
fn test_load_from_file_with_custom_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finder.yaml");
    fs::write(
        &path,
        r#"
page_size: 1
default_sort: name
restaurants:
  - id: 100
    name: Zest
    cuisine: fusion
    price: 2
    description: Citrus-forward small plates
    image: "🍋"
  - id: 101
    name: Ember
    cuisine: american
    price: 3
    description: Wood-fired grill
    image: "🔥"
    reviews:
      - author: Jo
        rating: 5
        text: Smoky perfection
"#,
    )
    .unwrap();

    let config = FinderConfig::from_yaml_file(path.to_str().unwrap()).unwrap();
    let mut view = ViewController::from_config(&config, InMemoryKeyValueStore::new()).unwrap();

    let first = view.current_view();
    assert_eq!(first.total, 2);
    assert_eq!(first.items[0].name, "Ember");
    assert_eq!(first.items[0].rating, 5.0);

    assert!(view.next_page());
    assert_eq!(view.current_view().items[0].name, "Zest");
    assert!(!view.next_page());
}

#[test]
fn test_parse_error_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "page_size: [oops").unwrap();

    let err = FinderConfig::from_yaml_file(path.to_str().unwrap()).unwrap_err();
    match err {
        FinderError::Config(ConfigError::ParseError { file, .. }) => {
            assert!(file.unwrap().ends_with("broken.yaml"))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_ids_rejected_at_startup() {
    let yaml = r#"
restaurants:
  - {id: 1, name: A, cuisine: thai, price: 1, description: a, image: x}
  - {id: 1, name: B, cuisine: thai, price: 1, description: b, image: y}
"#;
    let config = FinderConfig::from_yaml_str(yaml).unwrap();
    let err = ViewController::from_config(&config, InMemoryKeyValueStore::new())
        .err()
        .unwrap();
    assert!(err.to_string().contains("unique"));
}

#[test]
fn test_out_of_range_seed_review_rejected() {
    let yaml = r#"
restaurants:
  - id: 1
    name: A
    cuisine: thai
    price: 1
    description: a
    image: x
    reviews:
      - {author: Q, rating: 9, text: wow}
"#;
    let err = FinderConfig::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("reviews.rating"));
}
