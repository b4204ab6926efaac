#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Registration and lookup tests.

use std::sync::Arc;

use menubuilder::menu::MenuOptions;
use menubuilder::{ContentEntry, ErrorKind, ErrorMode, MenuEntry, MenuItem, MenuRegistry, Severity};
use menubuilder_test_utils::{entry_json, main_menu};

#[test]
fn test_duplicate_endpoints_strict() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    let err = registry
        .add_entry("main", MenuEntry::new("Root", "root"))
        .unwrap_err();
    assert_eq!(err.severity, Severity::Fatal);
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateEndpoint {
            menu: "main".into(),
            endpoint: "root".into()
        }
    );
    assert_eq!(registry.len("main").unwrap(), 3);
}

#[test]
fn test_duplicate_endpoints_lenient() {
    let mut registry = main_menu(ErrorMode::Lenient).unwrap();
    let err = registry
        .add_entry("main", MenuEntry::new("Root", "root"))
        .unwrap_err();
    assert_eq!(err.severity, Severity::Advisory);
    assert_eq!(registry.len("main").unwrap(), 3);
}

#[test]
fn test_wrong_menu_item_type() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    let err = registry
        .add_item_value("main", &serde_json::json!({"endpoint": "foo"}))
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(!registry.has_endpoint("foo", None).unwrap());
    assert_eq!(registry.len("main").unwrap(), 3);
}

#[test]
fn test_item_value_added_to_menu() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    let item = registry
        .add_item_value("main", &entry_json("Blog", "blog", 4))
        .unwrap();
    assert_eq!(item.title(), Some("Blog"));
    assert_eq!(item.priority(), 4);
    assert!(registry.has_endpoint("blog", Some("main")).unwrap());
}

#[test]
fn test_prebuilt_item_returns_same_entry() {
    let mut registry = MenuRegistry::new();
    registry.create_menu("main").unwrap();

    let entry: Arc<dyn MenuItem> = Arc::new(MenuEntry::new("One", "one").with_id("first"));
    let added = registry.add_item("main", Arc::clone(&entry)).unwrap();
    assert!(Arc::ptr_eq(&entry, &added));
    assert!(registry.has_entry_by_id("first", Some("main")).unwrap());
}

#[test]
fn test_prebuilt_item_does_not_create_menu() {
    let mut registry = MenuRegistry::new();
    let err = registry
        .add_item("main", Arc::new(ContentEntry::new("x")))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownMenu("main".into()));
    assert!(registry.menu_names().is_empty());
}

#[test]
fn test_create_menu_with_options_then_add() {
    let mut registry = MenuRegistry::new().with_mode(ErrorMode::Strict);
    registry
        .create_menu_with(
            "footer",
            MenuOptions {
                id: Some("footer-nav".into()),
                ..MenuOptions::default()
            },
        )
        .unwrap();
    assert!(registry.create_menu("footer").unwrap_err().is_fatal());

    registry
        .add_entry("footer", MenuEntry::new("About", "about"))
        .unwrap();
    assert_eq!(registry.len("footer").unwrap(), 1);
}

#[test]
fn test_lookups_on_unknown_menu() {
    let registry = main_menu(ErrorMode::Lenient).unwrap();
    for err in [
        registry.has_endpoint("root", Some("side")).unwrap_err(),
        registry.has_entry_by_id("x", Some("side")).unwrap_err(),
        registry.len("side").unwrap_err(),
    ] {
        assert_eq!(err.kind, ErrorKind::UnknownMenu("side".into()));
        assert!(!err.is_fatal());
    }
}

#[test]
fn test_sorted_items_order() {
    let registry = main_menu(ErrorMode::Strict).unwrap();
    let titles: Vec<_> = registry
        .sorted_items("main")
        .unwrap()
        .iter()
        .map(|item| item.title().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Root", "One", "Two"]);
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MenuRegistry>();
}
