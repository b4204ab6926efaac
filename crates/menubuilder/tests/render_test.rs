#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Menu rendering tests against the shared "main" fixture.

use menubuilder::{ContentEntry, ErrorMode, ListKind, MenuEntry, Markup, RenderError, Rule};
use menubuilder_test_utils::{expected_item, main_menu, main_menu_with_visible, render_for};

fn list(tag: &str, items: &[String]) -> String {
    format!("<{tag}>{}</{tag}>", items.join("\n"))
}

#[test]
fn test_render_ol() {
    let registry = main_menu(ErrorMode::Strict).unwrap();
    let output = render_for(&registry, "main", ListKind::Ordered, "root").unwrap();
    assert_eq!(
        output,
        list(
            "ol",
            &[
                expected_item("Root", "/", true),
                expected_item("One", "/one", false),
                expected_item("Two", "/two", false),
            ]
        )
    );
}

#[test]
fn test_render_ul() {
    let registry = main_menu(ErrorMode::Strict).unwrap();
    let output = render_for(&registry, "main", ListKind::Unordered, "root").unwrap();
    assert_eq!(
        output,
        "<ul class=\"active\"><li class=\"active\"><a class=\"active\" href=\"/\">Root</a></li>\n\
         <li class=\"inactive\"><a class=\"inactive\" href=\"/one\">One</a></li>\n\
         <li class=\"inactive\"><a class=\"inactive\" href=\"/two\">Two</a></li></ul>"
    );
}

#[test]
fn test_render_route_one_active() {
    let registry = main_menu(ErrorMode::Strict).unwrap();
    let output = render_for(&registry, "main", ListKind::Ordered, "one").unwrap();
    assert_eq!(
        output,
        list(
            "ol",
            &[
                expected_item("Root", "/", false),
                expected_item("One", "/one", true),
                expected_item("Two", "/two", false),
            ]
        )
    );
}

#[test]
fn test_render_route_two_active() {
    let registry = main_menu(ErrorMode::Strict).unwrap();
    let output = render_for(&registry, "main", ListKind::Ordered, "two").unwrap();
    assert_eq!(
        output,
        list(
            "ol",
            &[
                expected_item("Root", "/", false),
                expected_item("One", "/one", false),
                expected_item("Two", "/two", true),
            ]
        )
    );
}

#[test]
fn test_visible_when() {
    let registry = main_menu_with_visible(ErrorMode::Strict).unwrap();

    let output = render_for(&registry, "main", ListKind::Ordered, "two").unwrap();
    assert!(!output.contains("Visible"));
    assert_eq!(output.matches("<li").count(), 3);

    let output = render_for(&registry, "main", ListKind::Ordered, "visible").unwrap();
    assert_eq!(
        output,
        list(
            "ol",
            &[
                expected_item("Root", "/", false),
                expected_item("One", "/one", false),
                expected_item("Two", "/two", false),
                expected_item("Visible under /visible only", "/visible", true),
            ]
        )
    );
}

#[test]
fn test_every_unique_entry_is_rendered_once() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    let endpoints = ["root", "one", "two", "visible"];
    for (n, endpoint) in endpoints.iter().enumerate() {
        registry
            .add_entry("bulk", MenuEntry::new(format!("Item {n}"), *endpoint))
            .unwrap();
    }
    let output = render_for(&registry, "bulk", ListKind::Ordered, "one").unwrap();
    assert_eq!(output.matches("<li").count(), endpoints.len());
    for n in 0..endpoints.len() {
        assert_eq!(output.matches(&format!(">Item {n}</a>")).count(), 1);
    }
}

#[test]
fn test_priority_then_title_order() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    registry
        .add_entry("order", MenuEntry::new("b", "one").with_priority(1))
        .unwrap();
    registry
        .add_entry("order", MenuEntry::new("z", "two").with_priority(-3))
        .unwrap();
    registry
        .add_entry("order", MenuEntry::new("a", "visible").with_priority(1))
        .unwrap();
    registry.add_entry("order", MenuEntry::new("m", "root")).unwrap();

    let output = render_for(&registry, "order", ListKind::Unordered, "root").unwrap();
    let titles: Vec<&str> = output
        .split("</a>")
        .filter_map(|chunk| chunk.rsplit('>').next())
        .filter(|t| !t.is_empty())
        .collect();
    assert_eq!(titles, vec!["z", "m", "a", "b"]);
}

#[test]
fn test_content_entries_render_inline() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    registry
        .add_entry(
            "main",
            ContentEntry::new(Markup::raw("<hr>"))
                .with_priority(10)
                .with_container_classes("divider"),
        )
        .unwrap();

    let output = render_for(&registry, "main", ListKind::Unordered, "root").unwrap();
    assert!(output.ends_with(
        "<li class=\"divider inactive\"><span class=\"inactive\"><hr></span></li></ul>"
    ));
}

#[test]
fn test_unroutable_endpoint_fails_render() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    registry
        .add_entry("main", MenuEntry::new("Post", "post"))
        .unwrap();

    let err = render_for(&registry, "main", ListKind::Ordered, "root").unwrap_err();
    assert!(matches!(err, RenderError::Url { ref endpoint, .. } if endpoint == "post"));
}

#[test]
fn test_hidden_unroutable_entry_is_not_resolved() {
    let mut registry = main_menu(ErrorMode::Strict).unwrap();
    registry
        .add_entry(
            "main",
            MenuEntry::new("Nowhere", "nowhere").with_visible_when(Rule::Never),
        )
        .unwrap();

    assert!(render_for(&registry, "main", ListKind::Ordered, "root").is_ok());
}
