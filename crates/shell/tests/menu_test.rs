#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end menu derivation through the real pipeline.

mod common;

use common::TestApp;
use portico_shell::router::RouteTarget;
use portico_test_utils::{manifest_json, test_remote};

/// Two sidebar remotes in one category: the menu shows one category with
/// both items in order, and the router gains two lazy entries before the
/// wildcard.
#[tokio::test]
async fn two_remote_scenario() {
    let app = TestApp::with_manifest(manifest_json(vec![
        test_remote("alerts")
            .with_category("Ops")
            .with_order(1)
            .with_route("/alerts", None),
        test_remote("billing")
            .with_category("Ops")
            .with_order(2)
            .with_route("/billing", None),
    ]))
    .await;

    let (status, categories) = app.get_json("/api/menu/categories").await;
    assert_eq!(status, 200);
    assert_eq!(categories, serde_json::json!(["Ops"]));

    let (_, items) = app.get_json("/api/menu/categories/Ops").await;
    let names: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alerts", "billing"]);

    let entries = app.state.routes().entries();
    let lazy: Vec<_> = entries
        .iter()
        .filter(|e| matches!(e.target, RouteTarget::Lazy { .. }))
        .collect();
    assert_eq!(lazy.len(), 2);
    assert!(entries.last().unwrap().is_wildcard());
}

#[tokio::test]
async fn tree_nests_children_and_promotes_orphans() {
    let app = TestApp::with_manifest(manifest_json(vec![
        test_remote("finance").with_order(1),
        test_remote("invoices").with_parent("finance").with_order(1),
        test_remote("stranded").with_parent("no-such-parent").with_order(2),
    ]))
    .await;

    let (status, tree) = app.get_json("/api/menu").await;
    assert_eq!(status, 200);

    let roots = tree.as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["name"], "finance");
    assert_eq!(roots[0]["children"][0]["name"], "invoices");
    // The orphan is promoted to a root rather than dropped.
    assert_eq!(roots[1]["name"], "stranded");
}

#[tokio::test]
async fn menu_items_carry_defaults_and_overrides() {
    let app = TestApp::with_manifest(manifest_json(vec![
        test_remote("plain"),
        test_remote("fancy")
            .with_label("Fancy Module")
            .with_order(1)
            .with_badge("new"),
    ]))
    .await;

    let (_, tree) = app.get_json("/api/menu").await;
    let roots = tree.as_array().unwrap();

    let fancy = &roots[0];
    assert_eq!(fancy["label"], "Fancy Module");
    assert_eq!(fancy["badge"], "new");
    assert_eq!(fancy["order"], 1);

    let plain = &roots[1];
    assert_eq!(plain["label"], "Plain");
    assert_eq!(plain["icon"], "plain");
    assert_eq!(plain["order"], 999);
    assert_eq!(plain["category"], "Other");
    assert_eq!(plain["visible"], true);
    assert_eq!(plain["basePath"], "/plain");
    assert!(plain.get("badge").is_none());
}

#[tokio::test]
async fn sidebar_flag_excludes_remotes_from_menu_but_not_routes() {
    let app = TestApp::with_manifest(manifest_json(vec![
        test_remote("visible").with_route("/visible", None),
        test_remote("headless")
            .not_in_sidebar()
            .with_route("/headless", None),
    ]))
    .await;

    let (_, tree) = app.get_json("/api/menu").await;
    let roots = tree.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["name"], "visible");

    // Route registration is independent of menu eligibility.
    assert!(app.state.routes().match_path("/headless").is_some());
    let matched = app.state.routes().match_path("/headless").unwrap();
    assert!(!matched.entry.is_wildcard());
}
