use super::stub::{first_item_id, storefront, storefront_with};
use crate::command::{Command, CommandOutcome};
use crate::config::Config;
use crate::history::NavigateMode;

fn toggle(key: &str, value: &str) -> Command {
    Command::Toggle {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn facet_click_then_page_click_follows_the_address() {
    let (mut app, catalog) = storefront("/products?search=shoe&color=red&page=2");
    app.open();
    app.settle().await;

    let outcome = app.execute(toggle("color", "blue")).expect("toggle");
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(
        app.address().to_string(),
        "/products?search=shoe&color=red&color=blue"
    );

    app.execute(Command::Page { page: 3 }).expect("page");
    assert_eq!(
        app.address().to_string(),
        "/products?search=shoe&color=red&color=blue&page=3"
    );
    app.settle().await;

    assert_eq!(first_item_id(&app).as_deref(), Some("p3-shoe"));
    let calls = catalog.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].page, 1);
    assert_eq!(
        calls[2].filters.get("color").map(|value| value.values().to_vec()),
        Some(vec!["red".to_string(), "blue".to_string()])
    );
}

#[tokio::test]
async fn drawer_toggle_is_visible_from_the_sidebar() {
    let (mut app, _catalog) = storefront("/products?color=red");
    app.open();

    app.execute(Command::OpenDrawer).expect("open drawer");
    app.execute(toggle("color", "green")).expect("drawer toggle");
    app.execute(Command::CloseDrawer).expect("close drawer");
    assert!(!app.drawer_open());

    // The sidebar reads the same address the drawer just wrote.
    assert_eq!(app.model().selected("color"), ["red", "green"]);
    app.execute(toggle("color", "green")).expect("sidebar toggle");
    assert_eq!(app.model().selected("color"), ["red"]);
}

#[tokio::test]
async fn noop_intent_records_no_history_and_issues_no_query() {
    let (mut app, catalog) = storefront("/products?color=red");
    app.open();
    app.settle().await;
    let entries = app.history().entry_count();

    let outcome = app
        .execute(Command::Clear {
            key: "size".to_string(),
        })
        .expect("clear");
    assert_eq!(outcome, CommandOutcome::Noop);
    assert_eq!(
        app.execute(Command::ClearSearch).expect("clear search"),
        CommandOutcome::Noop
    );

    assert_eq!(app.history().entry_count(), entries);
    assert_eq!(catalog.calls().len(), 1);
}

#[tokio::test]
async fn chip_removal_by_position_keeps_the_page() {
    let (mut app, _catalog) = storefront("/products?color=red&color=blue&color=green&page=3");
    app.open();

    app.execute(Command::Remove {
        key: "color".to_string(),
        index: Some(1),
    })
    .expect("remove");
    assert_eq!(
        app.address().to_string(),
        "/products?color=red&color=green&page=3"
    );

    let outcome = app
        .execute(Command::Remove {
            key: "color".to_string(),
            index: Some(9),
        })
        .expect("remove out of range");
    assert_eq!(outcome, CommandOutcome::Noop);
}

#[tokio::test]
async fn toggling_twice_restores_the_model() {
    let (mut app, _catalog) = storefront("/products?search=boot&size=9");
    app.open();
    let before = app.model();

    app.execute(toggle("color", "red")).expect("first toggle");
    app.execute(toggle("color", "red")).expect("second toggle");

    assert_eq!(app.model(), before);
    assert_eq!(app.history().entry_count(), 3);
}

#[tokio::test]
async fn back_and_forward_requery_the_restored_address() {
    let (mut app, catalog) = storefront("/products?search=shoe");
    app.open();
    app.settle().await;

    app.execute(Command::Page { page: 2 }).expect("page");
    app.settle().await;
    assert_eq!(first_item_id(&app).as_deref(), Some("p2-shoe"));

    assert_eq!(app.execute(Command::Back).expect("back"), CommandOutcome::Applied);
    assert_eq!(app.address().to_string(), "/products?search=shoe");
    app.settle().await;
    assert_eq!(first_item_id(&app).as_deref(), Some("p1-shoe"));

    assert_eq!(
        app.execute(Command::Forward).expect("forward"),
        CommandOutcome::Applied
    );
    app.settle().await;
    assert_eq!(first_item_id(&app).as_deref(), Some("p2-shoe"));
    assert_eq!(
        app.execute(Command::Forward).expect("forward at end"),
        CommandOutcome::Noop
    );
    assert_eq!(catalog.calls().len(), 4);
}

#[tokio::test]
async fn replace_mode_keeps_a_single_history_entry() {
    let mut config = Config::default();
    config.history.mode = NavigateMode::Replace;
    let (mut app, _catalog) = storefront_with("/products", config);
    app.open();

    app.execute(toggle("color", "red")).expect("toggle");
    app.execute(Command::Search {
        term: "hat".to_string(),
    })
    .expect("search");

    assert_eq!(app.address().to_string(), "/products?color=red&search=hat");
    assert_eq!(app.history().entry_count(), 1);
    assert_eq!(app.execute(Command::Back).expect("back"), CommandOutcome::Noop);
}

#[tokio::test]
async fn non_listing_route_stays_idle() {
    let (mut app, catalog) = storefront("/cart?color=red");
    app.open();
    app.settle().await;

    assert!(catalog.calls().is_empty());
    assert!(app.render().contains("not a listing route"));
}
