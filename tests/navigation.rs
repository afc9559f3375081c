//! Navigation behaviour against in-memory bundles.

use std::sync::Arc;
use std::time::Duration;

use spa_router::document::Document;
use spa_router::routing::RouteTable;
use spa_router::services::Severity;
use spa_router::{Navigation, PageId, RouterConfig, RouterEvent};

mod common;

#[tokio::test]
async fn test_every_route_loads_its_page() {
    let config = RouterConfig::default();
    let (router, _, _) = common::recording_router(&config, common::memory_fetcher());

    for (path, page) in RouteTable::from_config(&config.routes).entries() {
        router.navigate_to(path);
        router.resolve().await;
        assert_eq!(router.current_page().as_ref(), Some(page), "path {path}");
        assert_eq!(router.current_hash(), path);
    }
}

#[tokio::test]
async fn test_no_hash_resolves_home() {
    let config = RouterConfig::default();
    let (router, _, _) = common::recording_router(&config, common::memory_fetcher());

    assert_eq!(router.current_hash(), "/home");
    assert_eq!(router.current_page(), None);

    router.resolve().await;
    assert_eq!(router.current_page(), Some(PageId::from("home")));
    assert_eq!(router.document().active_nav_items(), vec!["home"]);
}

#[tokio::test]
async fn test_unmapped_path_loads_home() {
    let config = RouterConfig::default();
    let (router, _, notifier) = common::recording_router(&config, common::memory_fetcher());

    router.navigate_to("/nope/deeper");
    let outcome = router.resolve().await;

    assert_eq!(outcome.loaded_page(), Some(&PageId::from("home")));
    assert_eq!(router.current_page(), Some(PageId::from("home")));
    assert!(notifier.taken().is_empty());
}

#[tokio::test]
async fn test_current_page_is_noop() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    let (router, indicator, _) = common::recording_router(&config, fetcher.clone());
    let mut events = router.subscribe();

    router.resolve().await;
    let outcome = router.resolve().await;

    assert_eq!(outcome, Navigation::Unchanged { page: "home".into() });
    assert_eq!(fetcher.total_fetches(), 1);
    assert_eq!(indicator.shown(), 1);
    assert_eq!(indicator.hidden(), 1);

    assert!(matches!(events.try_recv(), Ok(RouterEvent::RouteChanged { .. })));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_double_navigate_fetches_once() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    let (router, _, _) = common::recording_router(&config, fetcher.clone());

    router.navigate_to("/escorts");
    router.resolve().await;
    router.navigate_to("/escorts");
    router.resolve().await;

    assert_eq!(
        fetcher.fetch_count("/pages/escort-selection/escort-selection.html"),
        1
    );
}

#[tokio::test]
async fn test_missing_bundle_redirects_home() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    fetcher.remove("/pages/about/about.html");
    let (router, indicator, notifier) = common::recording_router(&config, fetcher.clone());

    router.navigate_to("/about");
    let outcome = router.resolve().await;

    match outcome {
        Navigation::Redirected { failed, outcome } => {
            assert_eq!(failed, PageId::from("about"));
            assert_eq!(outcome.loaded_page(), Some(&PageId::from("home")));
        }
        other => panic!("expected redirect, got {other:?}"),
    }
    assert_eq!(router.current_page(), Some(PageId::from("home")));
    assert_eq!(router.current_hash(), "/home");
    assert!(!router.registry().is_script_loaded(&"about".into()));
    assert!(notifier.taken().is_empty());
    assert_eq!(indicator.shown(), indicator.hidden());
}

#[tokio::test]
async fn test_missing_bundle_from_home_keeps_home_rendered() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    let (router, indicator, _) = common::recording_router(&config, fetcher.clone());
    let mut events = router.subscribe();

    router.resolve().await;
    let before = router.document();
    assert_eq!(
        before.container.as_deref(),
        Some("<main data-page=\"home\"></main>")
    );

    fetcher.remove("/pages/about/about.html");
    router.navigate_to("/about");
    let outcome = router.resolve().await;

    assert_eq!(
        outcome,
        Navigation::Redirected {
            failed: "about".into(),
            outcome: Box::new(Navigation::Unchanged { page: "home".into() }),
        }
    );
    assert_eq!(router.current_page(), Some(PageId::from("home")));
    assert_eq!(router.current_hash(), "/home");
    assert_eq!(router.document(), before);
    assert_eq!(fetcher.fetch_count("/pages/home/home.html"), 1);
    assert_eq!(indicator.shown(), indicator.hidden());

    // Only the initial navigation was announced
    assert!(matches!(events.try_recv(), Ok(RouterEvent::RouteChanged { .. })));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_missing_fallback_does_not_loop() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    fetcher.remove("/pages/about/about.html");
    fetcher.remove("/pages/home/home.html");
    let (router, indicator, notifier) = common::recording_router(&config, fetcher.clone());

    router.navigate_to("/about");
    let outcome = router.resolve().await;

    match outcome {
        Navigation::Redirected { failed, outcome } => {
            assert_eq!(failed, PageId::from("about"));
            assert!(matches!(*outcome, Navigation::Failed { ref page, .. } if *page == "home"));
        }
        other => panic!("expected redirect, got {other:?}"),
    }
    assert_eq!(fetcher.fetch_count("/pages/home/home.html"), 1);
    assert_eq!(fetcher.total_fetches(), 2);
    assert_eq!(router.current_page(), None);
    assert_eq!(indicator.shown(), 2);
    assert_eq!(indicator.hidden(), 2);

    let notes = notifier.taken();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].1, Severity::Error);
}

#[tokio::test]
async fn test_revisit_reuses_assets() {
    let config = RouterConfig::default();
    let (router, _, _) = common::recording_router(&config, common::memory_fetcher());
    let mut events = router.subscribe();

    for path in ["/home", "/about", "/home", "/about"] {
        router.navigate_to(path);
        router.resolve().await;
    }

    let doc = router.document();
    assert_eq!(doc.stylesheet_count("/pages/about/about.css"), 1);
    assert_eq!(doc.script_count("/pages/about/about.js"), 1);
    assert_eq!(doc.stylesheet_count("/pages/home/home.css"), 1);
    assert_eq!(router.registry().get(&"about".into()).unwrap().visits, 2);

    let mut route_changes = 0;
    let mut reinits = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            RouterEvent::RouteChanged { .. } => route_changes += 1,
            RouterEvent::PageReinit { page } => reinits.push(page),
        }
    }
    assert_eq!(route_changes, 4);
    assert_eq!(reinits, vec![PageId::from("home"), PageId::from("about")]);
}

#[tokio::test]
async fn test_route_changed_carries_page_and_hash() {
    let config = RouterConfig::default();
    let (router, _, _) = common::recording_router(&config, common::memory_fetcher());
    let mut events = router.subscribe();

    router.navigate_to("#/massage");
    router.resolve().await;

    assert_eq!(
        events.try_recv().unwrap(),
        RouterEvent::RouteChanged {
            page: "massage-parlours".into(),
            hash: "/massage".into(),
        }
    );
}

#[tokio::test]
async fn test_nav_highlight_and_title() {
    let config = RouterConfig::default();
    let (router, _, _) = common::recording_router(&config, common::memory_fetcher());

    router.navigate_to("/escorts");
    router.resolve().await;

    let doc = router.document();
    assert_eq!(doc.active_nav_items(), vec!["escorts"]);
    assert_eq!(doc.nav_items.len(), 4);
    assert_eq!(doc.title, "Escorts - Marketplace");
    assert_eq!(
        doc.container.as_deref(),
        Some("<main data-page=\"escort-selection\"></main>")
    );

    router.navigate_to("/escort-login");
    router.resolve().await;
    // No navigation item points at the login page
    assert!(router.document().active_nav_items().is_empty());
}

#[tokio::test]
async fn test_missing_container_notifies_and_keeps_state() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    let (router, indicator, notifier) = common::recording_router(&config, fetcher.clone());
    let router = router.with_document(Document::detached("app"));

    let outcome = router.resolve().await;

    assert!(matches!(outcome, Navigation::Failed { ref page, .. } if *page == "home"));
    assert_eq!(router.current_page(), None);
    assert_eq!(fetcher.total_fetches(), 0);
    assert_eq!(indicator.shown(), 1);
    assert_eq!(indicator.hidden(), 1);
    assert_eq!(
        notifier.taken(),
        vec![("Failed to load page: home".to_string(), Severity::Error)]
    );

    // A failed page is not "current"; resolving again retries
    router.resolve().await;
    assert_eq!(indicator.shown(), 2);
}

#[tokio::test]
async fn test_superseded_load_is_discarded() {
    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    fetcher.set_delay("/pages/about/about.html", Duration::from_millis(200));
    let (router, indicator, _) = common::recording_router(&config, fetcher.clone());
    let router = Arc::new(router);
    router.resolve().await;

    router.navigate_to("/about");
    let slow = tokio::spawn({
        let router = router.clone();
        async move { router.resolve().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    router.navigate_to("/escorts");
    let fast = router.resolve().await;
    assert_eq!(fast.loaded_page(), Some(&PageId::from("escort-selection")));

    let slow = slow.await.unwrap();
    assert_eq!(slow, Navigation::Superseded { page: "about".into() });

    assert_eq!(router.current_page(), Some(PageId::from("escort-selection")));
    let doc = router.document();
    assert_eq!(doc.active_nav_items(), vec!["escorts"]);
    assert_eq!(doc.script_count("/pages/about/about.js"), 0);
    assert_eq!(indicator.shown(), indicator.hidden());
}

#[tokio::test]
async fn test_last_resolved_wins_without_tokens() {
    let mut config = RouterConfig::default();
    config.navigation.discard_stale_loads = false;
    let fetcher = common::memory_fetcher();
    fetcher.set_delay("/pages/about/about.html", Duration::from_millis(200));
    let (router, _, _) = common::recording_router(&config, fetcher.clone());
    let router = Arc::new(router);
    router.resolve().await;

    router.navigate_to("/about");
    let slow = tokio::spawn({
        let router = router.clone();
        async move { router.resolve().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    router.navigate_to("/escorts");
    router.resolve().await;
    slow.await.unwrap();

    // The slower load finished last and overwrote the newer page
    assert_eq!(router.current_page(), Some(PageId::from("about")));
    assert_eq!(router.document().title, "About - Marketplace");
}
