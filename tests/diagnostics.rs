//! Log output of failed navigations.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use spa_router::{Navigation, RouterConfig};

mod common;

#[tokio::test]
async fn test_missing_bundle_logs_warning() {
    let logs = common::CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(logs.clone()));

    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    fetcher.remove("/pages/about/about.html");
    let (router, _, _) = common::recording_router(&config, fetcher);

    router.navigate_to("/about");
    let outcome = router.resolve().await;
    assert!(matches!(outcome, Navigation::Redirected { .. }));

    let warnings = logs.matching(Level::WARN, &["page=about", "not found"]);
    assert_eq!(warnings.len(), 1, "{:?}", logs.records());
    assert!(warnings[0].fields.contains("/pages/about/about.html"));
}

#[tokio::test]
async fn test_missing_fallback_logs_error() {
    let logs = common::CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(logs.clone()));

    let config = RouterConfig::default();
    let fetcher = common::memory_fetcher();
    fetcher.remove("/pages/home/home.html");
    let (router, _, notifier) = common::recording_router(&config, fetcher);

    router.resolve().await;

    assert_eq!(logs.matching(Level::ERROR, &["page=home"]).len(), 1);
    assert!(logs.matching(Level::WARN, &["redirecting home"]).is_empty());
    assert_eq!(notifier.taken().len(), 1);
}
