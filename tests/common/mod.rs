//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use spa_router::bundle::{BundleLayout, MemoryFetcher};
use spa_router::routing::RouteTable;
use spa_router::services::{LoadingIndicator, Notifier, Severity};
use spa_router::{Router, RouterConfig};

/// Start a page backend serving `pages` by request path; anything else is a 404.
///
/// Returns the bound address and a per-path request counter.
#[allow(dead_code)]
pub async fn start_page_backend(
    pages: HashMap<String, String>,
) -> (SocketAddr, Arc<Mutex<HashMap<String, usize>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let pages = Arc::new(pages);
    let hits = Arc::new(Mutex::new(HashMap::new()));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let pages = pages.clone();
                    let hits = hits.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let request = String::from_utf8_lossy(&buf);
                        let path = request
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();
                        *hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

                        let (status, body) = match pages.get(&path) {
                            Some(body) => ("200 OK", body.clone()),
                            None => ("404 Not Found", "Not Found".to_string()),
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, counter)
}

/// Markup for every routed page in the default config, keyed by markup path.
#[allow(dead_code)]
pub fn default_pages() -> HashMap<String, String> {
    let config = RouterConfig::default();
    let layout = BundleLayout::default();
    RouteTable::from_config(&config.routes)
        .pages()
        .into_iter()
        .map(|page| (layout.paths(&page).markup, format!("<main data-page=\"{page}\"></main>")))
        .collect()
}

/// In-memory fetcher holding every page of the default config.
#[allow(dead_code)]
pub fn memory_fetcher() -> Arc<MemoryFetcher> {
    let fetcher = Arc::new(MemoryFetcher::new());
    for (path, markup) in default_pages() {
        fetcher.insert(path, markup);
    }
    fetcher
}

/// Loading indicator that counts calls.
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub shown: AtomicUsize,
    pub hidden: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingIndicator {
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for RecordingIndicator {
    fn show(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that keeps every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<(String, Severity)>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn taken(&self) -> Vec<(String, Severity)> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notifications
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

/// Router over `fetcher` with recording collaborators attached.
#[allow(dead_code)]
pub fn recording_router(
    config: &RouterConfig,
    fetcher: Arc<MemoryFetcher>,
) -> (Router, Arc<RecordingIndicator>, Arc<RecordingNotifier>) {
    let indicator = Arc::new(RecordingIndicator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let router = Router::new(config, fetcher)
        .with_loading_indicator(indicator.clone())
        .with_notifier(notifier.clone());
    (router, indicator, notifier)
}

/// One captured log record: level plus `name=value` fields, message first.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub fields: String,
}

/// Layer that keeps every event it sees.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

#[allow(dead_code)]
impl CapturedLogs {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Records at `level` whose fields contain every needle.
    pub fn matching(&self, level: Level, needles: &[&str]) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level && needles.iter().all(|n| r.fields.contains(n)))
            .collect()
    }
}

#[allow(dead_code)]
struct FieldWriter<'a>(&'a mut String);

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={:?}", field.name(), value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={}", field.name(), value));
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = String::new();
        event.record(&mut FieldWriter(&mut fields));
        self.records.lock().unwrap().push(LogRecord {
            level: *event.metadata().level(),
            fields,
        });
    }
}
