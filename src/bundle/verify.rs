//! Route table bundle verification.
//!
//! Every page a route points at must have markup at its conventional path.
//! This fetches all of them concurrently and reports which are missing.

use futures_util::future::join_all;
use serde::Serialize;

use crate::bundle::fetcher::BundleFetcher;
use crate::bundle::paths::BundleLayout;
use crate::routing::table::{PageId, RouteTable};

/// Verification result for one page.
#[derive(Debug, Clone, Serialize)]
pub struct BundleCheck {
    pub page: PageId,
    pub markup: String,
    /// `None` when the markup was fetched, otherwise the failure.
    pub error: Option<String>,
}

impl BundleCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetch the markup of every routed page.
pub async fn verify_bundles(
    table: &RouteTable,
    fetcher: &dyn BundleFetcher,
    layout: &BundleLayout,
) -> Vec<BundleCheck> {
    let checks = table.pages().into_iter().map(|page| async move {
        let markup = layout.paths(&page).markup;
        let error = match fetcher.fetch_markup(&markup).await {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(page = %page, error = %e, "Page bundle missing");
                Some(e.to_string())
            }
        };
        BundleCheck { page, markup, error }
    });

    join_all(checks).await
}
