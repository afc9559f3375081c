//! Navigation error taxonomy.

use thiserror::Error;

use crate::bundle::fetcher::FetchError;
use crate::document::DocumentError;
use crate::routing::table::PageId;

/// Errors raised while resolving a navigation.
///
/// None of these is fatal: unknown routes fall back to the home page, missing
/// bundles redirect home, render failures are reported to the user.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The hash does not match any route.
    #[error("no route for path '{0}'")]
    UnknownRoute(String),

    /// The page markup could not be fetched.
    #[error("bundle for page '{page}' not found: {source}")]
    BundleNotFound {
        page: PageId,
        #[source]
        source: FetchError,
    },

    /// The page could not be rendered into the document.
    #[error("failed to render page '{page}': {source}")]
    Render {
        page: PageId,
        #[source]
        source: DocumentError,
    },
}

/// Result type for navigation operations.
pub type RouterResult<T> = Result<T, RouterError>;
