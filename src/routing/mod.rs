//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location hash change (#/about)
//!     → hash.rs (strip '#', default to the home path)
//!     → table.rs (path → PageId, unknown → fallback page)
//!     → state.rs (skip if already the target, else issue a token)
//!     → bundle loader (fetch markup, attach assets)
//!     → router.rs (commit, highlight navigation, set title, publish RouteChanged)
//! ```
//!
//! # Design Decisions
//! - Route table is built once from config and never mutated
//! - Resolution is idempotent per page: re-resolving the current page does nothing
//! - The hash is the only input; navigation goes through `Location`

pub mod error;
pub mod hash;
pub mod location;
pub mod router;
pub mod state;
pub mod table;
pub mod titles;

pub use error::{RouterError, RouterResult};
pub use location::Location;
pub use router::{Navigation, Router};
pub use state::{NavigationState, NavigationToken};
pub use table::{PageId, RouteTable};
pub use titles::PageTitles;
