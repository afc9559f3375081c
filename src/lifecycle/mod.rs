//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     Ctrl-C → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscribed run loop exits its select
//! ```
//!
//! # Design Decisions
//! - One broadcast channel, subscribed before the loops start
//! - In-flight page loads are not awaited; they finish or are dropped with the runtime

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_ctrl_c;
