//! Watch mode for mdeck.
//!
//! The `mdeck` binary handles the one-shot commands itself; this library holds
//! the long-running pieces: a debounced file watcher, the regeneration step with
//! its reload stamp, and the small HTTP server that browsers poll to learn that
//! a new deck was written.

pub mod error;
pub mod regenerate;
pub mod server;
pub mod watch;

pub use error::{Error, Result};
pub use regenerate::{ReloadStamp, Regenerator};
pub use server::{reload_url, run_watch, ServeConfig};
