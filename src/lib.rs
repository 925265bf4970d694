// Kindling: cross-posts trending Hacker News stories to Stacker News.
//
// This is the library root. The orchestrator lives in `scheduler` and
// `poster`; `hn`, `sn` and `discord` are the thin platform clients.

pub mod config;
pub mod discord;
pub mod error;
pub mod hn;
pub mod poster;
pub mod scheduler;
pub mod sn;
pub mod timefmt;
pub mod watch;

pub use error::{Error, Result};
