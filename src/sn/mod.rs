// Stacker News — the destination platform.
//
// `client` talks to the GraphQL API, `types` holds the wire shapes,
// `traits` defines the seam the cross-poster posts through.

pub mod client;
pub mod traits;
pub mod types;

pub use client::{item_link, SnClient};
pub use traits::Destination;
