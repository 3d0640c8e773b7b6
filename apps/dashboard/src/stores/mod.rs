//! Client-side state shared between views: the signed-in user and the
//! per-job resume filters. Both are plain owned values; whoever holds the
//! store is its only writer.

pub mod auth;
pub mod filter;

pub use auth::{AuthGate, AuthStore};
pub use filter::{filter_key, load_filters, save_filters, FilterStore};
