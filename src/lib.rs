//! Vendor search client library.
//!
//! Turns loosely-shaped JSON from the vendor search backend into scored,
//! sorted results, and derives facet counts and filtered views over a vendor
//! catalog.

pub mod browse;
pub mod core;
pub mod search;
