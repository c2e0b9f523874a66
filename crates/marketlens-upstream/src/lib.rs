//! Upstream marketplace search: the query dispatcher, the two raw response
//! shapes it may return, and the normalizer that turns either shape into
//! canonical [`marketlens_core::Product`] records.

pub mod client;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

mod parse;

pub use client::{SearchClient, SearchResults, SearchWindow, UpstreamSettings};
pub use error::UpstreamError;
pub use normalize::{normalize_response, normalize_value};
pub use session::{SearchOutcome, SearchSession};
pub use types::{FlatSearchResponse, ListingSearchResponse, RawSearchResponse};
