// file: src/api/mod.rs
// description: remote service access module exports
// reference: internal module structure

pub mod client;
pub mod pager;
pub mod transport;

pub use client::OsuClassyClient;
pub use pager::{BeatmapCatalog, BeatmapPager, ListingKind};
pub use transport::{PredictionRequest, PredictionTransport, classify_response};
