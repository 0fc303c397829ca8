//! Remote asset retrieval.

pub mod fetch;

pub use fetch::{ensure_font, AssetFetcher, FontOutcome, HttpFetcher};
