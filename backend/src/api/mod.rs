//! Dataset search API.

pub mod dataset_fetcher;
pub mod search;
