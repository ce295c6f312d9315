//! Dataset catalog search models shared by the search layer and its callers.

extern crate serde;


pub mod dataset;
pub mod search_options;
pub mod search_result;
