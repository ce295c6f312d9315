//! Search engine access: document vocabulary, wire types and transport.

pub mod elastic_utils;
pub mod raw_dataset;
