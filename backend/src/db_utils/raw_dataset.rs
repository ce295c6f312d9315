//! Field vocabulary of the indexed catalog documents and their raw, array valued form.
//!
//! The index stores every property as an array of strings keyed by its vocabulary
//! IRI, with the dots of the IRI replaced by spaces. Exact-match variants of a field
//! live under `<field>.keyword`.

use serde::Deserialize;

pub const ID: &str = "@id";
pub const TYPE: &str = "http://www w3 org/1999/02/22-rdf-syntax-ns#type";
pub const NAME: &str = "https://colonialcollections nl/search#name";
pub const DESCRIPTION: &str = "https://colonialcollections nl/search#description";
pub const PUBLISHER_IRI: &str = "https://colonialcollections nl/search#publisherIri";
pub const PUBLISHER_NAME: &str = "https://colonialcollections nl/search#publisherName";
pub const LICENSE_IRI: &str = "https://colonialcollections nl/search#licenseIri";
pub const LICENSE_NAME: &str = "https://colonialcollections nl/search#licenseName";
pub const KEYWORD: &str = "https://colonialcollections nl/search#keyword";

/// Value of the type field for dataset documents.
pub const DATASET_TYPE: &str = "https://colonialcollections.nl/search#Dataset";

/// Score field the engine sorts on for relevance ordering.
pub const SCORE: &str = "_score";

pub fn keyword_field(field: &str) -> String {
    format!("{field}.keyword")
}

/// One `_source` document. Every field is optional at this level; which ones a
/// dataset requires is decided when the document is decoded.
///
/// The serde renames must stay equal to the field constants above.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDataset {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(rename = "https://colonialcollections nl/search#name", default)]
    pub name: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#description", default)]
    pub description: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#publisherIri", default)]
    pub publisher_iri: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#publisherName", default)]
    pub publisher_name: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#licenseIri", default)]
    pub license_iri: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#licenseName", default)]
    pub license_name: Option<Vec<String>>,
    #[serde(rename = "https://colonialcollections nl/search#keyword", default)]
    pub keywords: Option<Vec<String>>,
}
