//! Decoding of raw hits into datasets.

use common::dataset::{Dataset, License, Publisher};

use crate::{
    db_utils::{elastic_utils::RawSearchResultHit, raw_dataset::RawDataset},
    error::DecodeError,
};

/// Decodes every hit in engine order. The first invalid hit fails the whole page.
pub fn decode_datasets(hits: Vec<RawSearchResultHit>) -> Result<Vec<Dataset>, DecodeError> {
    hits.into_iter().map(|hit| decode_dataset(hit.source)).collect()
}

pub fn decode_dataset(raw: RawDataset) -> Result<Dataset, DecodeError> {
    let RawDataset {
        id,
        name,
        description,
        publisher_iri,
        publisher_name,
        license_iri,
        license_name,
        keywords,
    } = raw;

    let document_id = id.clone();
    let missing = |field: &'static str| DecodeError { document_id: document_id.clone(), field };
    let required = |values: Option<Vec<String>>, field: &'static str| first(values).ok_or_else(|| missing(field));

    let name = required(name, "name")?;
    let publisher = Publisher {
        id: required(publisher_iri, "publisher.id")?,
        name: required(publisher_name, "publisher.name")?,
    };
    let license = License {
        id: required(license_iri, "license.id")?,
        name: required(license_name, "license.name")?,
    };
    let id = id.ok_or_else(|| missing("id"))?;

    Ok(Dataset {
        id,
        name,
        description: first(description),
        publisher,
        license,
        keywords,
    })
}

fn first(values: Option<Vec<String>>) -> Option<String> {
    values.and_then(|values| values.into_iter().next())
}
