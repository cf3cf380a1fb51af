// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON:API document decoding into [`ResourceRecord`]s.

use super::FetchError;
use rw_core::{ResourceKind, ResourceRecord};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize)]
struct Document<T> {
    data: T,
}

#[derive(Deserialize)]
struct Resource {
    id: String,
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    relationships: HashMap<String, Relationship>,
}

#[derive(Deserialize)]
struct Relationship {
    #[serde(default)]
    data: Option<Linkage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Linkage {
    One(Identifier),
    Many(Vec<Identifier>),
}

#[derive(Deserialize)]
struct Identifier {
    id: String,
}

impl Resource {
    fn into_record(self, kind: ResourceKind) -> ResourceRecord {
        let relationships = self
            .relationships
            .into_iter()
            .map(|(name, rel)| {
                let ids = match rel.data {
                    Some(Linkage::One(ident)) => vec![ident.id],
                    Some(Linkage::Many(idents)) => idents.into_iter().map(|i| i.id).collect(),
                    None => Vec::new(),
                };
                (name, ids)
            })
            .collect();
        ResourceRecord {
            kind,
            id: self.id,
            attributes: self.attributes,
            relationships,
        }
    }
}

/// Decode a single-resource document (`{"data": {...}}`).
pub fn decode_document(kind: ResourceKind, body: &[u8]) -> Result<ResourceRecord, FetchError> {
    let doc: Document<Resource> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(doc.data.into_record(kind))
}

/// Decode a collection document (`{"data": [...]}`).
pub fn decode_collection(
    kind: ResourceKind,
    body: &[u8],
) -> Result<Vec<ResourceRecord>, FetchError> {
    let doc: Document<Vec<Resource>> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(doc
        .data
        .into_iter()
        .map(|r| r.into_record(kind))
        .collect())
}

#[cfg(test)]
#[path = "jsonapi_tests.rs"]
mod tests;
