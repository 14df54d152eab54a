//! JSON snapshot loader

use crate::ingest::{normalize_item, IngestError, IngestOutcome};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a snapshot file: a list of items, or an object with an `articles` list
pub fn load(path: &Path) -> Result<IngestOutcome, IngestError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| IngestError::InvalidJson {
            origin: origin.clone(),
            source,
        })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => items,
            _ => return Err(IngestError::NotAList { origin }),
        },
        _ => return Err(IngestError::NotAList { origin }),
    };

    debug!("{} items in {}", items.len(), origin);
    let mut outcome = IngestOutcome::default();
    for (index, item) in items.into_iter().enumerate() {
        match normalize_item(index, item) {
            Ok(article) => outcome.articles.push(article),
            Err(e) => outcome.skip(format!("item {index}"), &e),
        }
    }
    Ok(outcome)
}
