use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::domain::{PechaId, WorkId};
use crate::error::MetaError;

/// Injects the extracted volume mapping under `source_metadata.volume`.
///
/// When the document has no `source_metadata` mapping the input is returned
/// unchanged and a warning is logged; everything else passes through as-is.
pub fn merge_volume_info(mut meta: Mapping, volumes: Mapping, work_id: &WorkId) -> Mapping {
    match meta.get_mut("source_metadata").and_then(Value::as_mapping_mut) {
        Some(source_metadata) => {
            source_metadata.insert(Value::from("volume"), Value::Mapping(volumes));
        }
        None => warn!("{work_id} doesn't have a proper meta.yml"),
    }
    meta
}

/// Serializes the document to `{output_dir}/{pecha_id}/meta.yml`, creating
/// parent directories as needed. Keys stay in insertion order and Unicode
/// is written unescaped.
pub fn write_meta(
    meta: &Mapping,
    output_dir: &Path,
    pecha_id: &PechaId,
) -> Result<PathBuf, MetaError> {
    let dir = output_dir.join(pecha_id.as_str());
    fs::create_dir_all(&dir)
        .map_err(|err| MetaError::Filesystem(format!("create {}: {err}", dir.display())))?;
    let path = dir.join("meta.yml");
    let body = serde_yaml::to_string(meta).map_err(|err| MetaError::Serialize(err.to_string()))?;
    fs::write(&path, body)
        .map_err(|err| MetaError::Filesystem(format!("write {}: {err}", path.display())))?;
    Ok(path)
}
