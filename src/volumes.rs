use serde_yaml::{Mapping, Value};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{ImageGroupId, VolumeInfo, WorkId};
use crate::error::MetaError;
use crate::graph::{
    GraphObject, INSTANCE_HAS_VOLUME, RDFS_COMMENT, RelationGraph, VOLUME_NUMBER,
    VOLUME_PAGES_TOTAL, resource,
};

/// Extracts per-volume info from the raw Turtle description of a work.
///
/// Returns a mapping keyed by a fresh surrogate id per volume, with records
/// in lexicographic image-group order. Unparseable Turtle is not fatal: it
/// yields an empty mapping and a logged warning. A volume without a usable
/// volume number is fatal and aborts the whole extraction.
pub fn extract_volume_info(graph_text: &str, work_id: &WorkId) -> Result<Mapping, MetaError> {
    let graph = match RelationGraph::parse_turtle(graph_text) {
        Ok(graph) => graph,
        Err(err) => {
            warn!("{work_id}.ttl contains bad syntax: {err}");
            return Ok(Mapping::new());
        }
    };

    let mut volumes = Mapping::new();
    for image_group_id in image_group_ids(&graph, work_id) {
        let uid = Uuid::new_v4().simple().to_string();
        let node = resource(image_group_id.as_str());

        let title = match graph.value(&node, RDFS_COMMENT).and_then(GraphObject::as_literal) {
            Some(title) => title.to_string(),
            None => {
                warn!("{image_group_id} in work {work_id} doesn't have a proper title");
                String::new()
            }
        };
        let volume_number = required_volume_number(&graph, &node, &image_group_id, work_id)?;
        // Optional field: absent or malformed counts collapse to zero.
        let total_pages = graph
            .value(&node, VOLUME_PAGES_TOTAL)
            .and_then(GraphObject::as_literal)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        let info = VolumeInfo {
            image_group_id: image_group_id.to_string(),
            title,
            volume_number,
            total_pages,
        };
        let record = serde_yaml::to_value(&info).map_err(|err| MetaError::Serialize(err.to_string()))?;
        volumes.insert(Value::String(uid), record);
    }
    Ok(volumes)
}

/// Image group ids of the work's volumes, sorted lexicographically.
fn image_group_ids(graph: &RelationGraph, work_id: &WorkId) -> Vec<ImageGroupId> {
    let mut ids: Vec<ImageGroupId> = graph
        .objects(&resource(work_id.as_str()), INSTANCE_HAS_VOLUME)
        .iter()
        .filter_map(GraphObject::as_iri)
        .map(ImageGroupId::from_uri)
        .collect();
    ids.sort();
    ids
}

/// Required field: a missing or non-numeric volume number aborts the run.
fn required_volume_number(
    graph: &RelationGraph,
    node: &str,
    image_group_id: &ImageGroupId,
    work_id: &WorkId,
) -> Result<u32, MetaError> {
    let literal = graph
        .value(node, VOLUME_NUMBER)
        .and_then(GraphObject::as_literal)
        .ok_or_else(|| MetaError::MissingVolumeNumber {
            image_group_id: image_group_id.to_string(),
            work_id: work_id.to_string(),
        })?;
    literal.parse().map_err(|_| MetaError::InvalidVolumeNumber {
        image_group_id: image_group_id.to_string(),
        work_id: work_id.to_string(),
        value: literal.to_string(),
    })
}
