use std::path::PathBuf;

use tracing::info;

use crate::bdrc::CatalogClient;
use crate::domain::{PechaId, WorkId};
use crate::error::MetaError;
use crate::meta::{merge_volume_info, write_meta};
use crate::openpecha::MetadataClient;
use crate::volumes::extract_volume_info;

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub path: PathBuf,
    pub volume_count: usize,
}

#[derive(Clone)]
pub struct App<C: CatalogClient, M: MetadataClient> {
    catalog: C,
    metadata: M,
    output_dir: PathBuf,
}

impl<C: CatalogClient, M: MetadataClient> App<C, M> {
    pub fn new(catalog: C, metadata: M, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            metadata,
            output_dir: output_dir.into(),
        }
    }

    /// Runs the whole update for one work/pecha pair: fetch the relation
    /// graph and the published meta.yml, extract volume info, merge, and
    /// write the result under the output directory.
    pub fn update(&self, work_id: &WorkId, pecha_id: &PechaId) -> Result<UpdateOutcome, MetaError> {
        // A failed catalog fetch degrades to an empty document, which
        // parses as an empty graph and yields no volumes.
        let graph_text = match self.catalog.fetch_graph(work_id) {
            Ok(text) => text,
            Err(err) => {
                // Notice goes to stdout, not the log file.
                println!("ttl for {work_id} not found: {err}");
                String::new()
            }
        };
        let old_meta = self.metadata.fetch_meta(pecha_id)?;
        let volumes = extract_volume_info(&graph_text, work_id)?;
        let volume_count = volumes.len();
        let new_meta = merge_volume_info(old_meta, volumes, work_id);
        let path = write_meta(&new_meta, &self.output_dir, pecha_id)?;
        info!("{pecha_id}.. completed");
        Ok(UpdateOutcome { path, volume_count })
    }
}
