//! Load -> index -> enrich -> save, run once.

use crate::document::{load_json, save_json, DocumentError};
use crate::enrich::{enrich_equipment, enrich_ranks, table_rows, EQUIPMENT_TABLE, RANK_TABLE};
use crate::model::{EnrichedEquipment, EnrichedRank};
use crate::report::Reporter;
use crate::textmap::HashIndex;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EQUIPMENT_FILE: &str = "GridFightBackEquipment.json";
pub const ROLE_RANK_FILE: &str = "GridFightBackRoleRank.json";
pub const TEXTMAP_FILE: &str = "TextMap.json";
pub const OUTPUT_PREFIX: &str = "processed_";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not load one or more files: {}", display_paths(.0))]
    MissingInputs(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub equipment: PathBuf,
    pub role_rank: PathBuf,
    pub textmap: PathBuf,
    pub equipment_out: PathBuf,
    pub role_rank_out: PathBuf,
}

impl Paths {
    /// Standard file names inside `input_dir`, outputs next to them in `output_dir`.
    pub fn in_dirs(input_dir: &Path, output_dir: &Path) -> Self {
        Self {
            equipment: input_dir.join(EQUIPMENT_FILE),
            role_rank: input_dir.join(ROLE_RANK_FILE),
            textmap: input_dir.join(TEXTMAP_FILE),
            equipment_out: output_dir.join(output_name(Path::new(EQUIPMENT_FILE))),
            role_rank_out: output_dir.join(output_name(Path::new(ROLE_RANK_FILE))),
        }
    }
}

impl Default for Paths {
    /// Relative names in the working directory.
    fn default() -> Self {
        Self::in_dirs(Path::new(""), Path::new(""))
    }
}

/// `GridFightBackEquipment.json` -> `processed_GridFightBackEquipment.json`
pub fn output_name(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}{}", OUTPUT_PREFIX, name))
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Summary {
    pub hash_count: usize,
    pub equipment: Vec<EnrichedEquipment>,
    pub ranks: Vec<EnrichedRank>,
    /// Hash references across both tables that fell back to the sentinel
    pub unresolved: usize,
    /// Outputs that could not be written; the other output is still attempted
    pub write_failures: Vec<DocumentError>,
}

impl Summary {
    pub fn is_complete(&self) -> bool {
        self.write_failures.is_empty()
    }
}

/// Run the whole batch.
///
/// Nothing is written unless all three inputs load.
pub fn run(paths: &Paths, reporter: &dyn Reporter) -> Result<Summary, PipelineError> {
    reporter.progress("Loading files...");

    let equipment_doc = load_json(&paths.equipment, reporter);
    let role_rank_doc = load_json(&paths.role_rank, reporter);
    let textmap_doc = load_json(&paths.textmap, reporter);

    let (equipment_doc, role_rank_doc, textmap_doc) = match (equipment_doc, role_rank_doc, textmap_doc) {
        (Some(e), Some(r), Some(t)) => (e, r, t),
        (e, r, t) => {
            let missing = [
                (e.is_none(), &paths.equipment),
                (r.is_none(), &paths.role_rank),
                (t.is_none(), &paths.textmap),
            ]
            .into_iter()
            .filter(|(absent, _)| *absent)
            .map(|(_, path)| path.clone())
            .collect::<Vec<_>>();
            reporter.error("Error: Could not load one or more files.");
            return Err(PipelineError::MissingInputs(missing));
        }
    };

    reporter.progress("Creating hash map from textmap...");
    let index = HashIndex::from_entries(&textmap_doc);
    reporter.progress(&format!("Loaded {} hash mappings", index.len()));

    let mut write_failures = Vec::new();

    reporter.progress(&format!("Processing {}...", EQUIPMENT_TABLE));
    let equipment = enrich_equipment(table_rows(&equipment_doc, EQUIPMENT_TABLE, reporter), &index, reporter);
    if let Err(e) = save_json(&equipment.rows, &paths.equipment_out, reporter) {
        write_failures.push(e);
    }

    reporter.progress(&format!("Processing {}...", RANK_TABLE));
    let ranks = enrich_ranks(table_rows(&role_rank_doc, RANK_TABLE, reporter), &index, reporter);
    if let Err(e) = save_json(&ranks.rows, &paths.role_rank_out, reporter) {
        write_failures.push(e);
    }

    let unresolved = equipment.unresolved + ranks.unresolved;
    if unresolved > 0 {
        reporter.warn(&format!("{} hash reference(s) not found in textmap", unresolved));
    }

    Ok(Summary {
        hash_count: index.len(),
        equipment: equipment.rows,
        ranks: ranks.rows,
        unresolved,
        write_failures,
    })
}
