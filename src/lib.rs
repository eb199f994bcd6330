//! # gridfight_enrich
//!
//! Joins GridFight game tables against a TextMap so every text hash sits next
//! to the string it stands for.
//!
//! - **Back equipment** (`GridFightBackEquipment.json`): the description hash is resolved
//! - **Back role ranks** (`GridFightBackRoleRank.json`): name and description hashes are
//!   resolved, the trigger hash is kept raw
//! - **TextMap** (`TextMap.json`): `{"textMapHash": ..., "text": ...}` entries
//!
//! Hashes that don't resolve come out as `"NOT FOUND"`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gridfight_enrich::pipeline::{run, Paths};
//! use gridfight_enrich::report::LogReporter;
//!
//! let summary = run(&Paths::default(), &LogReporter)?;
//! println!("{} equipment rows, {} ranks", summary.equipment.len(), summary.ranks.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Enriching in memory
//!
//! ```
//! use gridfight_enrich::enrich::enrich_equipment;
//! use gridfight_enrich::report::Recorder;
//! use gridfight_enrich::textmap::HashIndex;
//! use serde_json::json;
//!
//! let index = HashIndex::from_entries(&json!([{"textMapHash": 555, "text": "Boost"}]));
//! let rows = json!([{"EquipmentID": 100, "BackEquipmentDesc": {"Hash": 555}}]);
//! let out = enrich_equipment(rows.as_array().unwrap(), &index, &Recorder::new());
//! assert_eq!(out.rows[0].desc_text, "Boost");
//! ```

pub mod document;
pub mod enrich;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod textmap;

pub use textmap::HashIndex;
