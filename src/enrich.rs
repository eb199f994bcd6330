//! Projection of raw game-table rows into their enriched form.

use crate::model::{EnrichedEquipment, EnrichedRank, EquipmentRecord, HashRef, RankRecord};
use crate::report::{Reporter, Unresolved};
use crate::textmap::{hash_key, HashIndex};
use serde_json::Value;

/// Text used when a hash reference does not resolve.
pub const NOT_FOUND: &str = "NOT FOUND";

pub const EQUIPMENT_TABLE: &str = "GridFightBackEquipment";
pub const RANK_TABLE: &str = "GridFightBackRoleRank";

/// Resolves hash references for one table and counts the misses.
struct Resolver<'a> {
    index: &'a HashIndex,
    reporter: &'a dyn Reporter,
    table: &'static str,
    misses: usize,
}

impl<'a> Resolver<'a> {
    fn new(index: &'a HashIndex, reporter: &'a dyn Reporter, table: &'static str) -> Self {
        Self {
            index,
            reporter,
            table,
            misses: 0,
        }
    }

    fn text(&mut self, row: usize, field: &'static str, reference: &HashRef) -> String {
        let key = reference.hash.as_ref().and_then(hash_key);
        if let Some(text) = key.as_deref().and_then(|k| self.index.get(k)) {
            return text.to_string();
        }
        self.misses += 1;
        self.reporter.unresolved(&Unresolved {
            table: self.table,
            index: row,
            field,
            key,
        });
        NOT_FOUND.to_string()
    }
}

/// Output of one enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Enriched<T> {
    pub rows: Vec<T>,
    /// Hash references that fell back to [`NOT_FOUND`]
    pub unresolved: usize,
}

/// Rows of a table document. A document that is not an array has no rows.
pub fn table_rows<'a>(doc: &'a Value, table: &str, reporter: &dyn Reporter) -> &'a [Value] {
    match doc.as_array() {
        Some(items) => items.as_slice(),
        None => {
            reporter.warn(&format!("{} is not a JSON array; treating it as empty", table));
            &[]
        }
    }
}

fn enrich_equipment_record(
    record: &EquipmentRecord,
    row: usize,
    resolver: &mut Resolver<'_>,
) -> EnrichedEquipment {
    EnrichedEquipment {
        role_id: record.role_id.clone(),
        equipment_id: record.equipment_id.clone(),
        level: record.level.clone(),
        desc_hash_value: record.back_equipment_desc.hash.clone(),
        desc_text: resolver.text(row, "DescText", &record.back_equipment_desc),
        parameters: Some(record.param_list.clone().unwrap_or_else(|| Value::Array(Vec::new()))),
        param_format: record.param_format.clone(),
        desc_param_list: Vec::new(),
    }
}

/// Enrich every back-equipment row, preserving input order.
pub fn enrich_equipment(
    rows: &[Value],
    index: &HashIndex,
    reporter: &dyn Reporter,
) -> Enriched<EnrichedEquipment> {
    let mut resolver = Resolver::new(index, reporter, EQUIPMENT_TABLE);
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, raw)| enrich_equipment_record(&EquipmentRecord::from_value(raw), i, &mut resolver))
        .collect();
    Enriched {
        rows,
        unresolved: resolver.misses,
    }
}

fn enrich_rank_record(record: &RankRecord, row: usize, resolver: &mut Resolver<'_>) -> EnrichedRank {
    EnrichedRank {
        rank_id: record.rank_id.clone(),
        rank: record.rank.clone(),
        name_hash_value: record.name.hash.clone(),
        name_text: resolver.text(row, "NameText", &record.name),
        desc_hash_value: record.desc.hash.clone(),
        desc_text: resolver.text(row, "DescText", &record.desc),
        desc_param_list: Some(record.desc_param_list.clone().unwrap_or_else(|| Value::Array(Vec::new()))),
        icon_path: record.icon_path.clone(),
        trigger_hash: record.trigger.hash.clone(),
        modify_energy_bar: record.modify_energy_bar.value().cloned(),
    }
}

/// Enrich every back-role-rank row, preserving input order.
///
/// `Name` and `Desc` resolve through the index; `Trigger` stays a raw hash.
pub fn enrich_ranks(rows: &[Value], index: &HashIndex, reporter: &dyn Reporter) -> Enriched<EnrichedRank> {
    let mut resolver = Resolver::new(index, reporter, RANK_TABLE);
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, raw)| enrich_rank_record(&RankRecord::from_value(raw), i, &mut resolver))
        .collect();
    Enriched {
        rows,
        unresolved: resolver.misses,
    }
}
