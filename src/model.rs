use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A nested `{"Hash": ...}` reference as found in the game tables.
///
/// A missing or non-object reference reads as an empty mapping, so the hash is
/// simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashRef {
    pub hash: Option<Value>,
}

impl HashRef {
    pub fn from_field(record: &Map<String, Value>, key: &str) -> Self {
        let hash = record
            .get(key)
            .and_then(Value::as_object)
            .and_then(|obj| obj.get("Hash"))
            .filter(|v| !v.is_null())
            .cloned();
        Self { hash }
    }
}

/// `ModifyEnergyBar` on a rank record.
///
/// Whether the key exists at all matters: `Missing` and `Present { value: None }`
/// both end up as `null` in the output, but only the second came from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EnergyBar {
    #[default]
    Missing,
    Present { value: Option<Value> },
}

impl EnergyBar {
    pub fn from_field(record: &Map<String, Value>, key: &str) -> Self {
        match record.get(key) {
            None => EnergyBar::Missing,
            Some(nested) => EnergyBar::Present {
                value: nested.as_object().and_then(|obj| obj.get("Value")).cloned(),
            },
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            EnergyBar::Missing => None,
            EnergyBar::Present { value } => value.as_ref(),
        }
    }
}

fn field(record: &Map<String, Value>, key: &str) -> Option<Value> {
    record.get(key).cloned()
}

/// Raw row of `GridFightBackEquipment.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentRecord {
    pub role_id: Option<Value>,
    pub equipment_id: Option<Value>,
    pub level: Option<Value>,
    pub back_equipment_desc: HashRef,
    pub param_list: Option<Value>,
    pub param_format: Option<Value>,
}

impl EquipmentRecord {
    /// Read a record without failing; a non-object row has every field absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(record) = value.as_object() else {
            return Self::default();
        };
        Self {
            role_id: field(record, "RoleID"),
            equipment_id: field(record, "EquipmentID"),
            level: field(record, "Level"),
            back_equipment_desc: HashRef::from_field(record, "BackEquipmentDesc"),
            param_list: field(record, "ParamList"),
            param_format: field(record, "ParamFormat"),
        }
    }
}

/// Raw row of `GridFightBackRoleRank.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankRecord {
    pub rank_id: Option<Value>,
    pub rank: Option<Value>,
    pub name: HashRef,
    pub desc: HashRef,
    pub desc_param_list: Option<Value>,
    pub icon_path: Option<Value>,
    pub trigger: HashRef,
    pub modify_energy_bar: EnergyBar,
}

impl RankRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(record) = value.as_object() else {
            return Self::default();
        };
        Self {
            rank_id: field(record, "RankID"),
            rank: field(record, "Rank"),
            name: HashRef::from_field(record, "Name"),
            desc: HashRef::from_field(record, "Desc"),
            desc_param_list: field(record, "DescParamList"),
            icon_path: field(record, "IconPath"),
            trigger: HashRef::from_field(record, "Trigger"),
            modify_energy_bar: EnergyBar::from_field(record, "ModifyEnergyBar"),
        }
    }
}

/// Output row for back equipment. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEquipment {
    #[serde(rename = "RoleID")]
    pub role_id: Option<Value>,
    #[serde(rename = "EquipmentID")]
    pub equipment_id: Option<Value>,
    #[serde(rename = "Level")]
    pub level: Option<Value>,
    #[serde(rename = "DescHashValue")]
    pub desc_hash_value: Option<Value>,
    #[serde(rename = "DescText")]
    pub desc_text: String,
    #[serde(rename = "Parameters")]
    pub parameters: Option<Value>,
    #[serde(rename = "ParamFormat")]
    pub param_format: Option<Value>,
    /// Always empty; equipment descriptions carry no parameters of their own.
    #[serde(rename = "DescParamList")]
    pub desc_param_list: Vec<Value>,
}

/// Output row for back role ranks. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRank {
    #[serde(rename = "RankID")]
    pub rank_id: Option<Value>,
    #[serde(rename = "Rank")]
    pub rank: Option<Value>,
    #[serde(rename = "NameHashValue")]
    pub name_hash_value: Option<Value>,
    #[serde(rename = "NameText")]
    pub name_text: String,
    #[serde(rename = "DescHashValue")]
    pub desc_hash_value: Option<Value>,
    #[serde(rename = "DescText")]
    pub desc_text: String,
    #[serde(rename = "DescParamList")]
    pub desc_param_list: Option<Value>,
    #[serde(rename = "IconPath")]
    pub icon_path: Option<Value>,
    /// Raw trigger hash; never looked up in the TextMap.
    #[serde(rename = "TriggerHash")]
    pub trigger_hash: Option<Value>,
    #[serde(rename = "ModifyEnergyBar")]
    pub modify_energy_bar: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equipment_from_partial_record() {
        let rec = EquipmentRecord::from_value(&json!({
            "RoleID": 1,
            "BackEquipmentDesc": {"Hash": 555},
            "ParamList": [0.5]
        }));
        assert_eq!(rec.role_id, Some(json!(1)));
        assert_eq!(rec.equipment_id, None);
        assert_eq!(rec.back_equipment_desc.hash, Some(json!(555)));
        assert_eq!(rec.param_list, Some(json!([0.5])));
    }

    #[test]
    fn test_hash_ref_tolerates_odd_shapes() {
        let rec = EquipmentRecord::from_value(&json!({"BackEquipmentDesc": null}));
        assert_eq!(rec.back_equipment_desc, HashRef::default());

        let rec = EquipmentRecord::from_value(&json!({"BackEquipmentDesc": {}}));
        assert_eq!(rec.back_equipment_desc.hash, None);

        let rec = EquipmentRecord::from_value(&json!({"BackEquipmentDesc": 12}));
        assert_eq!(rec.back_equipment_desc.hash, None);

        assert_eq!(EquipmentRecord::from_value(&json!("row")), EquipmentRecord::default());
    }

    #[test]
    fn test_energy_bar_presence() {
        let missing = RankRecord::from_value(&json!({"RankID": 1}));
        assert_eq!(missing.modify_energy_bar, EnergyBar::Missing);
        assert_eq!(missing.modify_energy_bar.value(), None);

        let present = RankRecord::from_value(&json!({"ModifyEnergyBar": {"Value": 30}}));
        assert_eq!(present.modify_energy_bar, EnergyBar::Present { value: Some(json!(30)) });
        assert_eq!(present.modify_energy_bar.value(), Some(&json!(30)));

        let empty = RankRecord::from_value(&json!({"ModifyEnergyBar": {}}));
        assert_eq!(empty.modify_energy_bar, EnergyBar::Present { value: None });
    }

    #[test]
    fn test_enriched_equipment_field_order() {
        let row = EnrichedEquipment {
            role_id: Some(json!(1)),
            equipment_id: None,
            level: None,
            desc_hash_value: None,
            desc_text: "NOT FOUND".to_string(),
            parameters: Some(json!([])),
            param_format: None,
            desc_param_list: Vec::new(),
        };
        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(
            text,
            r#"{"RoleID":1,"EquipmentID":null,"Level":null,"DescHashValue":null,"DescText":"NOT FOUND","Parameters":[],"ParamFormat":null,"DescParamList":[]}"#
        );
    }
}
