use crate::schema::items;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An item row with its fixed set of optional custom field slots. The slot
/// names are part of the wire format, so only `customId`/`inventoryId`
/// deviate from the column names.
#[derive(Queryable, Serialize, Debug)]
pub struct Item {
    pub id: i32,
    #[serde(rename = "inventoryId")]
    pub inventory_id: i32,
    pub name: String,
    #[serde(rename = "customId")]
    pub custom_id: Option<String>,
    pub string1_val: Option<String>,
    pub string2_val: Option<String>,
    pub string3_val: Option<String>,
    pub multiline1_val: Option<String>,
    pub multiline2_val: Option<String>,
    pub multiline3_val: Option<String>,
    pub int1_val: Option<i32>,
    pub int2_val: Option<i32>,
    pub int3_val: Option<i32>,
    pub bool1_val: Option<bool>,
    pub bool2_val: Option<bool>,
    pub bool3_val: Option<bool>,
    pub doc1_val: Option<String>,
    pub doc2_val: Option<String>,
    pub doc3_val: Option<String>,
}

#[derive(Deserialize, Insertable, Debug)]
#[table_name = "items"]
pub struct NewItemRequest {
    #[serde(rename = "inventoryId")]
    pub inventory_id: i32,
    pub name: String,
    #[serde(rename = "customId")]
    pub custom_id: Option<String>,
    pub string1_val: Option<String>,
    pub string2_val: Option<String>,
    pub string3_val: Option<String>,
    pub multiline1_val: Option<String>,
    pub multiline2_val: Option<String>,
    pub multiline3_val: Option<String>,
    pub int1_val: Option<i32>,
    pub int2_val: Option<i32>,
    pub int3_val: Option<i32>,
    pub bool1_val: Option<bool>,
    pub bool2_val: Option<bool>,
    pub bool3_val: Option<bool>,
    pub doc1_val: Option<String>,
    pub doc2_val: Option<String>,
    pub doc3_val: Option<String>,
}

/// Partial update; absent fields are left untouched. The target inventory is
/// deliberately not editable, items never move between inventories.
#[derive(Deserialize, AsChangeset, Debug)]
#[table_name = "items"]
pub struct ItemChanges {
    pub name: Option<String>,
    #[serde(rename = "customId")]
    pub custom_id: Option<String>,
    pub string1_val: Option<String>,
    pub string2_val: Option<String>,
    pub string3_val: Option<String>,
    pub multiline1_val: Option<String>,
    pub multiline2_val: Option<String>,
    pub multiline3_val: Option<String>,
    pub int1_val: Option<i32>,
    pub int2_val: Option<i32>,
    pub int3_val: Option<i32>,
    pub bool1_val: Option<bool>,
    pub bool2_val: Option<bool>,
    pub bool3_val: Option<bool>,
    pub doc1_val: Option<String>,
    pub doc2_val: Option<String>,
    pub doc3_val: Option<String>,
}

impl ItemChanges {
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.custom_id.is_some()
            || self.string1_val.is_some()
            || self.string2_val.is_some()
            || self.string3_val.is_some()
            || self.multiline1_val.is_some()
            || self.multiline2_val.is_some()
            || self.multiline3_val.is_some()
            || self.int1_val.is_some()
            || self.int2_val.is_some()
            || self.int3_val.is_some()
            || self.bool1_val.is_some()
            || self.bool2_val.is_some()
            || self.bool3_val.is_some()
            || self.doc1_val.is_some()
            || self.doc2_val.is_some()
            || self.doc3_val.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_parses_the_wire_shape() {
        let request = serde_json::from_str::<NewItemRequest>(
            r#"{"name":"Lens","inventoryId":3,"customId":"CAM-001","int1_val":50,"bool2_val":true}"#,
        )
        .unwrap();
        assert_eq!(request.inventory_id, 3);
        assert_eq!(request.custom_id.as_deref(), Some("CAM-001"));
        assert_eq!(request.int1_val, Some(50));
        assert_eq!(request.bool2_val, Some(true));
        assert!(request.string1_val.is_none());
    }

    #[test]
    fn empty_changeset_is_detected() {
        let changes = serde_json::from_str::<ItemChanges>("{}").unwrap();
        assert!(!changes.has_changes());

        let changes = serde_json::from_str::<ItemChanges>(r#"{"name":"Lens"}"#).unwrap();
        assert!(changes.has_changes());
    }

    #[test]
    fn changeset_ignores_inventory_reassignment() {
        let changes =
            serde_json::from_str::<ItemChanges>(r#"{"inventoryId":9,"name":"Lens"}"#).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Lens"));
    }
}
