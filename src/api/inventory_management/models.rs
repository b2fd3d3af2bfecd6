use crate::api::tag_management::models::Tag;
use crate::schema::{inventory_tags, tags};
use diesel::prelude::*;
use serde::Serialize;
use std::fmt::Debug;
use std::time::SystemTime;

#[derive(Queryable, Debug)]
pub struct Inventory {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub creator_id: i32,
    pub created_at: SystemTime,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOut {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub creator_id: i32,
    pub created_at: SystemTime,
    pub tags: Vec<Tag>,
}

pub(super) fn tags_of(c: &PgConnection, inventory: i32) -> QueryResult<Vec<Tag>> {
    inventory_tags::table
        .filter(inventory_tags::inventory_id.eq(inventory))
        .inner_join(tags::table)
        .select((tags::id, tags::name))
        .load::<Tag>(c)
}

pub(super) fn with_tags(c: &PgConnection, inventory: Inventory) -> QueryResult<InventoryOut> {
    let tag_list = tags_of(c, inventory.id)?;

    Ok(InventoryOut {
        id: inventory.id,
        title: inventory.title,
        description: inventory.description,
        category_id: inventory.category_id,
        creator_id: inventory.creator_id,
        created_at: inventory.created_at,
        tags: tag_list,
    })
}
