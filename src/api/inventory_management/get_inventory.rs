use crate::api::inventory_management::models::{with_tags, Inventory, InventoryOut};
use crate::api::item_management::models::Item;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct InventoryDetailOut {
    #[serde(flatten)]
    pub inventory: InventoryOut,
    pub items: Vec<Item>,
}

#[get("/<inventory>")]
pub(crate) async fn get_inventory(
    inventory: i32,
    conn: DbConn,
) -> Result<Json<InventoryDetailOut>, ErrorResponse> {
    let out = conn
        .run(move |c| -> Result<InventoryDetailOut, ErrorResponse> {
            use schema::inventories::dsl::*;

            let found = inventories
                .filter(id.eq(inventory))
                .first::<Inventory>(c)
                .optional()
                .map_err(|_| ErrorResponse::internal("Couldn't load inventory"))?
                .ok_or_else(|| ErrorResponse::not_found("Not found"))?;

            let item_list = {
                use schema::items::dsl::*;

                items
                    .filter(inventory_id.eq(inventory))
                    .load::<Item>(c)
                    .map_err(|_| ErrorResponse::internal("Couldn't load items"))?
            };

            Ok(InventoryDetailOut {
                inventory: with_tags(c, found)
                    .map_err(|_| ErrorResponse::internal("Couldn't load inventory tags"))?,
                items: item_list,
            })
        })
        .await?;

    Ok(Json(out))
}
