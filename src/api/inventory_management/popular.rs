use crate::api::inventory_management::models::{with_tags, Inventory, InventoryOut};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct PopularInventoryOut {
    #[serde(flatten)]
    pub inventory: InventoryOut,
    #[serde(rename = "itemCount")]
    pub item_count: i64,
}

// Counted inventory by inventory. Switch to a grouped join once diesel 2
// lands in rocket_sync_db_pools.
#[get("/popular")]
pub(crate) async fn popular_inventories(
    conn: DbConn,
) -> Result<Json<Vec<PopularInventoryOut>>, ErrorResponse> {
    let out = conn
        .run(|c| {
            use schema::inventories::dsl::*;

            let list = inventories.load::<Inventory>(c)?;

            let mut counted = list
                .into_iter()
                .map(|inventory| {
                    use schema::items::dsl::*;

                    let count = items
                        .filter(inventory_id.eq(inventory.id))
                        .count()
                        .get_result::<i64>(c)?;

                    Ok((inventory, count))
                })
                .collect::<QueryResult<Vec<_>>>()?;

            counted.sort_by(|a, b| b.1.cmp(&a.1));

            counted
                .into_iter()
                .take(10)
                .map(|(inventory, count)| {
                    Ok(PopularInventoryOut {
                        inventory: with_tags(c, inventory)?,
                        item_count: count,
                    })
                })
                .collect::<QueryResult<Vec<_>>>()
        })
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load popular inventories"))?;

    Ok(Json(out))
}
