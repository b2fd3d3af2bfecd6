use crate::api::inventory_management::models::{with_tags, Inventory, InventoryOut};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/")]
pub(crate) async fn list_inventories(conn: DbConn) -> Result<Json<Vec<InventoryOut>>, ErrorResponse> {
    use schema::inventories::dsl::*;

    let out = conn
        .run(|c| {
            let list = inventories.load::<Inventory>(c)?;

            list.into_iter()
                .map(|inventory| with_tags(c, inventory))
                .collect::<QueryResult<Vec<_>>>()
        })
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load inventories"))?;

    Ok(Json(out))
}
