use crate::api::item_management::models::Item;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/")]
pub(crate) async fn list_items(conn: DbConn) -> Result<Json<Vec<Item>>, ErrorResponse> {
    use schema::items::dsl::*;

    let list = conn
        .run(|c| items.load::<Item>(c))
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load items"))?;

    Ok(Json(list))
}
