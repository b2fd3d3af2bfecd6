use crate::api::item_management::models::Item;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/<item>")]
pub(crate) async fn get_item(item: i32, conn: DbConn) -> Result<Json<Item>, ErrorResponse> {
    use schema::items::dsl::*;

    let found = conn
        .run(move |c| items.filter(id.eq(item)).first::<Item>(c).optional())
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load item"))?
        .ok_or_else(|| ErrorResponse::not_found("Not found"))?;

    Ok(Json(found))
}
