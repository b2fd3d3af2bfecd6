use crate::access_control::can_write;
use crate::api::item_management::models::Item;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ItemDeleted {
    message: &'static str,
}

#[delete("/<item>")]
pub(crate) async fn delete_item(
    user: UserLoggedIn,
    item: i32,
    conn: DbConn,
) -> Result<Json<ItemDeleted>, ErrorResponse> {
    let editor = user.0.id;

    conn.run(move |c| -> Result<(), ErrorResponse> {
        use schema::items::dsl::*;

        let existing = items
            .filter(id.eq(item))
            .first::<Item>(c)
            .optional()
            .map_err(|_| ErrorResponse::internal("Couldn't load item"))?
            .ok_or_else(|| ErrorResponse::not_found("Item not found."))?;

        let allowed = can_write(c, editor, existing.inventory_id)
            .map_err(|_| ErrorResponse::internal("Couldn't check inventory permissions"))?;
        if !allowed {
            return Err(ErrorResponse::forbidden(
                "You do not have permission to delete this item.",
            ));
        }

        diesel::delete(items.filter(id.eq(item)))
            .execute(c)
            .map_err(|_| ErrorResponse::internal("Couldn't delete item"))?;

        Ok(())
    })
    .await?;

    Ok(Json(ItemDeleted {
        message: "Item deleted",
    }))
}
