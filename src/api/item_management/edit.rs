use crate::access_control::can_write;
use crate::api::item_management::models::{Item, ItemChanges};
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::{self, Json};

#[put("/<item>", data = "<request>")]
pub(crate) async fn edit_item(
    user: UserLoggedIn,
    item: i32,
    request: Result<Json<ItemChanges>, json::Error<'_>>,
    conn: DbConn,
) -> Result<Json<Item>, ErrorResponse> {
    let request = request
        .map_err(|_| ErrorResponse::bad_request("Invalid item payload."))?
        .into_inner();

    let editor = user.0.id;

    let updated = conn
        .run(move |c| -> Result<Item, ErrorResponse> {
            use schema::items::dsl::*;

            let existing = items
                .filter(id.eq(item))
                .first::<Item>(c)
                .optional()
                .map_err(|_| ErrorResponse::internal("Couldn't load item"))?
                .ok_or_else(|| ErrorResponse::not_found("Item not found."))?;

            // Checked against the item's current inventory, not anything in
            // the request body.
            let allowed = can_write(c, editor, existing.inventory_id)
                .map_err(|_| ErrorResponse::internal("Couldn't check inventory permissions"))?;
            if !allowed {
                return Err(ErrorResponse::forbidden(
                    "You do not have permission to edit this item.",
                ));
            }

            if !request.has_changes() {
                return Ok(existing);
            }

            diesel::update(items.filter(id.eq(item)))
                .set(&request)
                .get_result::<Item>(c)
                .map_err(|err| {
                    ErrorResponse::from_diesel(
                        err,
                        "An item with this Custom ID already exists in this inventory.",
                    )
                })
        })
        .await?;

    Ok(Json(updated))
}
