use crate::access_control::can_write;
use crate::api::item_management::models::{Item, NewItemRequest};
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema::items;
use diesel::prelude::*;
use rocket::serde::json::{self, Json};

#[post("/", data = "<request>")]
pub(crate) async fn create_item(
    user: UserLoggedIn,
    request: Result<Json<NewItemRequest>, json::Error<'_>>,
    conn: DbConn,
) -> Result<Json<Item>, ErrorResponse> {
    let request = request
        .map_err(|_| ErrorResponse::bad_request("Invalid item payload."))?
        .into_inner();

    let creator = user.0.id;

    let item = conn
        .run(move |c| -> Result<Item, ErrorResponse> {
            // The write check targets the requested inventory, never a
            // client-supplied ownership claim.
            let allowed = can_write(c, creator, request.inventory_id)
                .map_err(|_| ErrorResponse::internal("Couldn't check inventory permissions"))?;
            if !allowed {
                return Err(ErrorResponse::forbidden(
                    "You do not have permission to add items to this inventory.",
                ));
            }

            diesel::insert_into(items::table)
                .values(&request)
                .get_result::<Item>(c)
                .map_err(|err| {
                    ErrorResponse::from_diesel(
                        err,
                        "An item with this Custom ID already exists in this inventory.",
                    )
                })
        })
        .await?;

    Ok(Json(item))
}
