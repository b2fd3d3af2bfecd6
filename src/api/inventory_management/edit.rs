use crate::access_control::can_write;
use crate::api::inventory_management::models::{with_tags, Inventory, InventoryOut};
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use crate::schema::{inventories, inventory_tags};
use diesel::prelude::*;
use rocket::serde::json::{self, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EditInventoryRequest {
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<i32>>,
}

#[derive(AsChangeset)]
#[table_name = "inventories"]
struct InventoryChanges {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Insertable)]
#[table_name = "inventory_tags"]
struct NewInventoryTag {
    inventory_id: i32,
    tag_id: i32,
}

#[put("/<inventory>", data = "<request>")]
pub(crate) async fn edit_inventory(
    user: UserLoggedIn,
    inventory: i32,
    request: Result<Json<EditInventoryRequest>, json::Error<'_>>,
    conn: DbConn,
) -> Result<Json<InventoryOut>, ErrorResponse> {
    let request = request
        .map_err(|_| ErrorResponse::bad_request("Invalid inventory payload."))?
        .into_inner();

    let editor = user.0.id;

    let out = conn
        .run(move |c| -> Result<InventoryOut, ErrorResponse> {
            use schema::inventories::dsl::*;

            let existing = inventories
                .filter(id.eq(inventory))
                .first::<Inventory>(c)
                .optional()
                .map_err(|_| ErrorResponse::internal("Couldn't load inventory"))?
                .ok_or_else(|| ErrorResponse::not_found("Inventory not found."))?;

            // Same write predicate as item mutations: creator or grant holder.
            let allowed = can_write(c, editor, existing.id)
                .map_err(|_| ErrorResponse::internal("Couldn't check inventory permissions"))?;
            if !allowed {
                return Err(ErrorResponse::forbidden(
                    "You do not have permission to edit this inventory.",
                ));
            }

            let updated = c
                .transaction::<_, diesel::result::Error, _>(|| {
                    let changes = InventoryChanges {
                        title: request.title.clone(),
                        description: request.description.clone(),
                    };

                    let updated = if changes.title.is_some() || changes.description.is_some() {
                        diesel::update(inventories.filter(id.eq(inventory)))
                            .set(&changes)
                            .get_result::<Inventory>(c)?
                    } else {
                        existing
                    };

                    if let Some(tag_ids) = &request.tags {
                        diesel::delete(
                            inventory_tags::table
                                .filter(inventory_tags::inventory_id.eq(inventory)),
                        )
                        .execute(c)?;

                        for tag in tag_ids {
                            diesel::insert_into(inventory_tags::table)
                                .values(&NewInventoryTag {
                                    inventory_id: inventory,
                                    tag_id: *tag,
                                })
                                .execute(c)?;
                        }
                    }

                    Ok(updated)
                })
                .map_err(|err| ErrorResponse::from_diesel(err, "Couldn't update inventory"))?;

            with_tags(c, updated)
                .map_err(|_| ErrorResponse::internal("Couldn't load inventory tags"))
        })
        .await?;

    Ok(Json(out))
}
