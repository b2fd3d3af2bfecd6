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
#[serde(rename_all = "camelCase")]
pub struct NewInventoryRequest {
    title: String,
    description: String,
    category_id: i32,
    #[serde(default)]
    tags: Vec<i32>,
}

#[derive(Insertable)]
#[table_name = "inventories"]
struct NewInventory {
    title: String,
    description: String,
    category_id: i32,
    creator_id: i32,
}

#[derive(Insertable)]
#[table_name = "inventory_tags"]
struct NewInventoryTag {
    inventory_id: i32,
    tag_id: i32,
}

#[post("/", data = "<request>")]
pub(crate) async fn create_inventory(
    user: UserLoggedIn,
    request: Result<Json<NewInventoryRequest>, json::Error<'_>>,
    conn: DbConn,
) -> Result<Json<InventoryOut>, ErrorResponse> {
    let request = request
        .map_err(|_| ErrorResponse::bad_request("Missing required fields."))?
        .into_inner();

    if request.title.is_empty() || request.description.is_empty() {
        return Err(ErrorResponse::bad_request("Missing required fields."));
    }

    let creator = user.0.id;

    let out = conn
        .run(move |c| -> Result<InventoryOut, ErrorResponse> {
            let category = {
                use schema::categories::dsl::*;

                categories
                    .filter(id.eq(request.category_id))
                    .select(id)
                    .first::<i32>(c)
                    .optional()
                    .map_err(|_| ErrorResponse::internal("Couldn't load category"))?
            };
            if category.is_none() {
                return Err(ErrorResponse::not_found("Category not found."));
            }

            let inventory = c
                .transaction::<_, diesel::result::Error, _>(|| {
                    let inventory = diesel::insert_into(inventories::table)
                        .values(&NewInventory {
                            title: request.title.clone(),
                            description: request.description.clone(),
                            category_id: request.category_id,
                            creator_id: creator,
                        })
                        .get_result::<Inventory>(c)?;

                    for tag in &request.tags {
                        diesel::insert_into(inventory_tags::table)
                            .values(&NewInventoryTag {
                                inventory_id: inventory.id,
                                tag_id: *tag,
                            })
                            .execute(c)?;
                    }

                    Ok(inventory)
                })
                .map_err(|err| ErrorResponse::from_diesel(err, "Couldn't create inventory"))?;

            with_tags(c, inventory)
                .map_err(|_| ErrorResponse::internal("Couldn't load inventory tags"))
        })
        .await?;

    Ok(Json(out))
}
