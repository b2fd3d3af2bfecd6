use crate::api::inventory_management::models::{with_tags, Inventory, InventoryOut};
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema::{access_permissions, inventories};
use diesel::prelude::*;
use rocket::serde::json::Json;

/// Inventories the caller can write to through a delegated grant, newest
/// grant first.
#[get("/accessible")]
pub(crate) async fn accessible_inventories(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<InventoryOut>>, ErrorResponse> {
    let grantee = user.0.id;

    let out = conn
        .run(move |c| {
            let list = access_permissions::table
                .filter(access_permissions::user_id.eq(grantee))
                .inner_join(inventories::table)
                .order(access_permissions::created_at.desc())
                .select(inventories::all_columns)
                .load::<Inventory>(c)?;

            list.into_iter()
                .map(|inventory| with_tags(c, inventory))
                .collect::<QueryResult<Vec<_>>>()
        })
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load accessible inventories"))?;

    Ok(Json(out))
}
