use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;
use std::time::SystemTime;

#[derive(Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedInventoryOut {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: SystemTime,
}

#[get("/owned")]
pub(crate) async fn owned_inventories(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<OwnedInventoryOut>>, ErrorResponse> {
    use schema::inventories::dsl::*;

    let owner = user.0.id;

    let list = conn
        .run(move |c| {
            inventories
                .filter(creator_id.eq(owner))
                .order(created_at.desc())
                .select((id, title, description, created_at))
                .load::<OwnedInventoryOut>(c)
        })
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load owned inventories"))?;

    Ok(Json(list))
}
