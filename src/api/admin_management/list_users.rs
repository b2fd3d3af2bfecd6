use crate::api::user_management::models::{AdminUser, User, UserOut};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/users")]
pub(crate) async fn list_users(
    _admin: AdminUser,
    conn: DbConn,
) -> Result<Json<Vec<UserOut>>, ErrorResponse> {
    use schema::users::dsl::*;

    let list = conn
        .run(|c| users.order(id.asc()).load::<User>(c))
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load users"))?;

    Ok(Json(list.into_iter().map(UserOut::from).collect()))
}
