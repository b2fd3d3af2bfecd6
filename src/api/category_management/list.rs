use crate::api::category_management::models::Category;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/")]
pub(crate) async fn list_categories(conn: DbConn) -> Result<Json<Vec<Category>>, ErrorResponse> {
    use schema::categories::dsl::*;

    let list = conn
        .run(|c| categories.order(name.asc()).load::<Category>(c))
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load categories"))?;

    Ok(Json(list))
}
