use crate::api::tag_management::models::Tag;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/")]
pub(crate) async fn list_tags(conn: DbConn) -> Result<Json<Vec<Tag>>, ErrorResponse> {
    use schema::tags::dsl::*;

    let list = conn
        .run(|c| tags.load::<Tag>(c))
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load tags"))?;

    Ok(Json(list))
}
