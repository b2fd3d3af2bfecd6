use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[get("/tags")]
pub(crate) async fn tag_cloud(conn: DbConn) -> Result<Json<Vec<String>>, ErrorResponse> {
    use schema::tags::dsl::*;

    let names = conn
        .run(|c| tags.select(name).distinct().load::<String>(c))
        .await
        .map_err(|_| ErrorResponse::internal("Couldn't load tags"))?;

    Ok(Json(names))
}
