use crate::api::user_management::models::AdminUser;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::moderation::{apply_bulk_action, AdminAction};
use rocket::serde::json::{self, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub action: AdminAction,
    pub user_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct BulkActionDone {
    message: String,
}

#[post("/users/update", data = "<request>")]
pub(crate) async fn bulk_update(
    admin: AdminUser,
    request: Result<Json<BulkActionRequest>, json::Error<'_>>,
    conn: DbConn,
) -> Result<Json<BulkActionDone>, ErrorResponse> {
    let request = request
        .map_err(|_| ErrorResponse::bad_request("Invalid action."))?
        .into_inner();

    if request.user_ids.is_empty() {
        return Err(ErrorResponse::bad_request(
            "User IDs must be a non-empty array.",
        ));
    }

    let acting_user = admin.0.id;
    let action = request.action;
    let targets = request.user_ids;

    // Serializable so the last-admin count can't race a concurrent batch.
    let outcome = conn
        .run(move |c| {
            c.build_transaction()
                .serializable()
                .run(|| apply_bulk_action(c, action, &targets, acting_user))
        })
        .await
        .map_err(|err| ErrorResponse::from_diesel(err, "Couldn't apply admin action"))?;

    if !outcome.skipped.is_empty() {
        log::warn!(
            "admin {} action '{}' skipped user ids {:?}",
            acting_user,
            action.as_str(),
            outcome.skipped
        );
    }

    Ok(Json(BulkActionDone {
        message: format!("Action '{}' completed successfully.", action.as_str()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_original_request_shape() {
        let request = serde_json::from_str::<BulkActionRequest>(
            r#"{"action":"toggleAdmin","userIds":[1,2,3]}"#,
        )
        .unwrap();
        assert_eq!(request.action, AdminAction::ToggleAdmin);
        assert_eq!(request.user_ids, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!(
            serde_json::from_str::<BulkActionRequest>(r#"{"action":"purge","userIds":[1]}"#)
                .is_err()
        );
    }

    #[test]
    fn rejects_a_missing_id_array() {
        assert!(serde_json::from_str::<BulkActionRequest>(r#"{"action":"block"}"#).is_err());
    }
}
