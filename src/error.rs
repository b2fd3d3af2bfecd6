use rocket::response::{Responder, Response};
use rocket::{
    http::{ContentType, Status},
    response,
    serde::json::Json,
    Request,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ApiError {
    err: String,
}

impl ApiError {
    pub(crate) fn new(err: String) -> ApiError {
        ApiError { err }
    }
}

#[derive(Debug)]
pub(crate) struct ErrorResponse<T = ApiError> {
    json: Json<T>,
    status: Status,
}

impl ErrorResponse<ApiError> {
    pub(crate) fn new(status: Status, err: String) -> ErrorResponse<ApiError> {
        ErrorResponse {
            json: Json(ApiError { err }),
            status,
        }
    }

    pub(crate) fn bad_request(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 400 }, err.to_string())
    }

    pub(crate) fn unauthorized(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 401 }, err.to_string())
    }

    pub(crate) fn forbidden(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 403 }, err.to_string())
    }

    pub(crate) fn not_found(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 404 }, err.to_string())
    }

    pub(crate) fn conflict(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 409 }, err.to_string())
    }

    pub(crate) fn internal(err: &str) -> ErrorResponse<ApiError> {
        Self::new(Status { code: 500 }, err.to_string())
    }

    /// Maps database failures onto the response taxonomy. A missing row is a
    /// 404, a unique-key collision a 409, everything else an internal error.
    pub(crate) fn from_diesel(err: diesel::result::Error, context: &str) -> ErrorResponse<ApiError> {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => Self::not_found(context),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => Self::conflict(context),
            err => Self::internal(&format!("{}: {}", context, err)),
        }
    }
}

impl<'r, T: serde::Serialize> Responder<'r, 'r> for ErrorResponse<T> {
    fn respond_to(self, req: &'r Request) -> response::Result<'r> {
        Response::build_from(self.json.respond_to(req).unwrap())
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error};

    #[test]
    fn missing_row_maps_to_not_found() {
        let response = ErrorResponse::from_diesel(Error::NotFound, "Item not found.");
        assert_eq!(response.status.code, 404);
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_string()),
        );
        let response = ErrorResponse::from_diesel(err, "Custom ID already taken.");
        assert_eq!(response.status.code, 409);
    }

    #[test]
    fn other_database_errors_map_to_internal() {
        let err = Error::DatabaseError(
            DatabaseErrorKind::UnableToSendCommand,
            Box::new("connection reset".to_string()),
        );
        let response = ErrorResponse::from_diesel(err, "Couldn't load items");
        assert_eq!(response.status.code, 500);
    }
}
