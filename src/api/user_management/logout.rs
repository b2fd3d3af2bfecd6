use crate::api::user_management::login::SessionCookie;
use crate::api::user_management::sessions::UserSession;
use crate::error::ErrorResponse;
use rocket::http::{Cookie, CookieJar};
use rocket::State;

#[post("/logout")]
pub(crate) async fn logout(
    sessions: &State<UserSession>,
    cookies: &CookieJar<'_>,
) -> Result<&'static str, ErrorResponse> {
    if let Some(cookie) = cookies.get_private("session") {
        if let Ok(value) = serde_json::from_str::<SessionCookie>(cookie.value()) {
            sessions
                .sessions
                .lock()
                .map_err(|_| ErrorResponse::internal("Couldn't get user sessions"))?
                .remove(&value.session_key);
        }

        cookies.remove_private(Cookie::named("session"));
    }

    Ok("Logged out successfully")
}
