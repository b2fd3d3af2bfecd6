use std::fmt::Debug;
use std::time::SystemTime;

use crate::api::user_management::models::{User, UserLoggedIn, UserOut};
use crate::api::user_management::sessions::UserSession;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::schema::{accounts, users};
use crate::settings::Settings;
use diesel::prelude::*;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rocket::http::CookieJar;
use rocket::http::Cookie;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

#[derive(Insertable)]
#[table_name = "users"]
struct NewUser {
    name: String,
    email: String,
}

#[derive(Insertable)]
#[table_name = "accounts"]
struct NewAccount {
    user_id: i32,
    provider: String,
    provider_account_id: String,
}

/// Claims of a verified Google id token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
}

/// Profile shape returned by the Facebook Graph `/me` endpoint.
#[derive(Debug, Deserialize)]
struct FacebookProfile {
    id: String,
    name: String,
    email: Option<String>,
}

/// Provider-agnostic identity a login resolves to before it touches the
/// database.
struct OauthProfile {
    provider: &'static str,
    provider_account_id: String,
    name: String,
    email: String,
}

#[derive(Serialize, Deserialize)]
pub(super) struct SessionCookie {
    pub(super) session_key: String,
    pub(super) creation_time: SystemTime,
}

#[get("/me")]
pub(crate) async fn check_login(user: UserLoggedIn) -> Json<UserOut> {
    Json(user.0)
}

#[get("/me", rank = 2)]
pub(crate) async fn check_login_unauthorised() -> ErrorResponse {
    ErrorResponse::unauthorized("Not authenticated")
}

#[post("/login/google", data = "<token>")]
pub(crate) async fn login_google(
    token: String,
    sessions: &State<UserSession>,
    conn: DbConn,
    cookies: &CookieJar<'_>,
    settings: &State<Settings>,
) -> Result<&'static str, ErrorResponse> {
    let parser = jsonwebtoken_google::Parser::new(&settings.google_client_id);
    let claims = parser
        .parse::<TokenClaims>(&token)
        .await
        .map_err(|_| ErrorResponse::unauthorized("Couldn't validate Google account"))?;

    let profile = OauthProfile {
        provider: "google",
        provider_account_id: claims.sub,
        name: claims.name,
        email: claims.email,
    };

    establish_session(profile, sessions, conn, cookies).await
}

#[post("/login/facebook", data = "<token>")]
pub(crate) async fn login_facebook(
    token: String,
    sessions: &State<UserSession>,
    conn: DbConn,
    cookies: &CookieJar<'_>,
) -> Result<&'static str, ErrorResponse> {
    let response = reqwest::Client::new()
        .get("https://graph.facebook.com/me")
        .query(&[("fields", "id,name,email"), ("access_token", &token)])
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|_| ErrorResponse::unauthorized("Couldn't validate Facebook account"))?;

    let facebook = response
        .json::<FacebookProfile>()
        .await
        .map_err(|_| ErrorResponse::unauthorized("Couldn't validate Facebook account"))?;

    let profile = OauthProfile {
        provider: "facebook",
        provider_account_id: facebook.id,
        name: facebook.name,
        email: facebook.email.unwrap_or_default(),
    };

    establish_session(profile, sessions, conn, cookies).await
}

async fn establish_session(
    profile: OauthProfile,
    sessions: &State<UserSession>,
    conn: DbConn,
    cookies: &CookieJar<'_>,
) -> Result<&'static str, ErrorResponse> {
    let user = conn
        .run(move |c| find_or_create_user(c, &profile))
        .await
        .map_err(|err| ErrorResponse::from_diesel(err, "Couldn't log in"))?;

    if user.is_blocked {
        return Err(ErrorResponse::forbidden("Account is blocked"));
    }

    let session_key = generate_session_key();

    sessions
        .sessions
        .lock()
        .map_err(|_| ErrorResponse::internal("Couldn't update user session"))?
        .insert(session_key.clone(), user.id);

    let cookie = SessionCookie {
        session_key,
        creation_time: SystemTime::now(),
    };

    let cookie_string = serde_json::to_string(&cookie).map_err(|err| {
        ErrorResponse::internal(&format!("Couldn't create session cookie {}", err))
    })?;

    cookies.add_private(Cookie::new("session", cookie_string));

    Ok("Success")
}

/// Looks up the linked account for this provider identity, creating the
/// user and the account link on first login.
fn find_or_create_user(c: &PgConnection, profile: &OauthProfile) -> QueryResult<User> {
    let existing = accounts::table
        .filter(
            accounts::provider
                .eq(profile.provider)
                .and(accounts::provider_account_id.eq(&profile.provider_account_id)),
        )
        .inner_join(users::table)
        .select(users::all_columns)
        .first::<User>(c)
        .optional()?;

    if let Some(user) = existing {
        return Ok(user);
    }

    c.transaction::<_, diesel::result::Error, _>(|| {
        let user = diesel::insert_into(users::table)
            .values(&NewUser {
                name: profile.name.clone(),
                email: profile.email.clone(),
            })
            .get_result::<User>(c)?;

        diesel::insert_into(accounts::table)
            .values(&NewAccount {
                user_id: user.id,
                provider: profile.provider.to_string(),
                provider_account_id: profile.provider_account_id.clone(),
            })
            .execute(c)?;

        Ok(user)
    })
}

fn generate_session_key() -> String {
    const LEN: usize = 32;

    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keys_are_long_and_alphanumeric() {
        let key = generate_session_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, generate_session_key());
    }

    #[test]
    fn session_cookie_round_trips() {
        let cookie = SessionCookie {
            session_key: "abc123".to_string(),
            creation_time: SystemTime::now(),
        };
        let parsed =
            serde_json::from_str::<SessionCookie>(&serde_json::to_string(&cookie).unwrap())
                .unwrap();
        assert_eq!(parsed.session_key, cookie.session_key);
        assert_eq!(parsed.creation_time, cookie.creation_time);
    }

    #[test]
    fn facebook_profile_tolerates_missing_email() {
        let profile =
            serde_json::from_str::<FacebookProfile>(r#"{"id":"42","name":"Ada"}"#).unwrap();
        assert_eq!(profile.id, "42");
        assert!(profile.email.is_none());
    }
}
