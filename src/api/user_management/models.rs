use serde::Serialize;
use std::fmt::Debug;

#[derive(Queryable, Debug)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_blocked: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_blocked: bool,
}

impl From<User> for UserOut {
    fn from(user: User) -> UserOut {
        UserOut {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            is_blocked: user.is_blocked,
        }
    }
}

/// Request guard: any authenticated, non-blocked user.
pub struct UserLoggedIn(pub UserOut);

/// Request guard: an authenticated user carrying the admin flag.
pub struct AdminUser(pub UserOut);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_camel_case_flags() {
        let out = UserOut {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            is_admin: true,
            is_blocked: false,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert_eq!(json["isBlocked"], false);
        assert!(json.get("is_admin").is_none());
    }
}
