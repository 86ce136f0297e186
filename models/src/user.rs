// user.rs
use serde::Serialize;

/// Demo login tuple. Lives in a fixed in-source list; passwords are plain
/// text on purpose — this is mock authentication, not a credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoUser {
    pub id: i64,
    pub login_id: &'static str,
    pub password: &'static str,
    pub role: &'static str,
    pub name: &'static str,
    pub district: &'static str,
}

/// The user view returned by login/verify. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub name: String,
    pub district: String,
}

impl From<&DemoUser> for PublicUser {
    fn from(u: &DemoUser) -> Self {
        PublicUser {
            id: u.id,
            username: u.login_id.to_string(),
            role: u.role.to_string(),
            name: u.name.to_string(),
            district: u.district.to_string(),
        }
    }
}
