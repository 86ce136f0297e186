// security/src/lib.rs
//
// Mock authentication: a fixed in-source user directory and a trivially
// reversible opaque token (base64 of `login_id:unix_millis`). The timestamp
// is never checked and nothing is signed — verification only re-extracts the
// login id and re-looks the user up. There is no expiry and no revocation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use models::{DemoUser, PublicUser};

pub mod oauth;
pub mod roles;

pub use roles::Role;

/// The demo login directory. Matches the seeded portal deployment: one
/// state-level admin, one district admin, one field worker, one PHC nurse.
pub const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        id: 1,
        login_id: "admin@kerala.gov",
        password: "admin",
        role: "Super Admin",
        name: "Dr. Arun Kumar",
        district: "All",
    },
    DemoUser {
        id: 2,
        login_id: "wayanad@kerala.gov",
        password: "district",
        role: "District Admin",
        name: "Dr. Priya Menon",
        district: "Wayanad",
    },
    DemoUser {
        id: 3,
        login_id: "worker",
        password: "worker",
        role: "Field Worker",
        name: "Rajesh K",
        district: "Wayanad",
    },
    DemoUser {
        id: 4,
        login_id: "phc",
        password: "phc",
        role: "PHC Staff",
        name: "Nurse Anjali",
        district: "Wayanad",
    },
];

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("OAuth exchange failed: {0}")]
    OAuth(String),
}

pub fn find_user(login_id: &str) -> Option<&'static DemoUser> {
    DEMO_USERS.iter().find(|u| u.login_id == login_id)
}

/// Linear scan over the demo directory. Returns the public user view and a
/// freshly minted token.
pub fn authenticate(username: &str, password: &str) -> Result<(PublicUser, String), AuthError> {
    let user = DEMO_USERS
        .iter()
        .find(|u| u.login_id == username && u.password == password)
        .ok_or(AuthError::InvalidCredentials)?;
    Ok((PublicUser::from(user), issue_token(user.login_id)))
}

/// `base64(login_id:unix_millis)`. Opaque to clients, reversible to anyone.
pub fn issue_token(login_id: &str) -> String {
    BASE64.encode(format!("{}:{}", login_id, Utc::now().timestamp_millis()))
}

/// Decode the token, split off the login id, re-look-up the user. Any decode
/// or lookup failure collapses into `InvalidToken`.
pub fn verify_token(token: &str) -> Result<PublicUser, AuthError> {
    let decoded = BASE64.decode(token).map_err(|_| AuthError::InvalidToken)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidToken)?;
    let login_id = decoded.split(':').next().ok_or(AuthError::InvalidToken)?;
    find_user(login_id)
        .map(PublicUser::from)
        .ok_or(AuthError::InvalidToken)
}

/// SMS gateway stand-in: logs the message instead of sending it.
pub fn send_sms(mobile: &str, message: &str) {
    info!(target: "sms", %mobile, %message, "mock SMS dispatched");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credentials_issue_verifiable_token() {
        let (user, token) = authenticate("admin@kerala.gov", "admin").expect("login failed");
        assert_eq!(user.role, "Super Admin");
        assert_eq!(user.district, "All");

        let verified = verify_token(&token).expect("verify failed");
        assert_eq!(verified.username, "admin@kerala.gov");
        assert_eq!(verified.id, user.id);
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(matches!(
            authenticate("worker", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn unknown_user_is_rejected() {
        assert!(matches!(
            authenticate("nobody", "admin"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not-base64!!").is_err());
        // Well-formed base64 for a login id that does not exist.
        let fake = BASE64.encode("ghost@kerala.gov:1700000000000");
        assert!(verify_token(&fake).is_err());
    }

    #[test]
    fn token_timestamp_is_not_validated() {
        // A decades-old timestamp still verifies; expiry is out of scope.
        let stale = BASE64.encode("phc:946684800000");
        let user = verify_token(&stale).expect("stale token should verify");
        assert_eq!(user.name, "Nurse Anjali");
    }
}
