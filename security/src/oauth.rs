// security/src/oauth.rs
//
// Best-effort Google sign-in for the demo deployment. The callback exchanges
// the authorization code and fetches the profile, then mints the same opaque
// session token the mock login does. Nothing is persisted; a Google session
// always lands as an unscoped Field Worker.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;

use crate::AuthError;
use models::PublicUser;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleOAuth {
    pub fn from_env(public_base_url: &str) -> Self {
        GoogleOAuth {
            client_id: std::env::var("GOOGLE_CLIENT_ID")
                .unwrap_or_else(|_| "demo-client.apps.googleusercontent.com".to_string()),
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: format!("{}/api/auth/callback/google", public_base_url),
        }
    }

    /// The consent-screen URL the SPA redirects the browser to.
    pub fn auth_url(&self) -> String {
        // Static endpoint + known-good params; parsing cannot fail here.
        let url = Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .expect("static auth endpoint URL");
        url.to_string()
    }

    /// Exchange the authorization code and fetch the user's profile.
    pub async fn exchange_code(
        &self,
        client: &reqwest::Client,
        code: &str,
    ) -> Result<GoogleUserInfo, AuthError> {
        let token: TokenResponse = client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?;

        let access_token = token
            .access_token
            .ok_or_else(|| AuthError::OAuth("no access token in response".to_string()))?;

        client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))
    }
}

/// Session for a completed Google sign-in: the token embeds the provider and
/// email, the user view defaults to an unscoped Field Worker.
pub fn google_session(info: &GoogleUserInfo) -> (PublicUser, String) {
    let token = BASE64.encode(format!(
        "google:{}:{}",
        info.email,
        Utc::now().timestamp_millis()
    ));
    let user = PublicUser {
        id: 0,
        username: info.email.clone(),
        role: "Field Worker".to_string(),
        name: info.name.clone().unwrap_or_else(|| info.email.clone()),
        district: "All".to_string(),
    };
    (user, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_url_carries_client_and_redirect() {
        let oauth = GoogleOAuth {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:5000/api/auth/callback/google".to_string(),
        };
        let url = oauth.auth_url();
        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=cid"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("callback%2Fgoogle"));
    }

    #[test]
    fn google_session_defaults_to_field_worker() {
        let info = GoogleUserInfo {
            id: "g-1".to_string(),
            email: "worker@example.com".to_string(),
            name: None,
            picture: None,
        };
        let (user, token) = google_session(&info);
        assert_eq!(user.role, "Field Worker");
        assert_eq!(user.name, "worker@example.com");
        assert!(!token.is_empty());
    }
}
