//! User Endpoints
//!
//! Sign-in stores the bearer token used by every other request.

use serde::{Deserialize, Serialize};

use super::{get_one, post};
use crate::error::ApiError;
use crate::models::User;

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Sign in and remember the token
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let response: LoginResponse = post("login", &LoginArgs { email, password }).await?;
    super::set_token(&response.token);
    Ok(response)
}

pub async fn me() -> Result<User, ApiError> {
    get_one("user").await
}

/// Revoke the token server-side; the local token is dropped either way
pub async fn logout() -> Result<(), ApiError> {
    let result: Result<serde_json::Value, ApiError> = post("logout", &serde_json::json!({})).await;
    super::clear_token();
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_accepts_access_token() {
        let r: LoginResponse = serde_json::from_str(r#"{"access_token":"abc","user":{"id":1,"name":"Ann"}}"#).unwrap();
        assert_eq!(r.token, "abc");
        assert_eq!(r.user.map(|u| u.name), Some("Ann".to_string()));
    }
}
