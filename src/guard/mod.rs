use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::model::error::auth_errors::TokenError;
use crate::model::guard::auth::ValidateResult;
use crate::service::auth_service;

/// carries the raw bearer token off the Authorization header.
/// Handlers call `validate` to turn it into an identity
#[derive(Debug)]
pub struct HeaderAuth {
    pub token: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of the header must be a bearer token
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        let stripped = header.trim();
        if !stripped.starts_with("Bearer ") {
            return Err("Invalid bearer auth format: missing scheme");
        }
        let token = stripped["Bearer ".len()..].trim();
        if token.is_empty() {
            return Err("Invalid bearer auth format: missing token");
        }
        Ok(HeaderAuth {
            token: token.to_string(),
        })
    }

    /// verifies the token and resolves it to the account it was issued for.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(&self) -> ValidateResult {
        match auth_service::validate_token(&self.token) {
            Ok(user) => ValidateResult::Ok(user),
            Err(TokenError::Expired) => ValidateResult::Expired,
            Err(TokenError::Invalid) => ValidateResult::Invalid,
        }
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}
