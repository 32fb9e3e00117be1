use std::backtrace::Backtrace;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::CLOUD_DRIVE_CONFIG;
use crate::model::error::auth_errors::{LoginError, RegisterError, TokenError};
use crate::model::guard::auth::AuthenticatedUser;
use crate::model::repository::User;
use crate::model::request::{LoginRequest, RegisterRequest};
use crate::model::response::auth_responses::{SessionApi, UserApi};
use crate::repository::{open_connection, user_repository};

/// claims embedded in every issued bearer token
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// the account id the token was issued to
    pub sub: u32,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

//language=RegExp
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$").unwrap());

/// creates an account and signs a first token for it.
/// Both identity halves are checked for collisions up front; the unique
/// constraints on the users table catch anything that races past the check
pub fn register(request: &RegisterRequest) -> Result<SessionApi, RegisterError> {
    let username = request.username.trim();
    let email = request.email.trim();
    if username.len() < 3 {
        return Err(RegisterError::InvalidInput(
            "username must be at least 3 characters".to_string(),
        ));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(RegisterError::InvalidInput("email is not valid".to_string()));
    }
    if request.password.len() < 6 {
        return Err(RegisterError::InvalidInput(
            "password must be at least 6 characters".to_string(),
        ));
    }
    let con = open_connection();
    let existing = user_repository::get_by_username_or_email(username, email, &con);
    match existing {
        Ok(Some(_)) => {
            con.close().unwrap();
            return Err(RegisterError::DuplicateIdentity);
        }
        Ok(None) => {}
        Err(_) => {
            con.close().unwrap();
            return Err(RegisterError::DbFailure);
        }
    };
    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!(
                "Failed to hash password, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(RegisterError::HashFailure);
        }
    };
    let user = User {
        id: None,
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        created_at: chrono::offset::Local::now().naive_local(),
    };
    let created = user_repository::create_user(&user, &con);
    con.close().unwrap();
    let created = match created {
        Ok(user) => user,
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            // a concurrent registration slipped in between the check and the insert
            return Err(RegisterError::DuplicateIdentity);
        }
        Err(e) => {
            log::error!(
                "Failed to create user, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RegisterError::DbFailure);
        }
    };
    match issue_token(&created) {
        Ok(token) => Ok(SessionApi {
            token,
            user: UserApi::from(&created),
        }),
        Err(e) => {
            log::error!(
                "Failed to sign token for new user, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(RegisterError::TokenFailure)
        }
    }
}

/// verifies a username-or-email + password pair and signs a token.
/// An unknown identifier and a wrong password are deliberately
/// indistinguishable to the caller
pub fn login(request: &LoginRequest) -> Result<SessionApi, LoginError> {
    let identifier = request.username.trim();
    let con = open_connection();
    let found = user_repository::get_by_username_or_email(identifier, identifier, &con);
    con.close().unwrap();
    let user = match found {
        Ok(Some(user)) => user,
        Ok(None) => return Err(LoginError::BadCredentials),
        Err(_) => return Err(LoginError::DbFailure),
    };
    if !verify_password(&request.password, &user.password_hash) {
        return Err(LoginError::BadCredentials);
    }
    match issue_token(&user) {
        Ok(token) => Ok(SessionApi {
            token,
            user: UserApi::from(&user),
        }),
        Err(e) => {
            log::error!(
                "Failed to sign token at login, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(LoginError::TokenFailure)
        }
    }
}

/// signs a bearer token for the passed user with the configured expiry
pub fn issue_token(user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiry = now + chrono::Duration::days(CLOUD_DRIVE_CONFIG.auth.token_expiry_days as i64);
    let claims = Claims {
        // always present when the user came out of the database
        sub: user.id.unwrap(),
        username: user.username.clone(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(CLOUD_DRIVE_CONFIG.auth.jwt_secret.as_bytes()),
    )
}

/// verifies a bearer token's signature and expiry and resolves it to the
/// identity embedded inside
pub fn validate_token(token: &str) -> Result<AuthenticatedUser, TokenError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(CLOUD_DRIVE_CONFIG.auth.jwt_secret.as_bytes()),
        &Validation::default(),
    );
    match decoded {
        Ok(data) => Ok(AuthenticatedUser {
            id: data.claims.sub,
            username: data.claims.username,
            email: data.claims.email,
        }),
        Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
            Err(TokenError::Expired)
        }
        Err(_) => Err(TokenError::Invalid),
    }
}

/// argon2 with default params; the salt travels inside the PHC string
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash failed to parse, error is {e:?}");
            false
        }
    }
}
