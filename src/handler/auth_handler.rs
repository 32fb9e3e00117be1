use rocket::serde::json::Json;

use crate::model::error::auth_errors::{LoginError, RegisterError};
use crate::model::request::{LoginRequest, RegisterRequest};
use crate::model::response::auth_responses::{LoginResponse, RegisterResponse};
use crate::model::response::BasicMessage;
use crate::service::auth_service;

#[post("/register", data = "<request>")]
pub fn register(request: Json<RegisterRequest>) -> RegisterResponse {
    match auth_service::register(&request) {
        Ok(session) => RegisterResponse::Created(Json::from(session)),
        Err(RegisterError::InvalidInput(message)) => {
            RegisterResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(RegisterError::DuplicateIdentity) => RegisterResponse::IdentityTaken(
            BasicMessage::new("That username or email is already taken."),
        ),
        Err(_) => RegisterResponse::ServerError(BasicMessage::new(
            "Failed to create the account. Check server logs for details",
        )),
    }
}

#[post("/login", data = "<request>")]
pub fn login(request: Json<LoginRequest>) -> LoginResponse {
    match auth_service::login(&request) {
        Ok(session) => LoginResponse::Success(Json::from(session)),
        Err(LoginError::BadCredentials) => {
            LoginResponse::BadCredentials(BasicMessage::new("Invalid credentials."))
        }
        Err(_) => LoginResponse::ServerError(BasicMessage::new(
            "Failed to log in. Check server logs for details",
        )),
    }
}
