use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::User;
use crate::model::response::BasicMessage;

/// the public view of an account; never carries the credential hash
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UserApi {
    pub id: u32,
    pub username: String,
    pub email: String,
}

/// a signed bearer token plus the profile it was issued for
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SessionApi {
    pub token: String,
    pub user: UserApi,
}

impl From<&User> for UserApi {
    fn from(value: &User) -> Self {
        Self {
            // always present when the user came out of the database
            id: value.id.unwrap(),
            username: value.username.clone(),
            email: value.email.clone(),
        }
    }
}

#[derive(Responder)]
pub enum RegisterResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<SessionApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    IdentityTaken(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum LoginResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<SessionApi>),
    #[response(status = 401, content_type = "json")]
    BadCredentials(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}
