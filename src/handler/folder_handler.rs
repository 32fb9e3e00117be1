use rocket::serde::json::Json;

use crate::guard::HeaderAuth;
use crate::model::error::folder_errors::CreateFolderError;
use crate::model::guard::auth::ValidateResult;
use crate::model::request::folder_requests::CreateFolderRequest;
use crate::model::response::folder_responses::{CreateFolderResponse, GetFoldersResponse};
use crate::model::response::BasicMessage;
use crate::service::folder_service;

#[post("/folder", data = "<request>")]
pub fn create_folder(request: Json<CreateFolderRequest>, auth: HeaderAuth) -> CreateFolderResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return CreateFolderResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return CreateFolderResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match folder_service::create_folder(user.id, &request) {
        Ok(folder) => CreateFolderResponse::Created(Json::from(folder)),
        Err(CreateFolderError::InvalidName) => CreateFolderResponse::BadRequest(
            BasicMessage::new("Folder names must be non-empty and must not contain slashes."),
        ),
        Err(CreateFolderError::AlreadyExists) => CreateFolderResponse::BadRequest(
            BasicMessage::new("A folder with that path already exists."),
        ),
        Err(CreateFolderError::DbFailure) => CreateFolderResponse::ServerError(BasicMessage::new(
            "Failed to save folder info to database. Check server logs for details",
        )),
    }
}

#[get("/folders?<parent>")]
pub fn list_folders(parent: Option<String>, auth: HeaderAuth) -> GetFoldersResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return GetFoldersResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return GetFoldersResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match folder_service::get_folders(user.id, parent.as_deref()) {
        Ok(folders) => GetFoldersResponse::Success(Json::from(folders)),
        Err(_) => GetFoldersResponse::ServerError(BasicMessage::new(
            "Failed to pull folder info from database. Check server logs for details",
        )),
    }
}
