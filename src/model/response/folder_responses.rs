use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::Folder;
use crate::model::response::BasicMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FolderApi {
    pub id: u32,
    pub name: String,
    pub path: String,
    #[serde(rename = "parentPath")]
    pub parent_path: String,
}

impl From<&Folder> for FolderApi {
    fn from(value: &Folder) -> Self {
        Self {
            // always present when the folder came out of the database
            id: value.id.unwrap(),
            name: value.name.clone(),
            path: value.path.clone(),
            parent_path: value.parent_path.clone(),
        }
    }
}

#[derive(Responder)]
pub enum CreateFolderResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<FolderApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetFoldersResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<FolderApi>>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}
