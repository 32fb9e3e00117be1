use chrono::NaiveDateTime;
use rocket::http::ContentType;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;

use crate::model::repository::FileRecord;
use crate::model::response::BasicMessage;

/// the api view of a stored file. The generated blob name and path stay internal
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileApi {
    pub id: u32,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "folderPath")]
    pub folder_path: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: NaiveDateTime,
}

impl From<&FileRecord> for FileApi {
    fn from(value: &FileRecord) -> Self {
        Self {
            // always present when the record came out of the database
            id: value.id.unwrap(),
            original_name: value.original_name.clone(),
            size: value.file_size,
            mime_type: value.mime_type.clone(),
            folder_path: value.folder_path.clone(),
            uploaded_at: value.created_at,
        }
    }
}

/// streams a blob back to the client under its original name.
/// Built by hand because the Responder derive can't attach a Content-Disposition header
pub struct FileAttachment {
    pub file: std::fs::File,
    pub size: u64,
    pub mime_type: String,
    pub download_name: String,
}

impl<'r> Responder<'r, 'static> for FileAttachment {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let content_type =
            ContentType::parse_flexible(&self.mime_type).unwrap_or(ContentType::Binary);
        Response::build()
            .header(content_type)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.download_name),
            )
            .sized_body(
                Some(self.size as usize),
                rocket::tokio::fs::File::from_std(self.file),
            )
            .ok()
    }
}

#[derive(Responder)]
pub enum UploadFileResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<FileApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetFilesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<FileApi>>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DownloadFileResponse {
    #[response(status = 200)]
    Success(FileAttachment),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteFileResponse {
    #[response(status = 204)]
    Success(super::NoContent),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}
