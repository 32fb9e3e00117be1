use rocket::form::Form;
use rocket::serde::json::Json;

use crate::guard::HeaderAuth;
use crate::model::error::file_errors::{DeleteFileError, GetFileError, UploadFileError};
use crate::model::guard::auth::ValidateResult;
use crate::model::request::file_requests::UploadFileRequest;
use crate::model::response::file_responses::{
    DeleteFileResponse, DownloadFileResponse, FileAttachment, GetFilesResponse, UploadFileResponse,
};
use crate::model::response::BasicMessage;
use crate::service::file_service;

/// accepts a file via multipart form and stores it off for the caller
#[post("/upload", data = "<request>")]
pub async fn upload_file(request: Form<UploadFileRequest<'_>>, auth: HeaderAuth) -> UploadFileResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return UploadFileResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return UploadFileResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let mut request = request.into_inner();
    match file_service::upload_file(user.id, &mut request).await {
        Ok(file) => UploadFileResponse::Created(Json::from(file)),
        Err(UploadFileError::MissingInfo(message)) => {
            UploadFileResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(UploadFileError::TooLarge) => UploadFileResponse::BadRequest(BasicMessage::new(
            "The file is larger than the configured size limit.",
        )),
        Err(UploadFileError::TypeNotAllowed) => {
            UploadFileResponse::BadRequest(BasicMessage::new("That file type is not allowed."))
        }
        Err(UploadFileError::FailWriteDisk) => UploadFileResponse::ServerError(BasicMessage::new(
            "Failed to save file to disk. Check server logs for details",
        )),
        Err(UploadFileError::FailWriteDb) => UploadFileResponse::ServerError(BasicMessage::new(
            "Failed to save file info to database. Check server logs for details",
        )),
    }
}

#[get("/list?<folder>")]
pub fn list_files(folder: Option<String>, auth: HeaderAuth) -> GetFilesResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return GetFilesResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return GetFilesResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match file_service::get_files(user.id, folder.as_deref()) {
        Ok(files) => GetFilesResponse::Success(Json::from(files)),
        Err(_) => GetFilesResponse::ServerError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

#[get("/download/<id>")]
pub fn download_file(id: u32, auth: HeaderAuth) -> DownloadFileResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return DownloadFileResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return DownloadFileResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match file_service::download_file(user.id, id) {
        Ok((record, file)) => DownloadFileResponse::Success(FileAttachment {
            file,
            size: record.file_size,
            mime_type: record.mime_type.clone(),
            download_name: record.original_name.clone(),
        }),
        Err(GetFileError::NotFound) => DownloadFileResponse::NotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(GetFileError::DbFailure) => DownloadFileResponse::ServerError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub fn delete_file(id: u32, auth: HeaderAuth) -> DeleteFileResponse {
    let user = match auth.validate() {
        ValidateResult::Ok(user) => user,
        ValidateResult::Expired => {
            return DeleteFileResponse::Unauthorized("Token is expired".to_string())
        }
        ValidateResult::Invalid => {
            return DeleteFileResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match file_service::delete_file(user.id, id) {
        Ok(()) => DeleteFileResponse::Success(()),
        Err(DeleteFileError::NotFound) => DeleteFileResponse::NotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(_) => DeleteFileResponse::ServerError(BasicMessage::new(
            "Failed to delete the file. Check server logs for details.",
        )),
    }
}
