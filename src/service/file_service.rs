use std::backtrace::Backtrace;
use std::fs::File;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::CLOUD_DRIVE_CONFIG;
use crate::model::error::file_errors::{
    DeleteFileError, GetChildFilesError, GetFileError, UploadFileError,
};
use crate::model::repository::FileRecord;
use crate::model::request::file_requests::{sanitized_file_name, UploadFileRequest};
use crate::model::response::file_responses::FileApi;
use crate::repository::{file_repository, open_connection};
use crate::service::blob_store;
use crate::service::folder_service::normalize_folder_path;

/// matches file names whose extension is on the configured allow-list
static ALLOWED_EXTENSIONS: Lazy<Regex> = Lazy::new(|| {
    let joined = CLOUD_DRIVE_CONFIG.upload.allowed_extensions.join("|");
    Regex::new(format!("(?i)\\.({joined})$").as_str()).unwrap()
});

/// saves an uploaded file to the disk and the database.
/// The blob is written first and the record second, so a fault between the
/// two can only ever leave an unreferenced blob, never a record that points
/// at nothing - and the unreferenced blob gets cleaned up on the way out
pub async fn upload_file(
    user_id: u32,
    request: &mut UploadFileRequest<'_>,
) -> Result<FileApi, UploadFileError> {
    let raw_name = match request.file.raw_name() {
        Some(name) => name.dangerous_unsafe_unsanitized_raw().as_str().to_string(),
        None => {
            return Err(UploadFileError::MissingInfo(
                "file name is required".to_string(),
            ))
        }
    };
    let original_name = match sanitized_file_name(&raw_name) {
        Some(name) => name,
        None => {
            return Err(UploadFileError::MissingInfo(
                "file name is not usable".to_string(),
            ))
        }
    };
    let folder_path = normalize_folder_path(Some(request.folder_path().as_str()));
    let size = request.file.len();
    // every rule gets checked before any bytes land in the blob store
    check_upload_rules(&original_name, size)?;
    // the rules guarantee the name has an allow-listed extension
    let extension = original_name.rsplit('.').next().unwrap().to_lowercase();
    let mime_type = request
        .file
        .content_type()
        .map(|c| c.to_string())
        .unwrap_or_else(|| String::from("application/octet-stream"));
    let blob_path = match blob_store::put(user_id, &extension, &mut request.file).await {
        Ok(path) => path,
        Err(_) => return Err(UploadFileError::FailWriteDisk),
    };
    record_uploaded_blob(
        user_id,
        &original_name,
        &mime_type,
        &folder_path,
        &blob_path,
        size,
    )
}

/// enforces the configured size cap and extension allow-list.
/// Runs before any blob write so a rejected upload has zero side effects
pub fn check_upload_rules(original_name: &str, size: u64) -> Result<(), UploadFileError> {
    if size > CLOUD_DRIVE_CONFIG.upload.max_size_bytes {
        return Err(UploadFileError::TooLarge);
    }
    if !ALLOWED_EXTENSIONS.is_match(original_name) {
        return Err(UploadFileError::TypeNotAllowed);
    }
    Ok(())
}

/// records an already-written blob in the repository. If the insert fails
/// the blob is deleted again so the failed upload leaves nothing behind
pub fn record_uploaded_blob(
    user_id: u32,
    original_name: &str,
    mime_type: &str,
    folder_path: &str,
    blob_path: &str,
    size: u64,
) -> Result<FileApi, UploadFileError> {
    // the generated blob name is the last path segment
    let filename = blob_path.rsplit('/').next().unwrap().to_string();
    let record = FileRecord {
        id: None,
        user_id,
        filename,
        original_name: original_name.to_string(),
        file_path: blob_path.to_string(),
        file_size: size,
        mime_type: mime_type.to_string(),
        folder_path: folder_path.to_string(),
        created_at: chrono::offset::Local::now().naive_local(),
    };
    let con = open_connection();
    let created = file_repository::create_file(&record, &con);
    con.close().unwrap();
    match created {
        Ok(id) => Ok(FileApi::from(&FileRecord {
            id: Some(id),
            ..record
        })),
        Err(e) => {
            log::error!(
                "Failed to create file record in database, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            if blob_store::delete(blob_path).is_err() {
                log::error!("Failed to clean up orphaned blob at {blob_path} after a database fault!");
            }
            Err(UploadFileError::FailWriteDb)
        }
    }
}

/// returns the owner's files in the passed folder, newest first
pub fn get_files(user_id: u32, folder: Option<&str>) -> Result<Vec<FileApi>, GetChildFilesError> {
    let folder_path = normalize_folder_path(folder);
    let con = open_connection();
    let result = file_repository::get_files_for_folder(user_id, &folder_path, &con);
    con.close().unwrap();
    match result {
        Ok(files) => Ok(files.iter().map(FileApi::from).collect()),
        Err(e) => {
            log::error!(
                "Failed to query database for child files, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetChildFilesError::DbFailure)
        }
    }
}

/// looks up the owner's file and opens its blob for streaming.
/// A record whose blob has gone missing reports NotFound exactly like an
/// absent record; the mismatch is logged because it means the catalog and
/// the disk disagree
pub fn download_file(user_id: u32, id: u32) -> Result<(FileRecord, File), GetFileError> {
    let con = open_connection();
    let record = file_repository::get_by_id_and_user(id, user_id, &con);
    con.close().unwrap();
    let record = match record {
        Ok(record) => record,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(GetFileError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull file info from database, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(GetFileError::DbFailure);
        }
    };
    if !blob_store::exists(&record.file_path) {
        log::warn!(
            "File record {} points at a missing blob ({})! The catalog and the disk disagree.",
            record.id.unwrap(),
            record.file_path
        );
        return Err(GetFileError::NotFound);
    }
    match File::open(Path::new(record.file_path.as_str())) {
        Ok(file) => Ok((record, file)),
        Err(e) => {
            // the blob vanished between the existence check and the open;
            // treat it like it was never there
            log::warn!("Failed to open blob at {}, error is {e:?}", record.file_path);
            Err(GetFileError::NotFound)
        }
    }
}

/// removes the owner's file: blob first, then the record. If the process
/// dies between the two steps the leftover record points at a missing blob,
/// which downloads already report as NotFound, and retrying the delete still
/// works because the blob layer tolerates an absent target
pub fn delete_file(user_id: u32, id: u32) -> Result<(), DeleteFileError> {
    let con = open_connection();
    let record = match file_repository::get_by_id_and_user(id, user_id, &con) {
        Ok(record) => record,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(DeleteFileError::NotFound);
        }
        Err(e) => {
            log::error!(
                "Failed to pull file info from database, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(DeleteFileError::DbError);
        }
    };
    if blob_store::delete(&record.file_path).is_err() {
        // keep the record so the delete can be retried once the disk recovers
        con.close().unwrap();
        return Err(DeleteFileError::FileSystemError);
    }
    let deleted = file_repository::delete_by_id(id, &con);
    con.close().unwrap();
    if let Err(e) = deleted {
        log::error!(
            "Failed to delete file record {id}, error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(DeleteFileError::DbError);
    }
    Ok(())
}
