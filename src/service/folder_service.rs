use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::model::error::folder_errors::{CreateFolderError, GetFoldersError};
use crate::model::repository::Folder;
use crate::model::request::folder_requests::CreateFolderRequest;
use crate::model::response::folder_responses::FolderApi;
use crate::repository::{folder_repository, open_connection};

/// missing, blank, or root-ish paths all collapse to `/`; anything else
/// keeps a single leading slash and loses any trailing one
pub fn normalize_folder_path(path: Option<&str>) -> String {
    let path = path.unwrap_or("/").trim();
    if path.is_empty() || path == "/" {
        return String::from("/");
    }
    let path = path.trim_end_matches('/');
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// creates a folder record under the passed parent. Pure metadata; no
/// directories are created on the disk, blobs never live under folder paths
pub fn create_folder(
    user_id: u32,
    request: &CreateFolderRequest,
) -> Result<FolderApi, CreateFolderError> {
    let name = request.name.trim();
    // a slash in the name would silently break the parent + / + name invariant
    if name.is_empty() || name.contains('/') {
        return Err(CreateFolderError::InvalidName);
    }
    let parent_path = normalize_folder_path(request.parent_path.as_deref());
    let path = if parent_path == "/" {
        format!("/{name}")
    } else {
        format!("{parent_path}/{name}")
    };
    let con = open_connection();
    let created = create_folder_internal(user_id, name, &path, &parent_path, &con);
    con.close().unwrap();
    created
}

fn create_folder_internal(
    user_id: u32,
    name: &str,
    path: &str,
    parent_path: &str,
    con: &Connection,
) -> Result<FolderApi, CreateFolderError> {
    // make sure the folder doesn't exist
    match folder_repository::get_by_path(user_id, path, con) {
        Ok(Some(_)) => return Err(CreateFolderError::AlreadyExists),
        Ok(None) => {}
        Err(_) => return Err(CreateFolderError::DbFailure),
    };
    let folder = Folder {
        id: None,
        user_id,
        name: name.to_string(),
        path: path.to_string(),
        parent_path: parent_path.to_string(),
        created_at: chrono::offset::Local::now().naive_local(),
    };
    match folder_repository::create_folder(&folder, con) {
        Ok(created) => Ok(FolderApi::from(&created)),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            // a concurrent create slipped in between the check and the insert
            Err(CreateFolderError::AlreadyExists)
        }
        Err(e) => {
            log::error!(
                "Error trying to save folder!\nException is: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateFolderError::DbFailure)
        }
    }
}

/// returns the owner's folders directly under the passed parent,
/// alphabetical by name
pub fn get_folders(user_id: u32, parent: Option<&str>) -> Result<Vec<FolderApi>, GetFoldersError> {
    let parent_path = normalize_folder_path(parent);
    let con = open_connection();
    let result = folder_repository::get_child_folders(user_id, &parent_path, &con);
    con.close().unwrap();
    match result {
        Ok(folders) => Ok(folders.iter().map(FolderApi::from).collect()),
        Err(e) => {
            log::error!(
                "Failed to pull child folder info from database, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetFoldersError::DbFailure)
        }
    }
}
