use std::fs;
use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use crate::model::repository::{FileRecord, Folder, User};
use crate::repository::{
    file_repository, folder_repository, initialize_db, open_connection, user_repository,
};
use crate::service::{auth_service, blob_store};
use crate::temp_dir;


#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

#[cfg(test)]
pub fn remove_files() {
    let dir = blob_store::storage_dir();
    let file_path = Path::new(dir.as_str());
    if file_path.exists() {
        remove_dir_all(file_path).unwrap_or(());
    }
}

/// creates an account with a junk credential hash and returns it with its id.
/// Tests that go through the token path never check the password
#[cfg(test)]
pub fn create_user_db_entry(username: &str, email: &str) -> User {
    let connection = open_connection();
    let user = user_repository::create_user(
        &User {
            id: None,
            username: String::from(username),
            email: String::from(email),
            password_hash: String::from("unused"),
            created_at: chrono::offset::Local::now().naive_local(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    user
}

/// a ready-to-use Authorization header value for the passed user
#[cfg(test)]
pub fn bearer_token_for(user: &User) -> String {
    format!("Bearer {}", auth_service::issue_token(user).unwrap())
}

/// creates a file record pointing at `<storage>/<user_id>/<blob_name>`
#[cfg(test)]
pub fn create_file_db_entry(
    user_id: u32,
    original_name: &str,
    blob_name: &str,
    folder_path: &str,
    size: u64,
) -> u32 {
    let connection = open_connection();
    let id = file_repository::create_file(
        &FileRecord {
            id: None,
            user_id,
            filename: String::from(blob_name),
            original_name: String::from(original_name),
            file_path: format!("{}/{user_id}/{blob_name}", blob_store::storage_dir()),
            file_size: size,
            mime_type: String::from("text/plain"),
            folder_path: String::from(folder_path),
            created_at: chrono::offset::Local::now().naive_local(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    id
}

/// writes a blob on the disk where `create_file_db_entry` points
#[cfg(test)]
pub fn create_blob_disk(user_id: u32, blob_name: &str, contents: &str) {
    let dir = format!("{}/{user_id}", blob_store::storage_dir());
    fs::create_dir_all(Path::new(dir.as_str())).unwrap();
    fs::write(Path::new(format!("{dir}/{blob_name}").as_str()), contents).unwrap();
}

#[cfg(test)]
pub fn create_folder_db_entry(user_id: u32, name: &str, path: &str, parent_path: &str) -> u32 {
    let connection = open_connection();
    let folder = folder_repository::create_folder(
        &Folder {
            id: None,
            user_id,
            name: String::from(name),
            path: String::from(path),
            parent_path: String::from(parent_path),
            created_at: chrono::offset::Local::now().naive_local(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    folder.id.unwrap()
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_files();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    remove_dir_all(Path::new(temp_dir().as_str())).unwrap_or(());
}
