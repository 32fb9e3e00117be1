use std::path::Path;

use chrono::NaiveDate;

use crate::config::CLOUD_DRIVE_CONFIG;
use crate::model::error::file_errors::{DeleteFileError, GetFileError, UploadFileError};
use crate::model::repository::FileRecord;
use crate::repository::{file_repository, open_connection};
use crate::service::{blob_store, file_service};
use crate::test::{
    cleanup, create_blob_disk, create_file_db_entry, create_user_db_entry, refresh_db,
    remove_files,
};

#[test]
fn check_upload_rules_rejects_oversized_files() {
    refresh_db();
    let too_big = CLOUD_DRIVE_CONFIG.upload.max_size_bytes + 1;
    assert_eq!(
        Err(UploadFileError::TooLarge),
        file_service::check_upload_rules("test.txt", too_big)
    );
    cleanup();
}

#[test]
fn check_upload_rules_rejects_extensions_off_the_allow_list() {
    refresh_db();
    assert_eq!(
        Err(UploadFileError::TypeNotAllowed),
        file_service::check_upload_rules("evil.exe", 4)
    );
    assert_eq!(
        Err(UploadFileError::TypeNotAllowed),
        file_service::check_upload_rules("no_extension", 4)
    );
    cleanup();
}

#[test]
fn check_upload_rules_ignores_extension_case() {
    refresh_db();
    assert_eq!(Ok(()), file_service::check_upload_rules("photo.JPG", 4));
    assert_eq!(Ok(()), file_service::check_upload_rules("notes.txt", 4));
    cleanup();
}

#[test]
fn record_uploaded_blob_cleans_up_the_blob_when_the_insert_fails() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    create_blob_disk(user_id, "orphan.txt", "test");
    let blob_path = format!("{}/{user_id}/orphan.txt", blob_store::storage_dir());
    // make the insert impossible so the compensating delete has to run
    let con = open_connection();
    con.execute_batch("drop table files;").unwrap();
    con.close().unwrap();
    let result = file_service::record_uploaded_blob(
        user_id,
        "test.txt",
        "text/plain",
        "/",
        &blob_path,
        4,
    );
    assert_eq!(Err(UploadFileError::FailWriteDb), result);
    assert!(
        !Path::new(blob_path.as_str()).exists(),
        "the orphaned blob should have been deleted"
    );
    cleanup();
}

#[test]
fn record_uploaded_blob_creates_the_record() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    create_blob_disk(user_id, "kept.txt", "test");
    let blob_path = format!("{}/{user_id}/kept.txt", blob_store::storage_dir());
    let created =
        file_service::record_uploaded_blob(user_id, "test.txt", "text/plain", "/", &blob_path, 4)
            .unwrap();
    assert_eq!("test.txt", created.original_name);
    assert_eq!(4, created.size);
    assert_eq!("/", created.folder_path);
    assert!(Path::new(blob_path.as_str()).exists());
    cleanup();
}

#[test]
fn download_file_returns_not_found_for_missing_record() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    assert_eq!(
        Err(GetFileError::NotFound),
        file_service::download_file(user.id.unwrap(), 1234).map(|_| ())
    );
    cleanup();
}

#[test]
fn download_file_returns_not_found_when_the_blob_is_gone() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    // record without a blob behind it
    let id = create_file_db_entry(user_id, "test.txt", "missing.txt", "/", 4);
    assert_eq!(
        Err(GetFileError::NotFound),
        file_service::download_file(user_id, id).map(|_| ())
    );
    cleanup();
}

#[test]
fn download_file_never_crosses_owners() {
    refresh_db();
    remove_files();
    let owner = create_user_db_entry("owner", "owner@example.com");
    let other = create_user_db_entry("other", "other@example.com");
    let owner_id = owner.id.unwrap();
    create_blob_disk(owner_id, "blob.txt", "test");
    let id = create_file_db_entry(owner_id, "test.txt", "blob.txt", "/", 4);
    assert_eq!(
        Err(GetFileError::NotFound),
        file_service::download_file(other.id.unwrap(), id).map(|_| ())
    );
    // the owner still sees it
    assert!(file_service::download_file(owner_id, id).is_ok());
    cleanup();
}

#[test]
fn delete_file_removes_blob_and_record() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    create_blob_disk(user_id, "blob.txt", "test");
    let id = create_file_db_entry(user_id, "test.txt", "blob.txt", "/", 4);
    let blob_path = format!("{}/{user_id}/blob.txt", blob_store::storage_dir());
    assert_eq!(Ok(()), file_service::delete_file(user_id, id));
    assert!(!Path::new(blob_path.as_str()).exists());
    // the record is gone too, so a second delete has nothing to find
    assert_eq!(
        Err(DeleteFileError::NotFound),
        file_service::delete_file(user_id, id)
    );
    cleanup();
}

#[test]
fn delete_file_tolerates_an_already_missing_blob() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    let id = create_file_db_entry(user_id, "test.txt", "missing.txt", "/", 4);
    assert_eq!(Ok(()), file_service::delete_file(user_id, id));
    cleanup();
}

#[test]
fn delete_file_never_crosses_owners() {
    refresh_db();
    remove_files();
    let owner = create_user_db_entry("owner", "owner@example.com");
    let other = create_user_db_entry("other", "other@example.com");
    let owner_id = owner.id.unwrap();
    create_blob_disk(owner_id, "blob.txt", "test");
    let id = create_file_db_entry(owner_id, "test.txt", "blob.txt", "/", 4);
    assert_eq!(
        Err(DeleteFileError::NotFound),
        file_service::delete_file(other.id.unwrap(), id)
    );
    // nothing was touched
    assert!(file_service::download_file(owner_id, id).is_ok());
    cleanup();
}

#[test]
fn get_files_returns_newest_first() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    let con = open_connection();
    for (name, hour) in [("first.txt", 10), ("second.txt", 11), ("third.txt", 12)] {
        file_repository::create_file(
            &FileRecord {
                id: None,
                user_id,
                filename: format!("blob-{name}"),
                original_name: String::from(name),
                file_path: format!("{}/{user_id}/blob-{name}", blob_store::storage_dir()),
                file_size: 4,
                mime_type: String::from("text/plain"),
                folder_path: String::from("/"),
                created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
            },
            &con,
        )
        .unwrap();
    }
    con.close().unwrap();
    let names: Vec<String> = file_service::get_files(user_id, None)
        .unwrap()
        .iter()
        .map(|f| f.original_name.clone())
        .collect();
    assert_eq!(vec!["third.txt", "second.txt", "first.txt"], names);
    cleanup();
}

#[test]
fn get_files_filters_by_folder() {
    refresh_db();
    remove_files();
    let user = create_user_db_entry("username", "user@example.com");
    let user_id = user.id.unwrap();
    create_file_db_entry(user_id, "root.txt", "blob-root.txt", "/", 4);
    create_file_db_entry(user_id, "nested.txt", "blob-nested.txt", "/docs", 4);
    let root: Vec<String> = file_service::get_files(user_id, Some("/"))
        .unwrap()
        .iter()
        .map(|f| f.original_name.clone())
        .collect();
    let docs: Vec<String> = file_service::get_files(user_id, Some("/docs"))
        .unwrap()
        .iter()
        .map(|f| f.original_name.clone())
        .collect();
    assert_eq!(vec!["root.txt"], root);
    assert_eq!(vec!["nested.txt"], docs);
    cleanup();
}
