use std::backtrace::Backtrace;
use std::fs;
use std::io;
use std::path::Path;

use rocket::fs::TempFile;
use uuid::Uuid;

use crate::model::error::file_errors::BlobError;

/// the root directory blobs live under; each owner gets their own
/// directory beneath it
#[cfg(not(test))]
pub fn storage_dir() -> String {
    use crate::config::CLOUD_DRIVE_CONFIG;

    CLOUD_DRIVE_CONFIG.storage.location.clone()
}

#[cfg(test)]
pub fn storage_dir() -> String {
    crate::test::current_thread_name()
}

/// ensures that the passed owner's blob directory exists on the file system
fn check_user_dir(user_id: u32) -> io::Result<String> {
    let dir = format!("{}/{user_id}", storage_dir());
    let path = Path::new(dir.as_str());
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(dir)
}

/// moves the uploaded bytes beneath the owner's blob directory under a
/// freshly generated name and returns the path the blob landed at.
/// The bytes arrive via temp-file-then-rename, so a failed put leaves no
/// partial blob. A generated path that somehow already exists is a hard
/// error; blobs are never overwritten
pub async fn put(
    user_id: u32,
    extension: &str,
    file: &mut TempFile<'_>,
) -> Result<String, BlobError> {
    let user_dir = match check_user_dir(user_id) {
        Ok(dir) => dir,
        Err(e) => {
            log::error!(
                "Failed to create blob directory for user {user_id}, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(BlobError::Io);
        }
    };
    let blob_path = format!("{user_dir}/{}.{extension}", Uuid::new_v4());
    if Path::new(blob_path.as_str()).exists() {
        log::error!("Refusing to overwrite existing blob at {blob_path}!");
        return Err(BlobError::AlreadyExists);
    }
    if let Err(e) = file.persist_to(&blob_path).await {
        log::error!(
            "Failed to write blob to {blob_path}, error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(BlobError::Io);
    }
    Ok(blob_path)
}

/// removes the blob if it is present and returns whether anything was
/// removed. An already-absent blob is not an error, so deletes can be
/// retried freely
pub fn delete(path: &str) -> Result<bool, BlobError> {
    match fs::remove_file(Path::new(path)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            log::error!(
                "Failed to remove blob at {path}, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(BlobError::Io)
        }
    }
}

/// existence check used before serving a download
pub fn exists(path: &str) -> bool {
    Path::new(path).exists()
}
