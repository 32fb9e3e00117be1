#[macro_use]
extern crate rocket;

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use rocket::{Build, Rocket};

use handler::{
    api_handler::health,
    auth_handler::{login, register},
    file_handler::{delete_file, download_file, list_files, upload_file},
    folder_handler::{create_folder, list_folders},
};

use crate::config::CLOUD_DRIVE_CONFIG;
use crate::repository::initialize_db;

mod config;
mod db_migrations;
mod guard;
mod handler;
mod model;
mod repository;
mod service;
#[cfg(test)]
mod test;

#[cfg(not(test))]
static TEMP_DIR: &str = "./.cloud_drive_temp";

/// where rocket buffers uploads before they move into the blob store.
/// Must share a file system with the storage root so the move is a rename
#[cfg(not(test))]
pub fn temp_dir() -> String {
    TEMP_DIR.to_string()
}

#[cfg(test)]
pub fn temp_dir() -> String {
    format!("./.cloud_drive_temp_{}", test::current_thread_name())
}

/// sends log output to stdout and ./cloud_drive.log
fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(fern::log_file("cloud_drive.log")?)
        .apply()?;
    Ok(())
}

#[launch]
fn rocket() -> Rocket<Build> {
    // tests stand up several rockets; only the first logger wins
    setup_logger().ok();
    initialize_db().unwrap();
    fs::remove_dir_all(Path::new(temp_dir().as_str()))
        .or(Ok::<(), ()>(()))
        .unwrap();
    fs::create_dir_all(Path::new(temp_dir().as_str())).unwrap();
    let figment = rocket::Config::figment()
        .merge(("temp_dir", temp_dir()))
        // rocket's own caps sit above the configured limit so the service
        // check is the one that callers actually see
        .merge(("limits.file", CLOUD_DRIVE_CONFIG.upload.max_size_bytes * 2))
        .merge(("limits.data-form", CLOUD_DRIVE_CONFIG.upload.max_size_bytes * 2));
    rocket::custom(figment)
        .mount("/", routes![health])
        .mount("/auth", routes![register, login])
        .mount(
            "/files",
            routes![
                upload_file,
                list_files,
                download_file,
                delete_file,
                create_folder,
                list_folders
            ],
        )
}
