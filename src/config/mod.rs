use std::string::ToString;

use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// root directory that owner-scoped blob directories are created under
#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub location: String,
}

/// config properties for bearer token creation and verification
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(rename = "jwtsecret")]
    pub jwt_secret: String,
    #[serde(rename = "tokenexpirydays")]
    pub token_expiry_days: u32,
}

#[derive(Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(rename = "maxsizebytes")]
    pub max_size_bytes: u64,
    #[serde(rename = "allowedextensions")]
    pub allowed_extensions: Vec<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct CloudDriveConfig {
    pub database: DbConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
}

/// Parses the config file located at ./CloudDrive.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> CloudDriveConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./CloudDrive.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return CLOUD_DRIVE_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(CLOUD_DRIVE_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static CLOUD_DRIVE_CONFIG: Lazy<CloudDriveConfig> = Lazy::new(parse_config);
static CLOUD_DRIVE_CONFIG_DEFAULT: Lazy<CloudDriveConfig> = Lazy::new(|| CloudDriveConfig {
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
    storage: StorageConfig {
        location: "./storage".to_string(),
    },
    auth: AuthConfig {
        jwt_secret: "change-me-before-deploying".to_string(),
        token_expiry_days: 7,
    },
    upload: UploadConfig {
        max_size_bytes: 100 * 1024 * 1024,
        allowed_extensions: [
            "jpg", "jpeg", "png", "gif", "pdf", "doc", "docx", "txt", "zip", "mp4", "mp3",
        ]
        .iter()
        .map(|e| e.to_string())
        .collect(),
    },
});
