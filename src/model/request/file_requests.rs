use once_cell::sync::Lazy;
use regex::Regex;
use rocket::fs::TempFile;

#[derive(FromForm)]
#[allow(non_snake_case)] // cannot serde rename the field, and it's better to have camel case for the api
pub struct UploadFileRequest<'a> {
    /// the file being uploaded
    pub file: TempFile<'a>,
    /// leave blank to store at the root
    folderPath: Option<String>,
}

impl UploadFileRequest<'_> {
    pub fn folder_path(&self) -> String {
        match &self.folderPath {
            Some(path) if !path.trim().is_empty() => path.trim().to_string(),
            _ => String::from("/"),
        }
    }
}

//language=RegExp
static RESERVED_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])$").unwrap());
//language=RegExp
static BANNED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new("(^\\.\\.|^\\./)|[/\\\\<>|:&;#?*\"]").unwrap());

/// returns a sanitized string based on [Rocket's file name sanitization](https://api.rocket.rs/master/rocket/fs/struct.FileName.html#sanitization),
/// widened to keep extensions so the stored original name stays useful.
/// will return None if the entire file name is unsafe
pub fn sanitized_file_name(name: &str) -> Option<String> {
    if RESERVED_NAME_REGEX.is_match(&name.to_uppercase())
        || name.starts_with("..")
        || name.contains("./")
    {
        return None;
    }
    let replaced = BANNED_CHARS.replace_all(name, "").to_string();
    if replaced.trim().is_empty() {
        return None;
    }
    Some(replaced)
}

#[cfg(test)]
mod sanitized_file_name_tests {
    use super::sanitized_file_name;

    #[test]
    fn removes_invalid_names() {
        let invalid_names = vec![
            "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
            "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
            "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
            "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
        ];
        for name in invalid_names.iter() {
            println!("Testing {}", name);
            assert_eq!(None, sanitized_file_name(name));
        }
    }

    #[test]
    fn keeps_file_extension() {
        assert_eq!("test.txt".to_string(), sanitized_file_name("test.txt").unwrap());
    }

    // files that are only extensions (like .bashrc) are allowed
    #[test]
    fn keeps_files_with_only_extension() {
        assert_eq!(".bashrc".to_string(), sanitized_file_name(".bashrc").unwrap());
    }

    #[test]
    fn keeps_multiple_extensions() {
        assert_eq!(
            "test.old.txt.bak".to_string(),
            sanitized_file_name("test.old.txt.bak").unwrap()
        );
    }

    #[test]
    fn removes_path_traversal_attempts() {
        assert_eq!(None, sanitized_file_name("./folders/y.txt"));
        assert_eq!(None, sanitized_file_name("../whatever/a.txt"));
    }

    // reserved device names only match whole names, not prefixes
    #[test]
    fn keeps_names_starting_with_reserved_words() {
        assert_eq!(
            "contract.pdf".to_string(),
            sanitized_file_name("contract.pdf").unwrap()
        );
    }

    #[test]
    fn strips_banned_characters() {
        assert_eq!(
            "report2024.pdf".to_string(),
            sanitized_file_name("report|2024?.pdf").unwrap()
        );
    }
}
