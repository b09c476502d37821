//! Error types for the folio terminal.

use std::io;

/// Errors produced by the folio crates.
///
/// The filesystem and command variants carry user-facing messages: the
/// terminal renders them verbatim as one history line.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("no such file or folder: {0}")]
    NotFound(String),

    #[error("no such folder: {0}")]
    NoSuchFolder(String),

    #[error("not a folder: {0}")]
    NotADirectory(String),

    #[error("is a folder: {0}")]
    IsADirectory(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("folder not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("command not found: {0}")]
    UnknownCommand(String),

    #[error("corrupt filesystem: {0}")]
    CorruptFilesystem(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let e = FolioError::NotFound("/nope".into());
        assert_eq!(format!("{e}"), "no such file or folder: /nope");
    }

    #[test]
    fn no_such_folder_display() {
        let e = FolioError::NoSuchFolder("/nope".into());
        assert_eq!(format!("{e}"), "no such folder: /nope");
    }

    #[test]
    fn directory_not_empty_display() {
        let e = FolioError::DirectoryNotEmpty("/projekte".into());
        assert_eq!(format!("{e}"), "folder not empty: /projekte");
    }

    #[test]
    fn usage_display() {
        let e = FolioError::Usage("cat <path>".into());
        assert_eq!(format!("{e}"), "usage: cat <path>");
    }

    #[test]
    fn unknown_command_display_keeps_raw_input() {
        let e = FolioError::UnknownCommand("frobnicate --all".into());
        assert_eq!(format!("{e}"), "command not found: frobnicate --all");
    }

    #[test]
    fn invalid_argument_is_bare() {
        let e = FolioError::InvalidArgument("unknown mode: sepia".into());
        assert_eq!(format!("{e}"), "unknown mode: sepia");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
        let e: FolioError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("locked"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: FolioError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: FolioError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(FolioError::Storage("quota exceeded".into()));
        assert!(r.is_err());
    }
}
