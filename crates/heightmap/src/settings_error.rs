// ---------------------------------------------------------------------------
// SettingsError: errors raised while loading or validating settings
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur when reading `HeightMapSettings` from outside.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The settings text is not valid JSON for `HeightMapSettings`.
    Parse(serde_json::Error),
    /// A field holds a value outside its option set.
    OutOfRange { field: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "Parse error: {e}"),
            SettingsError::OutOfRange { field, value } => {
                write!(f, "Setting `{field}` has unsupported value {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display_io() {
        let err = SettingsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_settings_error_display_out_of_range() {
        let err = SettingsError::OutOfRange {
            field: "smoothness",
            value: "1.5".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("smoothness"), "got: {msg}");
        assert!(msg.contains("1.5"), "got: {msg}");
    }

    #[test]
    fn test_settings_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SettingsError = json_err.into();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_settings_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SettingsError = io_err.into();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
