use crate::error::StorageError;
use std::fmt;

/// Contract name that is safe to use as a file stem: `[A-Za-z0-9_]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName(String);

impl RecordName {
    pub(crate) const EXTENSION: &'static str = "json";

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, Self::EXTENSION)
    }
}

impl TryFrom<&str> for RecordName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        checked(value, "Contract name", |c| c.is_ascii_alphanumeric() || c == '_').map(Self)
    }
}

/// Network name used as the records subdirectory: `[A-Za-z0-9_-]+`, not starting with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkName(String);

impl TryFrom<&str> for NetworkName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.starts_with('-') {
            return Err(StorageError::InvalidName {
                message: value.to_owned().into(),
                context: Some("Network name cannot start with '-'".into()),
            });
        }
        checked(value, "Network name", |c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            .map(Self)
    }
}

impl AsRef<str> for NetworkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn checked(value: &str, kind: &'static str, allowed: impl Fn(char) -> bool) -> Result<String, StorageError> {
    if value.is_empty() {
        return Err(StorageError::InvalidName {
            message: "EMPTY".into(),
            context: Some(format!("{kind} cannot be empty").into()),
        });
    }

    if !value.chars().all(allowed) {
        return Err(StorageError::InvalidName {
            message: value.to_owned().into(),
            context: Some(format!("{kind} contains illegal characters").into()),
        });
    }

    Ok(value.to_owned())
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
