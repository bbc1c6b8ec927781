use std::borrow::Cow;
use tnode_kernel::ports::StoreError;

/// A specialized [`StorageError`] enum of this crate.
#[tnode_derive::tnode_error]
pub enum StorageError {
    #[error("Invalid record name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Chain id mismatch{}: {message}", format_context(.context))]
    ChainMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Record codec failure{}: {source}", format_context(.context))]
    Codec { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName { message, context } => Self::InvalidName { message, context },
            StorageError::Io { source, context } => Self::Io { source, context },
            StorageError::Codec { source, context } => Self::Codec { source, context },
            other @ StorageError::ChainMismatch { .. } => {
                Self::Internal { message: other.to_string().into(), context: None }
            },
        }
    }
}
