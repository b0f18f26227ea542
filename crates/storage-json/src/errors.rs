use thiserror::Error;

use valutahub_core::errors::StoreError;

/// Errors from the JSON document store, carrying the document name.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read '{document}': {message}")]
    Read { document: String, message: String },

    #[error("failed to write '{document}': {message}")]
    Write { document: String, message: String },

    #[error("failed to decode '{document}': {message}")]
    Decode { document: String, message: String },
}

impl From<StorageError> for valutahub_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Read { document, message } => {
                StoreError::ReadFailed { document, message }.into()
            }
            StorageError::Write { document, message } => {
                StoreError::WriteFailed { document, message }.into()
            }
            StorageError::Decode { document, message } => {
                StoreError::DecodeFailed { document, message }.into()
            }
        }
    }
}
