use std::error::Error as StdError;

use thiserror::Error;

use crate::ObjectKind;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A metadata query could not be executed against the connection.
///
/// Wraps whatever the driver reported; the original error is available
/// through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("failed to enumerate {kind} objects")]
pub struct DatabaseAccessError {
    kind: ObjectKind,
    #[source]
    source: BoxError,
}

impl DatabaseAccessError {
    pub fn new(kind: ObjectKind, source: impl Into<BoxError>) -> Self {
        DatabaseAccessError { kind, source: source.into() }
    }

    /// Kind of catalog object whose query failed.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }
}
