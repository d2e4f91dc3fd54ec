//! Error type for filesystem mutations

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for filesystem mutations
pub type FsResult<T> = Result<T, FsError>;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Nothing to paste or source no longer exists: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Cannot place {} inside itself", .0.display())]
    IntoItself(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an io::Error raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::Io { path, source },
        }
    }
}

/// Attach the offending path to io results
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &std::path::Path) -> FsResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &std::path::Path) -> FsResult<T> {
        self.map_err(|e| FsError::from_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_is_classified() {
        let err = FsError::from_io("/root/secret", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FsError::PermissionDenied(_)));
        assert!(err.to_string().contains("/root/secret"));
    }

    #[test]
    fn test_other_errors_keep_source() {
        let err = FsError::from_io("/tmp/x", io::Error::other("disk full"));
        assert!(matches!(err, FsError::Io { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
