use std::io;

use explorer_core::CatalogError;
use explorer_runtime::ProgramError;

use crate::fetch::FetchError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("no widget named {0:?}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_convert() {
        let err: AppError = CatalogError::EmptyTitle.into();
        assert!(matches!(err, AppError::Catalog(_)));
        assert!(err.to_string().starts_with("catalog error:"));
    }

    #[test]
    fn fetch_errors_pass_through() {
        let err: AppError = FetchError::Status {
            url: "https://example.com/a.png".into(),
            status: 503,
        }
        .into();
        assert_eq!(err.to_string(), "https://example.com/a.png answered 503");
    }

    #[test]
    fn not_found_names_the_entry() {
        assert_eq!(
            AppError::NotFound("Nonexistent".into()).to_string(),
            "no widget named \"Nonexistent\""
        );
    }
}
