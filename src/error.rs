use thiserror::Error;

/// Failures while extracting one listing page. Fatal to the whole batch;
/// a missing category must never shrink the output silently.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch rendered page {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("page {url} returned no content region")]
    MissingContent { url: String },
}

/// Failures while generating the flecs module. All of these are raised
/// before any output file is written.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("identifier collision: {first:?} and {second:?} both sanitize to `{ident}`")]
    IdentifierCollision {
        first: String,
        second: String,
        ident: String,
    },

    #[error("malformed article document {path}: {reason}")]
    MalformedDocument { path: String, reason: String },
}
