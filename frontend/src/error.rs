use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ViewError {
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("DOM operation failed: {0}")]
    Js(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewError),
}
