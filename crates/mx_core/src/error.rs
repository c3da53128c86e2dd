use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch task failed: {0}")]
    Task(String),
}

/// Coarse classification used by callers that decide whether to surface or
/// suppress a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status,
    Decode,
    Config,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(e) if e.is_builder() => ErrorKind::Config,
            Error::Http(e) if e.is_decode() => ErrorKind::Decode,
            Error::Http(_) => ErrorKind::Network,
            Error::Status { .. } => ErrorKind::Status,
            Error::Decode(_) => ErrorKind::Decode,
            Error::InvalidUrl(_) | Error::Io(_) | Error::Config(_) => ErrorKind::Config,
            Error::Task(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let decode = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert_eq!(Error::from(decode).kind(), ErrorKind::Decode);

        let status = Error::Status { status: 500, url: "http://localhost/articles".to_string() };
        assert_eq!(status.kind(), ErrorKind::Status);
        assert_eq!(status.to_string(), "Unexpected status 500 from http://localhost/articles");

        let parse = url::Url::parse("not a url").unwrap_err();
        assert_eq!(Error::from(parse).kind(), ErrorKind::Config);
        assert_eq!(Error::Config("missing fixture".to_string()).kind(), ErrorKind::Config);
        assert_eq!(Error::Task("boom".to_string()).kind(), ErrorKind::Internal);
    }
}
