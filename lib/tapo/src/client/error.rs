#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Json(serde_json::Error),
    Base64(base64::DecodeError),
    Utf8(std::string::FromUtf8Error),
    Handshake(HandshakeError),
    Status(u16),
    Device(i32),
    Encrypt,
    Decrypt,
    MissingResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    Status(u16),
    MissingCookie,
    UnexpectedLength(usize),
    HashMismatch,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Utf8(err)
    }
}

impl From<HandshakeError> for Error {
    fn from(err: HandshakeError) -> Self {
        Self::Handshake(err)
    }
}

impl Error {
    /// True when the failure happened before or while establishing a session,
    /// as opposed to a malformed or rejected response on a live one.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout(),
            Self::Handshake(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::Base64(err) => write!(f, "Base64 error: {err}"),
            Self::Utf8(err) => write!(f, "UTF-8 error: {err}"),
            Self::Handshake(err) => write!(f, "Handshake failed: {err}"),
            Self::Status(code) => write!(f, "Unexpected HTTP status: {code}"),
            Self::Device(code) => write!(f, "Device returned error code {code}"),
            Self::Encrypt => write!(f, "Unable to encrypt request"),
            Self::Decrypt => write!(f, "Unable to decrypt response"),
            Self::MissingResult => write!(f, "Missing result"),
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "unexpected HTTP status {code}"),
            Self::MissingCookie => write!(f, "missing session cookie"),
            Self::UnexpectedLength(len) => write!(f, "unexpected response length {len}"),
            Self::HashMismatch => write!(f, "server hash mismatch, check credentials"),
        }
    }
}

impl std::error::Error for HandshakeError {}
