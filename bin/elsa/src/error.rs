use std::fmt;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a strip or the transport to it.
#[derive(Debug)]
pub enum StripError {
    Connection(ErasedError),
    Query(ErasedError),
    Command(ErasedError),
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(&'static str),
    EmptyAddressList,
    EmptyAddress,
}

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Tapo(tapo::Error),
    NotFound(String),
    Command(StripError),
    Registry(usize),
    Io(std::io::Error),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<tapo::Error> for Error {
    fn from(err: tapo::Error) -> Self {
        Self::Tapo(err)
    }
}

impl From<StripError> for Error {
    fn from(err: StripError) -> Self {
        Self::Command(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "connection error: {err}"),
            Self::Query(err) => write!(f, "query error: {err}"),
            Self::Command(err) => write!(f, "command error: {err}"),
        }
    }
}

impl std::error::Error for StripError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "please set {name} in your environment"),
            Self::EmptyAddressList => write!(
                f,
                "no valid strip addresses found, set TAPO_P300_IPS e.g. '192.168.100.120,192.168.100.121'"
            ),
            Self::EmptyAddress => write!(f, "address must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Tapo(err) => write!(f, "tapo error: {err}"),
            Self::NotFound(nickname) => write!(
                f,
                "no device with nickname '{nickname}' found on any known P300 IP, \
                 check your nickname spelling or rename it in the Tapo app"
            ),
            Self::Command(err) => write!(f, "action aborted: {err}"),
            Self::Registry(failed) => write!(f, "{failed} file(s) could not be updated"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
