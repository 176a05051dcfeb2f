use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid command: {}", _0)]
    UnknownCommand(String),

    #[error("Alias `{}` is already registered", _0)]
    DuplicateAlias(String),

    #[error("Invalid alias: alias may not be empty")]
    EmptyAlias,

    #[error("Could not cast input `{}`: {}", .input, .reason)]
    Cast { input: String, reason: String },

    #[error("Command failed: {}", _0)]
    Handler(String),

    #[error("Invalid date `{}`: expected `yyyy-mm-dd`", _0)]
    InvalidDate(String),

    #[error("Invalid duration `{}`: expected `#w #d hh:mm:ss.micro`", _0)]
    InvalidDuration(String),

    #[error("Console error: {}", _0)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn cast(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Cast {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Constructor for failures inside user-supplied command handlers.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}
