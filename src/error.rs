use crate::utils::stringify::error_message;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ClirkError {
    #[error("The package path option is required.")]
    MissingPackagePath,

    #[error("Could not find package for path: {path}")]
    PackageNotFound { path: PathBuf },

    #[error("Failed to read manifest '{path}': {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{path}': {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// CLI definition file could not be read or deserialized
    #[error("Invalid CLI definition in '{path}': {message}")]
    Definition { path: PathBuf, message: String },

    #[error("Failed to register SIGINT handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    UserFacing(#[from] UserFacingError),

    #[error("User force closed the prompt")]
    PromptCancelled,
}

pub type Result<T> = std::result::Result<T, ClirkError>;

/// Optional hint printed (dimmed) below a user-facing error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Hint {
    #[default]
    None,
    /// Custom hint text
    Text(String),
    /// Generic "run `<command> --help`" hint
    Help,
}

/// An error whose message is meant to be shown verbatim to the end user.
///
/// Graceful exit prints the message as a failure line and never includes a
/// backtrace or the source chain.
#[derive(Debug)]
pub struct UserFacingError {
    message: String,
    hint: Hint,
    source: Option<BoxError>,
}

impl UserFacingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: Hint::None,
            source: None,
        }
    }

    /// Wrap `source` with a new message; its text is appended in parentheses,
    /// e.g. `"Could not load config (file not found)"`.
    pub fn from_error(source: impl Into<BoxError>, message: impl Into<String>, hint: Hint) -> Self {
        let source = source.into();
        Self {
            message: format!("{} ({})", message.into(), error_message(source.as_ref())),
            hint,
            source: Some(source),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Hint::Text(hint.into());
        self
    }

    pub fn with_help_hint(mut self) -> Self {
        self.hint = Hint::Help;
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> &Hint {
        &self.hint
    }
}

impl fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UserFacingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
