use crate::error::{BoxError, ClirkError, Hint, UserFacingError};
use crate::ui;
use crate::utils::stringify::{UnknownCause, stringify_error};
use colored::Colorize;
use serde_json::Value;

/// Why the process is exiting, classified once where the value enters.
#[derive(Debug, Default)]
pub enum Cause {
    /// Regular, successful exit
    #[default]
    None,
    /// Numeric error code
    Code(i32),
    /// The user cancelled an interactive prompt
    PromptCancelled,
    UserFacing(UserFacingError),
    Unknown(UnknownCause),
}

impl Cause {
    /// Classify an arbitrary error by downcasting to the known kinds.
    pub fn from_error(err: BoxError) -> Self {
        let err = match err.downcast::<UserFacingError>() {
            Ok(user_facing) => return Cause::UserFacing(*user_facing),
            Err(err) => err,
        };
        match err.downcast::<ClirkError>() {
            Ok(clirk) => Cause::from(*clirk),
            Err(err) => Cause::Unknown(UnknownCause::Error(err)),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Cause::None)
    }

    /// Exit code for this cause. An explicit code always wins; otherwise a
    /// non-zero numeric cause is used as is, any other cause maps to 1 and no
    /// cause to 0.
    pub fn exit_code(&self, explicit: Option<i32>) -> i32 {
        if let Some(code) = explicit {
            return code;
        }
        match self {
            Cause::None => 0,
            Cause::Code(code) if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Console lines announcing this cause; empty for [`Cause::None`].
    pub fn messages(&self, command_name: &str) -> Vec<String> {
        match self {
            Cause::None => Vec::new(),
            Cause::Code(code) => vec![ui::failure(&format!(
                "Exiting. {}",
                format!("(Error #{})", code).dimmed()
            ))],
            Cause::PromptCancelled => vec![ui::terminated("Prompt Cancelled")],
            Cause::UserFacing(err) => {
                let mut lines = vec![ui::failure(err.message())];
                match err.hint() {
                    Hint::Text(hint) if !hint.is_empty() => {
                        lines.push(hint.dimmed().to_string())
                    }
                    Hint::Help => lines.push(ui::hint_to_help(command_name).dimmed().to_string()),
                    _ => {}
                }
                lines
            }
            Cause::Unknown(unknown) => vec![ui::failure(&stringify_error(unknown))],
        }
    }
}

impl From<i32> for Cause {
    fn from(code: i32) -> Self {
        Cause::Code(code)
    }
}

impl From<&str> for Cause {
    fn from(message: &str) -> Self {
        Cause::Unknown(UnknownCause::Message(message.to_string()))
    }
}

impl From<String> for Cause {
    fn from(message: String) -> Self {
        Cause::Unknown(UnknownCause::Message(message))
    }
}

impl From<Value> for Cause {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cause::None,
            other => Cause::Unknown(UnknownCause::Value(other)),
        }
    }
}

impl From<UserFacingError> for Cause {
    fn from(err: UserFacingError) -> Self {
        Cause::UserFacing(err)
    }
}

impl From<ClirkError> for Cause {
    fn from(err: ClirkError) -> Self {
        match err {
            ClirkError::UserFacing(user_facing) => Cause::UserFacing(user_facing),
            ClirkError::PromptCancelled => Cause::PromptCancelled,
            other => Cause::Unknown(UnknownCause::Error(Box::new(other))),
        }
    }
}

impl From<BoxError> for Cause {
    fn from(err: BoxError) -> Self {
        Cause::from_error(err)
    }
}
