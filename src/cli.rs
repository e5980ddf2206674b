//! clirk - the CLI clerk.
//!
//! Parses arguments, resolves the CLI's own package metadata and takes over
//! the chores every CLI has: `--help`, `--version` and Ctrl+C.

pub mod context;
pub mod flags;
pub mod help;
pub mod options;

pub use context::{CliOption, CliParameter, ClirkContext, create_context};
pub use flags::{BuiltinFlags, add_flags_to_options, is_flag_defined};
pub use options::{CliOptions, SigintCallback, SigintHandler};

use crate::error::{ClirkError, Result};
use crate::exit::{Cause, Shutdown};

/// Result of bootstrapping, before anything is printed.
#[derive(Debug)]
pub enum Bootstrap {
    Ready(ClirkContext),
    /// `--help` was requested; holds the help text
    Help(String),
    /// `--version` was requested; holds the version line
    Version(String),
}

/// Build the context and decide whether a built-in flag short-circuits the
/// run. Flags the caller declared themselves are never intercepted. Help is
/// checked before version.
pub fn prepare(options: &CliOptions, shutdown: &Shutdown) -> Result<Bootstrap> {
    let args_options = options.args_options.as_ref();
    let help_by_user = is_flag_defined(args_options, "help");
    let version_by_user = is_flag_defined(args_options, "version");

    let options = add_flags_to_options(
        options,
        BuiltinFlags {
            help: !help_by_user,
            version: !version_by_user,
        },
    );
    let context = create_context(&options, shutdown)?;

    if !help_by_user && context.args.is_set("help") {
        return Ok(Bootstrap::Help(context.help_message()));
    }
    if !version_by_user && context.args.is_set("version") {
        return Ok(Bootstrap::Version(context.version_message()));
    }
    Ok(Bootstrap::Ready(context))
}

/// Bootstrap a CLI. Prints help or version and exits when asked to,
/// otherwise installs the SIGINT handler and returns the context.
pub fn clirk(options: &CliOptions, shutdown: &Shutdown) -> Result<ClirkContext> {
    match prepare(options, shutdown)? {
        Bootstrap::Help(message) | Bootstrap::Version(message) => {
            println!("{}", message);
            shutdown.graceful_exit(Cause::None, None)
        }
        Bootstrap::Ready(context) => {
            register_sigint(&context)?;
            Ok(context)
        }
    }
}

/// Install the context's SIGINT handler. Returns `false` when there is no
/// handler or another handler is already installed for this process.
pub fn register_sigint(context: &ClirkContext) -> Result<bool> {
    let Some(handler) = context.sigint_handler.clone() else {
        return Ok(false);
    };

    match ctrlc::set_handler(move || handler()) {
        Ok(()) => {
            tracing::debug!(command = %context.command_name, "SIGINT handler installed");
            Ok(true)
        }
        Err(ctrlc::Error::MultipleHandlers) => {
            tracing::debug!("SIGINT already handled, keeping existing handler");
            Ok(false)
        }
        Err(e) => Err(ClirkError::Signal(e)),
    }
}

/// Run a CLI body and exit gracefully with its outcome.
pub fn clitch<F, E>(shutdown: &Shutdown, body: F) -> !
where
    F: FnOnce() -> std::result::Result<(), E>,
    E: Into<Cause>,
{
    match body() {
        Ok(()) => shutdown.graceful_exit(Cause::None, None),
        Err(e) => shutdown.graceful_exit(e, None),
    }
}
