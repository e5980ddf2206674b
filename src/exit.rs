//! Graceful process exit.
//!
//! [`Shutdown`] owns the teardown registry and is created once at startup.
//! Clones share the same registry, so it can be handed to signal handlers and
//! error paths freely.

pub mod cause;
pub mod teardown;

pub use cause::Cause;
pub use teardown::{TeardownRegistry, TeardownStep, step};

use crate::ui;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Shutdown {
    teardown: Arc<TeardownRegistry>,
    command_name: String,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Shutdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shutdown")
            .field("steps", &self.teardown.len())
            .field("command_name", &self.command_name)
            .finish()
    }
}

/// Basename of the running program, as typed by the user.
pub fn invoked_command_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg0| command_basename(&arg0.to_string_lossy()))
        .unwrap_or_default()
}

pub(crate) fn command_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

impl Shutdown {
    pub fn new() -> Self {
        Self::with_command_name(invoked_command_name())
    }

    /// Command name used for the "run `<command> --help`" hint.
    pub fn with_command_name(command_name: impl Into<String>) -> Self {
        Self {
            teardown: Arc::new(TeardownRegistry::new()),
            command_name: command_name.into(),
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn teardown(&self) -> &TeardownRegistry {
        &self.teardown
    }

    /// Register a step to run before exit. Registering the same step twice has
    /// no further effect.
    pub fn on_teardown(&self, step: TeardownStep) {
        self.teardown.register(step);
    }

    pub fn off_teardown(&self, step: &TeardownStep) {
        self.teardown.unregister(step);
    }

    /// Log the cause to `out`, run teardown and return the final exit code.
    ///
    /// Write failures are ignored; they must not keep the process alive.
    pub fn finish(&self, cause: &Cause, exit_code: Option<i32>, out: &mut impl Write) -> i32 {
        let code = cause.exit_code(exit_code);
        for line in cause.messages(&self.command_name) {
            writeln!(out, "{}", line).ok();
        }
        self.run_teardown(code, cause, out)
    }

    /// Run all teardown steps, logging failures to `out`, and return the final
    /// exit code.
    pub fn run_teardown(&self, code: i32, cause: &Cause, out: &mut impl Write) -> i32 {
        if self.teardown.is_empty() {
            return code;
        }
        self.teardown.run(code, cause, |message| {
            writeln!(
                out,
                "{}",
                ui::failure(&format!("Error in teardown step: {}", message))
            )
            .ok();
        })
    }

    /// Log the cause, run teardown and terminate the process.
    ///
    /// Must not be called from inside a teardown step.
    pub fn graceful_exit(&self, cause: impl Into<Cause>, exit_code: Option<i32>) -> ! {
        let cause = cause.into();
        let code = self.finish(&cause, exit_code, &mut io::stdout());
        io::stdout().flush().ok();
        std::process::exit(code)
    }

    /// Run teardown with an already resolved code and terminate the process.
    pub fn exit_with_teardown(&self, code: i32, cause: &Cause) -> ! {
        let code = self.run_teardown(code, cause, &mut io::stdout());
        io::stdout().flush().ok();
        std::process::exit(code)
    }
}

#[cfg(test)]
mod tests;
